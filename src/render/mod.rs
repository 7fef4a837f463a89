//! # Presentation
//!
//! Plain-text rendering of loaded portfolio data. Every view is a borrowed
//! wrapper implementing [`Display`]:
//!
//! - every section is always shown, with a "No ... data available." line when
//!   its resource came back empty; the profile-driven sections (About,
//!   Experience, Education) disappear entirely when there is no profile;
//! - collections render in the order they were loaded, never re-sorted;
//! - absent links are omitted rather than rendered empty.

pub mod icons;
pub mod styles;

use crate::coordinator::LoadedData;
use crate::model::{Education, Experience, Profile, Project, Technology};
use icons::TechIcon;
use std::fmt::{self, Display};
use styles::palette;

/// The whole page.
pub struct PortfolioView<'a>(pub &'a LoadedData);

/// The hero block: name, headline, short bio and contact links.
pub struct ProfileView<'a>(pub &'a Profile);

/// One technology with its icon and, when present, its link.
pub struct TechnologyBadge<'a>(pub &'a Technology);

/// A project card.
pub struct ProjectCard<'a>(pub &'a Project);

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let p = palette();
    writeln!(f)?;
    writeln!(f, "{}{title}{}", p.heading, p.reset)
}

fn link(f: &mut fmt::Formatter<'_>, label: &str, url: Option<&str>) -> fmt::Result {
    match url {
        Some(url) if !url.is_empty() => {
            let p = palette();
            writeln!(f, "  {label}: {}{url}{}", p.link, p.reset)
        }
        _ => Ok(()),
    }
}

impl Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.0;
        let p = palette();
        writeln!(f, "{}{}{}", p.heading, profile.name, p.reset)?;
        writeln!(f, "{}", profile.title)?;
        if let Some(location) = &profile.location {
            writeln!(f, "{}{location}{}", p.dim, p.reset)?;
        }
        writeln!(f, "{}", profile.bio)?;
        link(f, "GitHub", profile.github_url.as_deref())?;
        link(f, "LinkedIn", profile.linkedin_url.as_deref())?;
        link(f, "Discord", profile.discord_url.as_deref())?;
        link(f, "Email", profile.email.as_deref())?;
        link(f, "Resume", profile.resume_url.as_deref())
    }
}

impl Display for TechnologyBadge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tech = self.0;
        let icon = TechIcon::resolve(tech.icon.as_deref());
        write!(f, "[{}] {}", icon.label(), tech.name)?;
        if let Some(url) = tech.url.as_deref().filter(|url| !url.is_empty()) {
            let p = palette();
            write!(f, " <{}{url}{}>", p.link, p.reset)?;
        }
        Ok(())
    }
}

impl Display for ProjectCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let project = self.0;
        let marker = if project.featured { "* " } else { "" };
        writeln!(f, "{marker}{}", project.title)?;
        if !project.technologies.is_empty() {
            let p = palette();
            writeln!(f, "  {}{}{}", p.dim, project.technologies.join(" · "), p.reset)?;
        }
        writeln!(f, "  {}", project.description)?;
        link(f, "Code", project.github_url.as_deref())?;
        link(f, "Live", project.project_url.as_deref())
    }
}

fn entry(f: &mut fmt::Formatter<'_>, title: &str, place: &str, period: &str, text: &str) -> fmt::Result {
    let p = palette();
    writeln!(f, "{title}")?;
    writeln!(f, "  {}{place} • {period}{}", p.dim, p.reset)?;
    if !text.is_empty() {
        writeln!(f, "  {text}")?;
    }
    Ok(())
}

fn experience(f: &mut fmt::Formatter<'_>, e: &Experience) -> fmt::Result {
    entry(f, &e.position, &e.company, &e.period, &e.description)
}

fn education(f: &mut fmt::Formatter<'_>, e: &Education) -> fmt::Result {
    entry(f, &e.degree, &e.institution, &e.period, &e.description)
}

/// A titled section listing `items`, or the empty-state line when there are none.
fn section<T>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    label: &str,
    items: &[T],
    mut item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    heading(f, title)?;
    if items.is_empty() {
        let p = palette();
        return writeln!(f, "{}No {label} data available.{}", p.dim, p.reset);
    }
    for value in items {
        item(f, value)?;
    }
    Ok(())
}

impl Display for PortfolioView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;

        if let Some(profile) = &data.profile {
            write!(f, "{}", ProfileView(profile))?;

            heading(f, "About Me.")?;
            writeln!(f, "{}", profile.about_text())?;

            section(f, "Experience.", "experience", &data.experiences, experience)?;
            section(f, "Education.", "education", &data.education, education)?;
        }

        section(f, "Technologies.", "technologies", &data.technologies, |f, tech| {
            writeln!(f, "{}", TechnologyBadge(tech))
        })?;
        section(f, "Projects.", "projects", &data.projects, |f, project| {
            write!(f, "{}", ProjectCard(project))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_without_url_has_no_link() {
        let mut tech = Technology::new("Rust", 1);
        tech.icon = Some("IconBrandRust".to_string());
        assert_eq!(TechnologyBadge(&tech).to_string(), "[rs] Rust");

        tech.url = Some("https://www.rust-lang.org".to_string());
        assert_eq!(
            TechnologyBadge(&tech).to_string(),
            "[rs] Rust <https://www.rust-lang.org>"
        );
    }

    #[test]
    fn test_badge_with_unknown_icon_uses_fallback() {
        let mut tech = Technology::new("COBOL", 9);
        tech.icon = Some("IconBrandCobol".to_string());
        assert_eq!(TechnologyBadge(&tech).to_string(), "[</>] COBOL");
    }

    #[test]
    fn test_missing_profile_hides_about_but_keeps_collections() {
        let data = LoadedData {
            technologies: vec![Technology::new("Go", 1)],
            experiences: vec![Experience::new("Engineer", "Acme", "2020", 1)],
            ..LoadedData::default()
        };
        let out = PortfolioView(&data).to_string();
        assert!(!out.contains("About Me."));
        assert!(!out.contains("Experience."));
        assert!(!out.contains("Education."));
        assert!(out.contains("[</>] Go"));
        assert!(out.contains("Projects.\nNo projects data available."));
    }

    #[test]
    fn test_empty_collections_show_empty_state() {
        let data = LoadedData {
            profile: Some(Profile::new("Ada", "Engineer", "Bio")),
            technologies: vec![Technology::new("Rust", 1)],
            ..LoadedData::default()
        };
        let out = PortfolioView(&data).to_string();
        assert!(out.contains("Experience.\nNo experience data available."));
        assert!(out.contains("Education.\nNo education data available."));
        assert!(out.contains("Projects.\nNo projects data available."));
        assert!(out.contains("Technologies.\n[</>] Rust"));
        assert!(!out.contains("No technologies data available."));
    }

    #[test]
    fn test_collections_render_in_loaded_order() {
        let data = LoadedData {
            technologies: vec![Technology::new("Zig", 1), Technology::new("Ada", 2)],
            ..LoadedData::default()
        };
        let out = PortfolioView(&data).to_string();
        let zig = out.find("Zig").unwrap();
        let ada = out.find("Ada").unwrap();
        assert!(zig < ada);
    }

    #[test]
    fn test_profile_links_are_omitted_when_absent() {
        let mut profile = Profile::new("Ada", "Engineer", "Short bio");
        profile.github_url = Some("https://github.com/ada".to_string());
        let out = ProfileView(&profile).to_string();
        assert!(out.contains("GitHub: https://github.com/ada"));
        assert!(!out.contains("LinkedIn"));
        assert!(!out.contains("Resume"));
    }
}
