//! Technology icon resolution.
//!
//! Records name their icon with a Tabler identifier (`IconBrandRust`,
//! `IconDatabase`, ...). Known names resolve to a variant; anything else,
//! including a missing name, falls back to [`TechIcon::Code`].

/// Icon shown next to a technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechIcon {
    Aws,
    Cpp,
    Css,
    Datadog,
    Docker,
    Figma,
    Git,
    Github,
    Go,
    Google,
    Html,
    Javascript,
    Jira,
    Kubernetes,
    Microsoft,
    Nodejs,
    Python,
    React,
    Redux,
    Rust,
    Typescript,
    Database,
    Terminal,
    Code,
}

impl TechIcon {
    /// Resolves an icon name, falling back to [`TechIcon::Code`].
    pub fn resolve(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("IconBrandAws") => TechIcon::Aws,
            Some("IconBrandCpp") => TechIcon::Cpp,
            Some("IconBrandCss3") => TechIcon::Css,
            Some("IconBrandDatadog") => TechIcon::Datadog,
            Some("IconBrandDocker") => TechIcon::Docker,
            Some("IconBrandFigma") => TechIcon::Figma,
            Some("IconBrandGit") => TechIcon::Git,
            Some("IconBrandGithub") => TechIcon::Github,
            Some("IconBrandGolang") => TechIcon::Go,
            Some("IconBrandGoogle") => TechIcon::Google,
            Some("IconBrandHtml5") => TechIcon::Html,
            Some("IconBrandJavascript") => TechIcon::Javascript,
            Some("IconBrandJira") => TechIcon::Jira,
            Some("IconBrandKubernetes") => TechIcon::Kubernetes,
            Some("IconBrandMicrosoft") => TechIcon::Microsoft,
            Some("IconBrandNodejs") => TechIcon::Nodejs,
            Some("IconBrandPython") => TechIcon::Python,
            Some("IconBrandReact") => TechIcon::React,
            Some("IconBrandRedux") => TechIcon::Redux,
            Some("IconBrandRust") => TechIcon::Rust,
            Some("IconBrandTypescript") => TechIcon::Typescript,
            Some("IconDatabase") => TechIcon::Database,
            Some("IconTerminal2") => TechIcon::Terminal,
            _ => TechIcon::Code,
        }
    }

    /// Short text tag used by the text renderer.
    pub const fn label(self) -> &'static str {
        match self {
            TechIcon::Aws => "aws",
            TechIcon::Cpp => "c++",
            TechIcon::Css => "css",
            TechIcon::Datadog => "dd",
            TechIcon::Docker => "docker",
            TechIcon::Figma => "figma",
            TechIcon::Git => "git",
            TechIcon::Github => "gh",
            TechIcon::Go => "go",
            TechIcon::Google => "g",
            TechIcon::Html => "html",
            TechIcon::Javascript => "js",
            TechIcon::Jira => "jira",
            TechIcon::Kubernetes => "k8s",
            TechIcon::Microsoft => "ms",
            TechIcon::Nodejs => "node",
            TechIcon::Python => "py",
            TechIcon::React => "react",
            TechIcon::Redux => "redux",
            TechIcon::Rust => "rs",
            TechIcon::Typescript => "ts",
            TechIcon::Database => "db",
            TechIcon::Terminal => "sh",
            TechIcon::Code => "</>",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_resolve() {
        assert_eq!(TechIcon::resolve(Some("IconBrandDocker")), TechIcon::Docker);
        assert_eq!(TechIcon::resolve(Some("IconTerminal2")), TechIcon::Terminal);
    }

    #[test]
    fn test_unknown_or_missing_falls_back_to_code() {
        assert_eq!(TechIcon::resolve(Some("IconBrandCobol")), TechIcon::Code);
        assert_eq!(TechIcon::resolve(Some("")), TechIcon::Code);
        assert_eq!(TechIcon::resolve(None), TechIcon::Code);
    }
}
