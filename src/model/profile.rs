use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The portfolio owner's profile.
///
/// The API serves at most one profile (the most recently created row). When no
/// profile exists the resource is absent, which renders nothing rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub bio: String,
    #[serde(default)]
    pub bio_extended: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a profile with the required fields and no links.
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `title` - One-line headline
    /// * `bio` - Short biography shown in the hero section
    pub fn new(name: impl Into<String>, title: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            title: title.into(),
            bio: bio.into(),
            bio_extended: String::new(),
            avatar_url: None,
            location: None,
            location_url: None,
            github_url: None,
            linkedin_url: None,
            discord_url: None,
            email: None,
            resume_url: None,
            created_at: Utc::now(),
        }
    }

    /// The long-form biography, falling back to the short one when empty.
    pub fn about_text(&self) -> &str {
        if self.bio_extended.trim().is_empty() {
            &self.bio
        } else {
            &self.bio_extended
        }
    }
}
