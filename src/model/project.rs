use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A showcased project. Served newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project with no links, not featured, created now.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            technologies: Vec::new(),
            image_url: None,
            project_url: None,
            github_url: None,
            featured: false,
            created_at: Utc::now(),
        }
    }
}
