use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A technology badge, ranked by `order`.
///
/// `icon` names an icon from a fixed set (see [`TechIcon`](crate::render::icons::TechIcon));
/// unknown names fall back to a generic glyph. A missing `url` means the badge is not a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Technology {
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            order,
            icon: None,
            image_url: None,
            url: None,
            created_at: Utc::now(),
        }
    }
}
