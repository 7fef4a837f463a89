use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work experience entry, ranked by `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i64,
    pub position: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

impl Experience {
    pub fn new(
        position: impl Into<String>,
        company: impl Into<String>,
        period: impl Into<String>,
        order: i64,
    ) -> Self {
        Self {
            id: 0,
            position: position.into(),
            company: company.into(),
            period: period.into(),
            description: String::new(),
            order,
            created_at: Utc::now(),
        }
    }
}
