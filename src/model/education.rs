use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An education entry, ranked by `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: i64,
    pub degree: String,
    pub institution: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

impl Education {
    pub fn new(
        degree: impl Into<String>,
        institution: impl Into<String>,
        period: impl Into<String>,
        order: i64,
    ) -> Self {
        Self {
            id: 0,
            degree: degree.into(),
            institution: institution.into(),
            period: period.into(),
            description: String::new(),
            order,
            created_at: Utc::now(),
        }
    }
}
