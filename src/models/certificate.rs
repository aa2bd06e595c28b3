use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(skip_serializing, default)]
    pub id: String,
    pub title: String,
    pub issuing_organization: String,
    pub issue_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_url: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_public_id: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}
