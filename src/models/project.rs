use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A portfolio project. The `id` is the store-assigned key and never part
/// of the persisted document; `created_at` is stamped by the content
/// service on creation and immutable afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(skip_serializing, default)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    // primary media reference, image or video
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_public_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    // display grouping only, no lifecycle behavior depends on it
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}
