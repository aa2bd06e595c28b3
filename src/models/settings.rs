use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAINTENANCE_MESSAGE: &str =
    "We are currently performing scheduled maintenance. We should be back online shortly.";

/// Site-wide settings singleton. Absence in the store is a valid state
/// and reads as [`SiteSettings::defaults`], never as an error.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default = "default_message")]
    pub maintenance_message: String,
    // advisory only, never auto-clears the maintenance flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_end_time: Option<DateTime<Utc>>,
}

fn default_message() -> String {
    DEFAULT_MAINTENANCE_MESSAGE.to_string()
}

impl SiteSettings {
    pub fn defaults() -> Self {
        SiteSettings {
            maintenance_mode: false,
            maintenance_message: default_message(),
            maintenance_end_time: Some(Utc::now() + Duration::hours(2)),
        }
    }
}
