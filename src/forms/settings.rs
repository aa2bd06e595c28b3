use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_valid::Validate;

/// Partial settings update; only supplied fields are merged. No
/// validation is applied to the message content on purpose.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_end_time: Option<DateTime<Utc>>,
}

impl SettingsForm {
    pub fn into_partial(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Object(Default::default()))
    }
}
