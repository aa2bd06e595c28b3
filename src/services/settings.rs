use crate::connectors::{ConnectorError, RecordStoreConnector};
use crate::models::SiteSettings;
use serde_json::Value;
use std::sync::Arc;

const SETTINGS_PATH: &str = "settings";

/// Single-record store for the site-wide settings. The singleton is
/// created lazily on first write; a missing document reads as the
/// documented defaults, never as an error.
pub struct SettingsService {
    records: Arc<dyn RecordStoreConnector>,
}

impl SettingsService {
    pub fn new(records: Arc<dyn RecordStoreConnector>) -> Self {
        Self { records }
    }

    #[tracing::instrument(name = "Load site settings.", skip(self))]
    pub async fn get(&self) -> Result<SiteSettings, ConnectorError> {
        match self.records.read_singleton(SETTINGS_PATH).await? {
            Some(value) => serde_json::from_value(value).map_err(|err| {
                ConnectorError::InvalidResponse(format!("malformed settings document: {}", err))
            }),
            None => Ok(SiteSettings::defaults()),
        }
    }

    /// Merge semantics; the message is stored as-is and the end-time
    /// estimate is advisory only.
    #[tracing::instrument(name = "Update site settings.", skip(self, partial))]
    pub async fn update(&self, partial: Value) -> Result<(), ConnectorError> {
        self.records.merge_singleton(SETTINGS_PATH, partial).await
    }
}
