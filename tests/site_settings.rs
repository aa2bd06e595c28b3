use chrono::{Duration, Utc};
use folio::connectors::record_store::mock::InMemoryRecordStore;
use folio::connectors::RecordStoreConnector;
use folio::models::DEFAULT_MAINTENANCE_MESSAGE;
use folio::services::SettingsService;
use std::sync::Arc;

fn service() -> SettingsService {
    SettingsService::new(Arc::new(InMemoryRecordStore::new()) as Arc<dyn RecordStoreConnector>)
}

#[tokio::test]
async fn missing_settings_read_as_defaults() {
    let service = service();

    let settings = service.get().await.unwrap();
    assert!(!settings.maintenance_mode);
    assert_eq!(settings.maintenance_message, DEFAULT_MAINTENANCE_MESSAGE);

    let end = settings.maintenance_end_time.expect("default end time");
    let expected = Utc::now() + Duration::hours(2);
    assert!((end - expected).num_seconds().abs() < 60);
}

#[tokio::test]
async fn update_creates_the_singleton_lazily() {
    let service = service();

    let patch = serde_json::json!({
        "maintenanceMode": true,
        "maintenanceMessage": "Down for upgrades."
    });
    service.update(patch).await.unwrap();

    let settings = service.get().await.unwrap();
    assert!(settings.maintenance_mode);
    assert_eq!(settings.maintenance_message, "Down for upgrades.");
}

#[tokio::test]
async fn partial_update_preserves_the_other_fields() {
    let service = service();

    service
        .update(serde_json::json!({ "maintenanceMode": true }))
        .await
        .unwrap();
    service
        .update(serde_json::json!({ "maintenanceMessage": "Back soon." }))
        .await
        .unwrap();

    let settings = service.get().await.unwrap();
    assert!(settings.maintenance_mode);
    assert_eq!(settings.maintenance_message, "Back soon.");
}
