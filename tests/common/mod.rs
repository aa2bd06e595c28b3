use folio::configuration::{
    AssetStoreSettings, EmailSettings, IdentitySettings, RecordStoreSettings, Settings,
};
use std::net::TcpListener;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub record_store: MockServer,
    pub asset_store: MockServer,
    pub identity: MockServer,
    pub email: MockServer,
}

pub const ADMIN_IDENTITY: &str = "admin@example.com";

/// Boots the full application against one mock server per external
/// collaborator. Tests mount expectations on the servers they care about.
pub async fn spawn_app() -> TestApp {
    let record_store = MockServer::start().await;
    let asset_store = MockServer::start().await;
    let identity = MockServer::start().await;
    let email = MockServer::start().await;

    let settings = Settings {
        app_host: "127.0.0.1".to_string(),
        app_port: 0,
        admin_identity: ADMIN_IDENTITY.to_string(),
        record_store: RecordStoreSettings {
            base_url: record_store.uri(),
            auth_token: None,
            timeout_secs: 5,
        },
        asset_store: AssetStoreSettings {
            base_url: asset_store.uri(),
            cloud_name: "folio".to_string(),
            upload_preset: "folio_unsigned".to_string(),
            timeout_secs: 5,
        },
        identity: IdentitySettings {
            auth_url: format!("{}/me", identity.uri()),
            timeout_secs: 5,
        },
        email: EmailSettings {
            base_url: email.uri(),
            service_id: "service_test".to_string(),
            template_id: "template_test".to_string(),
            public_key: "public_test".to_string(),
            timeout_secs: 5,
        },
    };

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = folio::startup::run(listener, settings)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        record_store,
        asset_store,
        identity,
        email,
    }
}
