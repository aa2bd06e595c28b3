use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub app_port: u16,
    pub app_host: String,
    /// The one verified identity allowed through the maintenance gate.
    pub admin_identity: String,
    pub record_store: RecordStoreSettings,
    pub asset_store: AssetStoreSettings,
    pub identity: IdentitySettings,
    pub email: EmailSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RecordStoreSettings {
    pub base_url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AssetStoreSettings {
    pub base_url: String,
    pub cloud_name: String,
    pub upload_preset: String,
    #[serde(default = "default_upload_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct IdentitySettings {
    pub auth_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EmailSettings {
    pub base_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

// uploads carry raw media bytes, give them more room
fn default_upload_timeout_secs() -> u64 {
    60
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Add configuration values from a file named `configuration`
    // with the .yaml extension
    let mut settings = config::Config::default();
    settings.merge(config::File::with_name("configuration"))?; // .json, .toml, .yaml, .yml

    let mut config: Settings = settings.try_deserialize()?;

    // Secrets come from the environment, never from the file
    if let Ok(token) = std::env::var("RECORD_STORE_AUTH_TOKEN") {
        config.record_store.auth_token = Some(token);
    }
    if let Ok(identity) = std::env::var("ADMIN_IDENTITY") {
        config.admin_identity = identity;
    }

    Ok(config)
}
