use super::errors::ConnectorError;
use crate::configuration::AssetStoreSettings;
use crate::models::{AssetFile, AssetKind, AssetReference};
use async_trait::async_trait;
use reqwest::multipart;
use serde_json::Value;
use std::time::Duration;

/// Binary media host. Uploads return a durable URL plus the opaque
/// identifier later needed for deletion.
#[async_trait]
pub trait AssetStoreConnector: Send + Sync {
    /// No partial side effect is assumed on failure: callers must not
    /// persist a record referencing the asset until this has returned Ok.
    async fn upload(&self, file: AssetFile) -> Result<AssetReference, ConnectorError>;

    /// Best-effort deletion. An empty `public_id` succeeds silently so
    /// callers can pass optional references through unguarded.
    async fn destroy(&self, public_id: &str, kind: AssetKind) -> Result<(), ConnectorError>;
}

/// Client for a Cloudinary-shaped host: unsigned uploads against an
/// upload preset, deletion through the `destroy` endpoint.
pub struct AssetStoreClient {
    base_url: String,
    cloud_name: String,
    upload_preset: String,
    http_client: reqwest::Client,
}

impl AssetStoreClient {
    pub fn new(config: &AssetStoreSettings) -> Result<Self, ConnectorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| ConnectorError::UploadFailed(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cloud_name: config.cloud_name.clone(),
            upload_preset: config.upload_preset.clone(),
            http_client,
        })
    }

    fn endpoint(&self, kind: AssetKind, action: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, self.cloud_name, kind, action)
    }
}

#[async_trait]
impl AssetStoreConnector for AssetStoreClient {
    #[tracing::instrument(name = "Upload asset.", skip(self, file), fields(kind = %file.kind, size = file.bytes.len()))]
    async fn upload(&self, file: AssetFile) -> Result<AssetReference, ConnectorError> {
        let kind = file.kind;
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(file.bytes).file_name("file"))
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .http_client
            .post(self.endpoint(kind, "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| ConnectorError::UploadFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::UploadFailed(format!(
                "asset host answered {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| ConnectorError::InvalidResponse(err.to_string()))?;

        match (
            body.get("secure_url").and_then(Value::as_str),
            body.get("public_id").and_then(Value::as_str),
        ) {
            (Some(url), Some(public_id)) => Ok(AssetReference {
                url: url.to_string(),
                public_id: public_id.to_string(),
            }),
            _ => Err(ConnectorError::InvalidResponse(
                "upload response is missing secure_url or public_id".to_string(),
            )),
        }
    }

    #[tracing::instrument(name = "Destroy asset.", skip(self))]
    async fn destroy(&self, public_id: &str, kind: AssetKind) -> Result<(), ConnectorError> {
        if public_id.is_empty() {
            return Ok(());
        }

        let response = self
            .http_client
            .post(self.endpoint(kind, "destroy"))
            .form(&[
                ("public_id", public_id),
                ("upload_preset", self.upload_preset.as_str()),
            ])
            .send()
            .await
            .map_err(|err| ConnectorError::DeleteFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::DeleteFailed(format!(
                "asset host answered {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| ConnectorError::InvalidResponse(err.to_string()))?;

        match body.get("result").and_then(Value::as_str) {
            Some("ok") => Ok(()),
            Some(other) => Err(ConnectorError::DeleteFailed(format!(
                "asset host replied: {}",
                other
            ))),
            None => Err(ConnectorError::InvalidResponse(
                "destroy response is missing result".to_string(),
            )),
        }
    }
}

pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    /// Asset host double: hands out predictable references and can be
    /// switched into failure mode per operation.
    #[derive(Default)]
    pub struct MockAssetStore {
        counter: AtomicUsize,
        fail_uploads: AtomicBool,
        fail_destroys: AtomicBool,
        uploaded: Mutex<Vec<AssetReference>>,
        destroyed: Mutex<Vec<(String, AssetKind)>>,
    }

    impl MockAssetStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_uploads(&self, fail: bool) {
            self.fail_uploads.store(fail, Ordering::SeqCst);
        }

        pub fn fail_destroys(&self, fail: bool) {
            self.fail_destroys.store(fail, Ordering::SeqCst);
        }

        pub async fn uploaded(&self) -> Vec<AssetReference> {
            self.uploaded.lock().await.clone()
        }

        pub async fn destroyed(&self) -> Vec<(String, AssetKind)> {
            self.destroyed.lock().await.clone()
        }
    }

    #[async_trait]
    impl AssetStoreConnector for MockAssetStore {
        async fn upload(&self, file: AssetFile) -> Result<AssetReference, ConnectorError> {
            if self.fail_uploads.load(Ordering::SeqCst) {
                return Err(ConnectorError::UploadFailed(
                    "simulated upload failure".to_string(),
                ));
            }

            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            let reference = AssetReference {
                url: format!("https://assets.test/{}/{}", file.kind, n),
                public_id: format!("folio/{}-{}", file.kind, n),
            };
            self.uploaded.lock().await.push(reference.clone());
            Ok(reference)
        }

        async fn destroy(&self, public_id: &str, kind: AssetKind) -> Result<(), ConnectorError> {
            if public_id.is_empty() {
                return Ok(());
            }
            if self.fail_destroys.load(Ordering::SeqCst) {
                return Err(ConnectorError::DeleteFailed(
                    "simulated destroy failure".to_string(),
                ));
            }

            self.destroyed
                .lock()
                .await
                .push((public_id.to_string(), kind));
            Ok(())
        }
    }
}
