use super::errors::ConnectorError;
use crate::configuration::IdentitySettings;
use crate::models::VerifiedUser;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;

/// Exchanges a bearer token for the identity provider's verdict. The
/// sign-in flow lives entirely on the provider's side; a rejected token
/// reads as an anonymous visitor, not as an error.
#[async_trait]
pub trait IdentityConnector: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Option<VerifiedUser>, ConnectorError>;
}

pub struct IdentityClient {
    auth_url: String,
    http_client: reqwest::Client,
}

impl IdentityClient {
    pub fn new(config: &IdentitySettings) -> Result<Self, ConnectorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| {
                ConnectorError::StoreUnavailable(format!("HTTP client error: {}", err))
            })?;

        Ok(Self {
            auth_url: config.auth_url.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl IdentityConnector for IdentityClient {
    #[tracing::instrument(name = "Verify identity token.", skip(self, token))]
    async fn verify(&self, token: &str) -> Result<Option<VerifiedUser>, ConnectorError> {
        let response = self
            .http_client
            .get(&self.auth_url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| {
                ConnectorError::StoreUnavailable(format!("identity provider: {}", err))
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => response
                .json::<VerifiedUser>()
                .await
                .map(Some)
                .map_err(|err| ConnectorError::InvalidResponse(err.to_string())),
            status => Err(ConnectorError::StoreUnavailable(format!(
                "identity provider answered {}",
                status
            ))),
        }
    }
}
