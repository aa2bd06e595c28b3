use super::errors::ConnectorError;
use crate::configuration::EmailSettings;
use crate::forms::ContactForm;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Transactional relay behind the contact form.
#[async_trait]
pub trait EmailConnector: Send + Sync {
    async fn send(&self, message: &ContactForm) -> Result<(), ConnectorError>;
}

/// Client for an EmailJS-shaped relay: one endpoint, service/template
/// routing and the message itself as template params.
pub struct EmailClient {
    base_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
    http_client: reqwest::Client,
}

impl EmailClient {
    pub fn new(config: &EmailSettings) -> Result<Self, ConnectorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| {
                ConnectorError::DeliveryFailed(format!("HTTP client error: {}", err))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl EmailConnector for EmailClient {
    #[tracing::instrument(name = "Relay contact message.", skip(self, message), fields(sender = %message.email))]
    async fn send(&self, message: &ContactForm) -> Result<(), ConnectorError> {
        let payload = json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.public_key,
            "template_params": {
                "from_name": message.name,
                "reply_to": message.email,
                "message": message.message,
            }
        });

        let response = self
            .http_client
            .post(format!("{}/api/v1.0/email/send", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|err| ConnectorError::DeliveryFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::DeliveryFailed(format!(
                "relay answered {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
