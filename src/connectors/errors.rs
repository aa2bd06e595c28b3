use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// Errors that can occur while talking to external collaborators.
#[derive(Debug)]
pub enum ConnectorError {
    /// Document store unreachable or answered with an error
    StoreUnavailable(String),
    /// Referenced record does not exist
    NotFound(String),
    /// Asset host rejected or never received an upload
    UploadFailed(String),
    /// Asset host reported a failed deletion
    DeleteFailed(String),
    /// Email relay could not accept the message
    DeliveryFailed(String),
    /// Response body did not have the expected shape
    InvalidResponse(String),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::UploadFailed(msg) => write!(f, "Upload failed: {}", msg),
            Self::DeleteFailed(msg) => write!(f, "Delete failed: {}", msg),
            Self::DeliveryFailed(msg) => write!(f, "Delivery failed: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ConnectorError {}

impl ResponseError for ConnectorError {
    fn error_response(&self) -> HttpResponse {
        let (status, message) = match self {
            Self::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "Content store unavailable"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
            Self::UploadFailed(_) => (StatusCode::BAD_GATEWAY, "Asset upload failed"),
            Self::DeleteFailed(_) => (StatusCode::BAD_GATEWAY, "Asset deletion failed"),
            Self::DeliveryFailed(_) => (StatusCode::BAD_GATEWAY, "Message delivery failed"),
            Self::InvalidResponse(_) => (StatusCode::BAD_GATEWAY, "Invalid external service response"),
        };

        HttpResponse::build(status).json(json!({
            "error": message,
            "details": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UploadFailed(_) => StatusCode::BAD_GATEWAY,
            Self::DeleteFailed(_) => StatusCode::BAD_GATEWAY,
            Self::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::StoreUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::StoreUnavailable(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::StoreUnavailable(err.to_string())
        }
    }
}
