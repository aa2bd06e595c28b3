use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use serde_derive::Serialize;

/// Uniform response envelope. Successful operations carry an item or a
/// list; failed ones a human-readable message; partially-successful
/// deletions additionally carry warnings.
#[derive(Serialize)]
pub(crate) struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) list: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) warnings: Vec<String>,
}

pub(crate) struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    id: Option<String>,
    item: Option<T>,
    list: Option<Vec<T>>,
    warnings: Vec<String>,
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub(crate) fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            id: None,
            item: None,
            list: None,
            warnings: Vec::new(),
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub(crate) fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub(crate) fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub(crate) fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    pub(crate) fn set_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    fn envelope(self, status: &str, message: String, code: StatusCode) -> JsonResponse<T> {
        JsonResponse {
            status: status.to_string(),
            message,
            code: code.as_u16() as u32,
            id: self.id,
            item: self.item,
            list: self.list,
            warnings: self.warnings,
        }
    }

    pub(crate) fn ok(self, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Ok().json(self.envelope("OK", message.into(), StatusCode::OK))
    }

    fn error(self, code: StatusCode, message: impl Into<String>) -> Error {
        let message = message.into();
        let body = self.envelope("Error", message.clone(), code);
        InternalError::from_response(message, HttpResponse::build(code).json(body)).into()
    }

    pub(crate) fn bad_request(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn not_found(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::NOT_FOUND, message)
    }
}
