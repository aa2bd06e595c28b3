use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ContentService;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "List certificates.", skip_all)]
#[get("")]
pub async fn list(
    service: web::Data<ContentService<models::Certificate>>,
) -> Result<impl Responder> {
    let certificates = service.list_all().await?;
    Ok(JsonResponse::build().set_list(certificates).ok("OK"))
}

#[tracing::instrument(name = "Get certificate.", skip_all)]
#[get("/{id}")]
pub async fn item(
    path: web::Path<(String,)>,
    service: web::Data<ContentService<models::Certificate>>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    match service.get(&id).await? {
        Some(certificate) => Ok(JsonResponse::build().set_item(certificate).ok("OK")),
        None => Err(JsonResponse::<models::Certificate>::build().not_found("not found")),
    }
}
