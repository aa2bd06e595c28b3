use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ContentService;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "List projects.", skip_all)]
#[get("")]
pub async fn list(service: web::Data<ContentService<models::Project>>) -> Result<impl Responder> {
    let projects = service.list_all().await?;
    Ok(JsonResponse::build().set_list(projects).ok("OK"))
}

#[tracing::instrument(name = "Get project.", skip_all)]
#[get("/{id}")]
pub async fn item(
    path: web::Path<(String,)>,
    service: web::Data<ContentService<models::Project>>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    match service.get(&id).await? {
        Some(project) => Ok(JsonResponse::build().set_item(project).ok("OK")),
        None => Err(JsonResponse::<models::Project>::build().not_found("not found")),
    }
}
