use crate::helpers::JsonResponse;
use crate::services::SettingsService;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "Get site settings.", skip_all)]
#[get("")]
pub async fn item(service: web::Data<SettingsService>) -> Result<impl Responder> {
    let settings = service.get().await?;
    Ok(JsonResponse::build().set_item(settings).ok("OK"))
}
