use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::require_admin;
use crate::services::{AdminPolicy, ContentEntity, ContentService};
use actix_web::{
    delete, web,
    web::{Data, ReqData},
    Responder, Result,
};
use std::sync::Arc;

#[tracing::instrument(name = "Delete project.", skip_all)]
#[delete("/{id}")]
pub async fn item(
    path: web::Path<(String,)>,
    user: Option<ReqData<Arc<models::VerifiedUser>>>,
    policy: Data<AdminPolicy>,
    service: Data<ContentService<models::Project>>,
) -> Result<impl Responder> {
    let user = user.map(ReqData::into_inner);
    require_admin(user.as_deref(), policy.get_ref())?;

    let (id,) = path.into_inner();
    let project = match service.get(&id).await? {
        Some(project) => project,
        None => return Err(JsonResponse::<models::Project>::build().not_found("not found")),
    };

    let outcome = service.delete(&id, project.asset_references()).await?;
    let warnings = outcome
        .asset_failures
        .iter()
        .map(|failure| {
            format!(
                "asset {} could not be deleted: {}",
                failure.public_id, failure.reason
            )
        })
        .collect();

    Ok(JsonResponse::<models::Project>::build()
        .set_id(id)
        .set_warnings(warnings)
        .ok("Deleted"))
}
