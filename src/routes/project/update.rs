use crate::forms;
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::routes::require_admin;
use crate::services::{AdminPolicy, ContentService};
use actix_web::{
    put, web,
    web::{Bytes, Data, ReqData},
    Responder, Result,
};
use std::sync::Arc;

#[tracing::instrument(name = "Update project.", skip_all)]
#[put("/{id}")]
pub async fn item(
    path: web::Path<(String,)>,
    body: Bytes,
    user: Option<ReqData<Arc<models::VerifiedUser>>>,
    policy: Data<AdminPolicy>,
    service: Data<ContentService<models::Project>>,
) -> Result<impl Responder> {
    let user = user.map(ReqData::into_inner);
    require_admin(user.as_deref(), policy.get_ref())?;

    let (id,) = path.into_inner();
    let form: forms::project::ProjectPatch = body_into_form(&body)?;
    let (patch, uploads) = form.into_parts()?;

    service.update(&id, patch, uploads).await?;
    Ok(JsonResponse::<models::Project>::build().set_id(id).ok("Updated"))
}
