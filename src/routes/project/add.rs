use crate::forms;
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::routes::require_admin;
use crate::services::{AdminPolicy, ContentService};
use actix_web::{
    post, web,
    web::{Bytes, Data, ReqData},
    Responder, Result,
};
use std::sync::Arc;

#[tracing::instrument(name = "Add project.", skip_all)]
#[post("")]
pub async fn item(
    body: Bytes,
    user: Option<ReqData<Arc<models::VerifiedUser>>>,
    policy: Data<AdminPolicy>,
    service: Data<ContentService<models::Project>>,
) -> Result<impl Responder> {
    let user = user.map(ReqData::into_inner);
    require_admin(user.as_deref(), policy.get_ref())?;

    let form: forms::project::ProjectForm = body_into_form(&body)?;
    let (project, uploads) = form.into_parts()?;

    let id = service.create(project, uploads).await?;
    Ok(JsonResponse::<models::Project>::build().set_id(id).ok("Created"))
}
