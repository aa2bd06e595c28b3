use crate::forms;
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::routes::require_admin;
use crate::services::{AdminPolicy, SettingsService};
use actix_web::{
    put,
    web::{Bytes, Data, ReqData},
    Responder, Result,
};
use std::sync::Arc;

#[tracing::instrument(name = "Update site settings.", skip_all)]
#[put("")]
pub async fn item(
    body: Bytes,
    user: Option<ReqData<Arc<models::VerifiedUser>>>,
    policy: Data<AdminPolicy>,
    service: Data<SettingsService>,
) -> Result<impl Responder> {
    let user = user.map(ReqData::into_inner);
    require_admin(user.as_deref(), policy.get_ref())?;

    let form: forms::SettingsForm = body_into_form(&body)?;
    service.update(form.into_partial()).await?;
    Ok(JsonResponse::<()>::build().ok("Saved"))
}
