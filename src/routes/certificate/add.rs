use crate::forms;
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::routes::require_admin;
use crate::services::{AdminPolicy, ContentService};
use actix_web::{
    post,
    web::{Bytes, Data, ReqData},
    Responder, Result,
};
use std::sync::Arc;

#[tracing::instrument(name = "Add certificate.", skip_all)]
#[post("")]
pub async fn item(
    body: Bytes,
    user: Option<ReqData<Arc<models::VerifiedUser>>>,
    policy: Data<AdminPolicy>,
    service: Data<ContentService<models::Certificate>>,
) -> Result<impl Responder> {
    let user = user.map(ReqData::into_inner);
    require_admin(user.as_deref(), policy.get_ref())?;

    let form: forms::certificate::CertificateForm = body_into_form(&body)?;
    let (certificate, uploads) = form.into_parts()?;

    let id = service.create(certificate, uploads).await?;
    Ok(JsonResponse::<models::Certificate>::build()
        .set_id(id)
        .ok("Created"))
}
