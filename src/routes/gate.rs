use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{evaluate, AdminPolicy, GateDecision, SettingsService};
use actix_web::{
    get,
    web::{Data, ReqData},
    Responder, Result,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateStatus {
    #[serde(flatten)]
    pub decision: GateDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_end_time: Option<DateTime<Utc>>,
}

/// Visibility decision for the current visitor, recomputed per request
/// from the stored settings and the identity the middleware resolved.
#[tracing::instrument(name = "Evaluate access gate.", skip_all)]
#[get("")]
pub async fn status(
    user: Option<ReqData<Arc<models::VerifiedUser>>>,
    settings: Data<SettingsService>,
    policy: Data<AdminPolicy>,
) -> Result<impl Responder> {
    let site = settings.get().await?;
    let user = user.map(ReqData::into_inner);
    let identity = user.as_deref().map(|user| user.email.as_str());

    let decision = evaluate(&site, identity, policy.get_ref());
    let status = GateStatus {
        decision,
        maintenance_end_time: site.maintenance_end_time,
    };
    Ok(JsonResponse::build().set_item(status).ok("OK"))
}
