pub(crate) mod certificate;
pub(crate) mod contact;
pub(crate) mod gate;
pub mod health_checks;
pub(crate) mod project;
pub(crate) mod settings;

pub use health_checks::*;

use crate::helpers::JsonResponse;
use crate::models;
use crate::services::AdminPolicy;

/// Content mutation and settings routes are reserved for the single
/// administrative identity.
pub(crate) fn require_admin(
    user: Option<&models::VerifiedUser>,
    policy: &AdminPolicy,
) -> Result<(), actix_web::Error> {
    match user {
        Some(user) if policy.is_admin(&user.email) => Ok(()),
        Some(_) => Err(JsonResponse::<()>::build()
            .forbidden("Access denied. You are not an admin.")),
        None => Err(JsonResponse::<()>::build().unauthorized("Authentication required")),
    }
}
