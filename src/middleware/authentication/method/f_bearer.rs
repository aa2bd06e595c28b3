use crate::connectors::IdentityConnector;
use crate::middleware::authentication::get_header;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use std::sync::Arc;

fn try_extract_token(authentication: String) -> Result<String, String> {
    let mut authentication_parts = authentication.splitn(2, ' ');
    match authentication_parts.next() {
        Some("Bearer") => {}
        _ => return Err("Bearer scheme missing".to_string()),
    }
    match authentication_parts.next() {
        Some(token) if !token.is_empty() => Ok(token.into()),
        _ => {
            tracing::error!("Bearer token is missing");
            Err("Authentication required".to_string())
        }
    }
}

#[tracing::instrument(name = "Authenticate with bearer token", skip(req))]
pub async fn try_bearer(req: &mut ServiceRequest) -> Result<bool, String> {
    let authentication = match get_header::<String>(req, "authorization")? {
        Some(value) => value,
        None => return Ok(false),
    };

    let token = try_extract_token(authentication)?;
    let identity = req
        .app_data::<web::Data<Arc<dyn IdentityConnector>>>()
        .ok_or_else(|| "identity connector is not configured".to_string())?
        .clone();

    match identity.verify(&token).await {
        Ok(Some(user)) => {
            tracing::debug!(identity = %user.email, "verified identity attached");
            if req.extensions_mut().insert(Arc::new(user)).is_some() {
                return Err("identity already resolved".to_string());
            }
            Ok(true)
        }
        // a rejected token is an anonymous visitor, not a failure
        Ok(None) => Ok(false),
        Err(err) => Err(format!("{}", err)),
    }
}
