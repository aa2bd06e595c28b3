use crate::connectors::EmailConnector;
use crate::forms;
use crate::helpers::{body_into_form, JsonResponse};
use actix_web::{
    post,
    web::{Bytes, Data},
    Responder, Result,
};
use std::sync::Arc;

#[tracing::instrument(name = "Relay contact form.", skip_all)]
#[post("")]
pub async fn send(
    body: Bytes,
    email: Data<Arc<dyn EmailConnector>>,
) -> Result<impl Responder> {
    let form: forms::ContactForm = body_into_form(&body)?;
    email.send(&form).await?;
    Ok(JsonResponse::<()>::build().ok("Message sent"))
}
