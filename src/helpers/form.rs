use crate::helpers::JsonResponse;
use actix_web::web::Bytes;
use actix_web::Error;
use serde::de::DeserializeOwned;
use serde_valid::Validate;
use std::str;

/// Deserializes and validates a request body, reporting the JSON path of
/// whatever field failed.
pub(crate) fn body_into_form<T>(body: &Bytes) -> Result<T, Error>
where
    T: DeserializeOwned + Validate,
{
    let body_str = str::from_utf8(body)
        .map_err(|err| JsonResponse::<()>::build().bad_request(err.to_string()))?;
    let deserializer = &mut serde_json::Deserializer::from_str(body_str);
    let form: T = serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let msg = format!("{}: {}", err.path(), err);
        JsonResponse::<()>::build().bad_request(msg)
    })?;

    if let Err(errors) = form.validate() {
        let msg = format!("Invalid data received: {}", errors);
        tracing::debug!(msg);
        return Err(JsonResponse::<()>::build().bad_request(msg));
    }

    Ok(form)
}
