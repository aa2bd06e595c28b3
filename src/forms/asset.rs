use crate::models::{AssetFile, AssetKind};
use crate::services::ContentError;
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_valid::Validate;

/// Media file as submitted by the admin panel: base64 content plus the
/// kind the asset host should file it under.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssetFileForm {
    #[validate(min_length = 1)]
    pub data: String,
    pub kind: AssetKind,
}

impl AssetFileForm {
    pub fn decode(self) -> Result<AssetFile, ContentError> {
        let bytes = general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|err| {
                ContentError::Validation(format!("media file is not valid base64: {}", err))
            })?;
        if bytes.is_empty() {
            return Err(ContentError::Validation("media file is empty".to_string()));
        }

        Ok(AssetFile {
            bytes,
            kind: self.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_content() {
        let form = AssetFileForm {
            data: general_purpose::STANDARD.encode(b"fake-png"),
            kind: AssetKind::Image,
        };
        let file = form.decode().unwrap();
        assert_eq!(file.bytes, b"fake-png");
        assert_eq!(file.kind, AssetKind::Image);
    }

    #[test]
    fn rejects_invalid_base64() {
        let form = AssetFileForm {
            data: "%%%not-base64%%%".to_string(),
            kind: AssetKind::Image,
        };
        assert!(matches!(form.decode(), Err(ContentError::Validation(_))));
    }

    #[test]
    fn rejects_empty_content() {
        let form = AssetFileForm {
            data: String::new(),
            kind: AssetKind::Video,
        };
        assert!(matches!(form.decode(), Err(ContentError::Validation(_))));
    }
}
