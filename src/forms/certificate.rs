use super::AssetFileForm;
use crate::models;
use crate::models::AssetKind;
use crate::services::{AssetUploads, ContentError};
use serde::Deserialize;
use serde_json::{Map, Value};
use serde_valid::Validate;

fn decode_image(image: Option<AssetFileForm>) -> Result<Option<models::AssetFile>, ContentError> {
    match image {
        None => Ok(None),
        Some(form) if form.kind != AssetKind::Image => Err(ContentError::Validation(
            "a certificate asset must be an image".to_string(),
        )),
        Some(form) => form.decode().map(Some),
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificateForm {
    #[validate(min_length = 1)]
    pub title: String,
    #[validate(min_length = 1)]
    pub issuing_organization: String,
    #[validate(min_length = 1)]
    pub issue_date: String,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
    #[serde(default)]
    pub image: Option<AssetFileForm>,
}

impl CertificateForm {
    pub fn into_parts(self) -> Result<(models::Certificate, AssetUploads), ContentError> {
        let uploads = AssetUploads {
            primary: decode_image(self.image)?,
            secondary_video: None,
        };

        let certificate = models::Certificate {
            title: self.title,
            issuing_organization: self.issuing_organization,
            issue_date: self.issue_date,
            credential_id: self.credential_id,
            credential_url: self.credential_url,
            ..Default::default()
        };

        Ok((certificate, uploads))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePatch {
    #[validate(min_length = 1)]
    pub title: Option<String>,
    #[validate(min_length = 1)]
    pub issuing_organization: Option<String>,
    pub issue_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image: Option<AssetFileForm>,
}

impl CertificatePatch {
    pub fn into_parts(self) -> Result<(Map<String, Value>, AssetUploads), ContentError> {
        let mut patch = Map::new();
        if let Some(title) = self.title {
            patch.insert("title".into(), Value::String(title));
        }
        if let Some(issuing_organization) = self.issuing_organization {
            patch.insert(
                "issuingOrganization".into(),
                Value::String(issuing_organization),
            );
        }
        if let Some(issue_date) = self.issue_date {
            patch.insert("issueDate".into(), Value::String(issue_date));
        }
        if let Some(credential_id) = self.credential_id {
            patch.insert("credentialId".into(), Value::String(credential_id));
        }
        if let Some(credential_url) = self.credential_url {
            patch.insert("credentialUrl".into(), Value::String(credential_url));
        }

        let uploads = AssetUploads {
            primary: decode_image(self.image)?,
            secondary_video: None,
        };

        Ok((patch, uploads))
    }
}
