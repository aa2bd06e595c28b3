use super::AssetFileForm;
use crate::models;
use crate::models::AssetKind;
use crate::services::{AssetUploads, ContentError};
use serde::Deserialize;
use serde_json::{Map, Value};
use serde_valid::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    #[validate(min_length = 1)]
    pub title: String,
    #[validate(min_length = 1)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub media: Option<AssetFileForm>,
    #[serde(default)]
    pub video: Option<AssetFileForm>,
}

fn decode_video(video: Option<AssetFileForm>) -> Result<Option<models::AssetFile>, ContentError> {
    match video {
        None => Ok(None),
        Some(form) if form.kind != AssetKind::Video => Err(ContentError::Validation(
            "secondary media must be a video".to_string(),
        )),
        Some(form) => form.decode().map(Some),
    }
}

impl ProjectForm {
    pub fn into_parts(self) -> Result<(models::Project, AssetUploads), ContentError> {
        let uploads = AssetUploads {
            primary: self.media.map(AssetFileForm::decode).transpose()?,
            secondary_video: decode_video(self.video)?,
        };

        let project = models::Project {
            title: self.title,
            description: self.description,
            technologies: self.technologies,
            live_url: self.live_url,
            github_url: self.github_url,
            featured: self.featured,
            ..Default::default()
        };

        Ok((project, uploads))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[validate(min_length = 1)]
    pub title: Option<String>,
    #[validate(min_length = 1)]
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: Option<bool>,
    pub media: Option<AssetFileForm>,
    pub video: Option<AssetFileForm>,
}

impl ProjectPatch {
    pub fn into_parts(self) -> Result<(Map<String, Value>, AssetUploads), ContentError> {
        let mut patch = Map::new();
        if let Some(title) = self.title {
            patch.insert("title".into(), Value::String(title));
        }
        if let Some(description) = self.description {
            patch.insert("description".into(), Value::String(description));
        }
        if let Some(technologies) = self.technologies {
            patch.insert(
                "technologies".into(),
                Value::Array(technologies.into_iter().map(Value::String).collect()),
            );
        }
        if let Some(live_url) = self.live_url {
            patch.insert("liveUrl".into(), Value::String(live_url));
        }
        if let Some(github_url) = self.github_url {
            patch.insert("githubUrl".into(), Value::String(github_url));
        }
        if let Some(featured) = self.featured {
            patch.insert("featured".into(), Value::Bool(featured));
        }

        let uploads = AssetUploads {
            primary: self.media.map(AssetFileForm::decode).transpose()?,
            secondary_video: decode_video(self.video)?,
        };

        Ok((patch, uploads))
    }
}
