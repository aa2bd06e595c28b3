use crate::connectors::{AssetStoreConnector, ConnectorError, RecordStoreConnector};
use crate::models::{AssetFile, AssetKind, AssetReference};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Caller-correctable input problem, nothing was written anywhere.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl actix_web::error::ResponseError for ContentError {
    fn error_response(&self) -> actix_web::HttpResponse {
        match self {
            ContentError::Validation(msg) => actix_web::HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Validation error", "details": msg })),
            ContentError::Connector(err) => err.error_response(),
        }
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ContentError::Validation(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ContentError::Connector(err) => err.status_code(),
        }
    }
}

/// Where an uploaded file lands on the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSlot {
    /// Mandatory on every entity kind, image or video.
    Primary,
    /// Optional walkthrough video, projects only.
    SecondaryVideo,
}

/// Replacement or initial media accompanying a create/update call.
#[derive(Debug, Default)]
pub struct AssetUploads {
    pub primary: Option<AssetFile>,
    pub secondary_video: Option<AssetFile>,
}

impl AssetUploads {
    pub fn none() -> Self {
        Self::default()
    }
}

/// One entity kind's contract with the generic lifecycle: its namespace
/// in the record store, which asset slots it supports and how references
/// are woven into its fields.
pub trait ContentEntity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const NAMESPACE: &'static str;
    const LABEL: &'static str;

    fn set_id(&mut self, id: &str);
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn supports_slot(slot: AssetSlot) -> bool;
    fn attach(&mut self, slot: AssetSlot, reference: AssetReference);
    /// Writes a replacement reference into a partial-update document.
    fn patch_asset(patch: &mut Map<String, Value>, slot: AssetSlot, reference: &AssetReference);
    /// Every asset this record points at, with the kind to use for
    /// deletion at the host.
    fn asset_references(&self) -> Vec<(AssetReference, AssetKind)>;
}

/// One failed cleanup step of an entity deletion. The record itself is
/// already gone when these are produced.
#[derive(Debug, Clone, Serialize)]
pub struct AssetCleanupFailure {
    pub public_id: String,
    pub kind: AssetKind,
    pub reason: String,
}

/// Aggregate outcome of the delete saga: the record deletion succeeded,
/// each asset deletion was attempted independently.
#[derive(Debug, Default)]
pub struct DeleteOutcome {
    pub asset_failures: Vec<AssetCleanupFailure>,
}

/// Entity-level lifecycle over the two stores. Owns the consistency
/// policy: assets are uploaded before the record that references them is
/// written, and on deletion the record goes first so the public site can
/// never see a dangling reference. Stale assets are a storage cost;
/// dangling references are user-visible.
pub struct ContentService<E> {
    records: Arc<dyn RecordStoreConnector>,
    assets: Arc<dyn AssetStoreConnector>,
    _entity: PhantomData<E>,
}

impl<E: ContentEntity> ContentService<E> {
    pub fn new(
        records: Arc<dyn RecordStoreConnector>,
        assets: Arc<dyn AssetStoreConnector>,
    ) -> Self {
        Self {
            records,
            assets,
            _entity: PhantomData,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<E>, ContentError> {
        let rows = self.records.list_all(E::NAMESPACE).await?;
        rows.into_iter()
            .map(|(id, value)| {
                serde_json::from_value::<E>(value)
                    .map(|mut entity| {
                        entity.set_id(&id);
                        entity
                    })
                    .map_err(|err| {
                        ConnectorError::InvalidResponse(format!(
                            "malformed {} record {}: {}",
                            E::LABEL,
                            id,
                            err
                        ))
                        .into()
                    })
            })
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<E>, ContentError> {
        match self.records.get(E::NAMESPACE, id).await? {
            None => Ok(None),
            Some(value) => serde_json::from_value::<E>(value)
                .map(|mut entity| {
                    entity.set_id(id);
                    Some(entity)
                })
                .map_err(|err| {
                    ConnectorError::InvalidResponse(format!(
                        "malformed {} record {}: {}",
                        E::LABEL,
                        id,
                        err
                    ))
                    .into()
                }),
        }
    }

    /// Uploads first, writes the record only once every upload has
    /// succeeded. A record-store failure after a successful upload leaves
    /// the asset orphaned on the host; that window is accepted and the
    /// reference is logged so orphans can be reaped out of band.
    #[tracing::instrument(name = "Create content record.", skip(self, entity, uploads), fields(kind = E::LABEL))]
    pub async fn create(&self, mut entity: E, uploads: AssetUploads) -> Result<String, ContentError> {
        let primary = uploads.primary.ok_or_else(|| {
            ContentError::Validation(format!("a media file is required to create a {}", E::LABEL))
        })?;
        if uploads.secondary_video.is_some() && !E::supports_slot(AssetSlot::SecondaryVideo) {
            return Err(ContentError::Validation(format!(
                "a {} cannot carry a secondary video",
                E::LABEL
            )));
        }

        let reference = self.assets.upload(primary).await?;
        tracing::info!(public_id = %reference.public_id, "primary asset uploaded");
        entity.attach(AssetSlot::Primary, reference);

        if let Some(video) = uploads.secondary_video {
            let reference = self.assets.upload(video).await?;
            tracing::info!(public_id = %reference.public_id, "secondary video uploaded");
            entity.attach(AssetSlot::SecondaryVideo, reference);
        }

        entity.set_created_at(Utc::now());
        let fields = serde_json::to_value(&entity)
            .map_err(|err| ContentError::Validation(err.to_string()))?;
        let id = self.records.create(E::NAMESPACE, fields).await?;
        tracing::info!(%id, "record created");
        Ok(id)
    }

    /// Merges `patch` into an existing record. Replacement media is
    /// uploaded first and its reference overwrites the old one in the
    /// patch; the superseded asset stays on the host (see DESIGN.md).
    #[tracing::instrument(name = "Update content record.", skip(self, patch, uploads), fields(kind = E::LABEL))]
    pub async fn update(
        &self,
        id: &str,
        mut patch: Map<String, Value>,
        uploads: AssetUploads,
    ) -> Result<(), ContentError> {
        if self.records.get(E::NAMESPACE, id).await?.is_none() {
            return Err(ConnectorError::NotFound(format!(
                "{} {} does not exist",
                E::LABEL,
                id
            ))
            .into());
        }
        if uploads.secondary_video.is_some() && !E::supports_slot(AssetSlot::SecondaryVideo) {
            return Err(ContentError::Validation(format!(
                "a {} cannot carry a secondary video",
                E::LABEL
            )));
        }

        // the store key and the creation stamp are immutable
        patch.remove("id");
        patch.remove("createdAt");

        if let Some(file) = uploads.primary {
            let reference = self.assets.upload(file).await?;
            tracing::info!(public_id = %reference.public_id, "replacement asset uploaded");
            E::patch_asset(&mut patch, AssetSlot::Primary, &reference);
        }
        if let Some(file) = uploads.secondary_video {
            let reference = self.assets.upload(file).await?;
            tracing::info!(public_id = %reference.public_id, "replacement video uploaded");
            E::patch_asset(&mut patch, AssetSlot::SecondaryVideo, &reference);
        }

        if patch.is_empty() {
            return Ok(());
        }
        self.records
            .update(E::NAMESPACE, id, Value::Object(patch))
            .await?;
        Ok(())
    }

    /// Deletes the record, then attempts every asset deletion
    /// independently. Cleanup failures are collected and reported, never
    /// fatal: once the record write went through, the entity is gone.
    #[tracing::instrument(name = "Delete content record.", skip(self, references), fields(kind = E::LABEL))]
    pub async fn delete(
        &self,
        id: &str,
        references: Vec<(AssetReference, AssetKind)>,
    ) -> Result<DeleteOutcome, ContentError> {
        self.records.delete(E::NAMESPACE, id).await?;
        tracing::info!(%id, "record deleted");

        let mut outcome = DeleteOutcome::default();
        for (reference, kind) in references {
            if let Err(err) = self.assets.destroy(&reference.public_id, kind).await {
                tracing::warn!(
                    public_id = %reference.public_id,
                    error = %err,
                    "asset cleanup failed, asset is now orphaned"
                );
                outcome.asset_failures.push(AssetCleanupFailure {
                    public_id: reference.public_id,
                    kind,
                    reason: err.to_string(),
                });
            }
        }
        Ok(outcome)
    }
}

impl ContentEntity for crate::models::Project {
    const NAMESPACE: &'static str = "projects";
    const LABEL: &'static str = "project";

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn supports_slot(_slot: AssetSlot) -> bool {
        true
    }

    fn attach(&mut self, slot: AssetSlot, reference: AssetReference) {
        match slot {
            AssetSlot::Primary => {
                self.image_url = reference.url;
                self.image_public_id = reference.public_id;
            }
            AssetSlot::SecondaryVideo => {
                self.video_url = Some(reference.url);
                self.video_public_id = Some(reference.public_id);
            }
        }
    }

    fn patch_asset(patch: &mut Map<String, Value>, slot: AssetSlot, reference: &AssetReference) {
        match slot {
            AssetSlot::Primary => {
                patch.insert("imageUrl".into(), Value::String(reference.url.clone()));
                patch.insert(
                    "imagePublicId".into(),
                    Value::String(reference.public_id.clone()),
                );
            }
            AssetSlot::SecondaryVideo => {
                patch.insert("videoUrl".into(), Value::String(reference.url.clone()));
                patch.insert(
                    "videoPublicId".into(),
                    Value::String(reference.public_id.clone()),
                );
            }
        }
    }

    fn asset_references(&self) -> Vec<(AssetReference, AssetKind)> {
        let mut references = vec![(
            AssetReference {
                url: self.image_url.clone(),
                public_id: self.image_public_id.clone(),
            },
            AssetKind::Image,
        )];
        if let (Some(url), Some(public_id)) = (&self.video_url, &self.video_public_id) {
            references.push((
                AssetReference {
                    url: url.clone(),
                    public_id: public_id.clone(),
                },
                AssetKind::Video,
            ));
        }
        references
    }
}

impl ContentEntity for crate::models::Certificate {
    const NAMESPACE: &'static str = "certificates";
    const LABEL: &'static str = "certificate";

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn supports_slot(slot: AssetSlot) -> bool {
        matches!(slot, AssetSlot::Primary)
    }

    fn attach(&mut self, slot: AssetSlot, reference: AssetReference) {
        if let AssetSlot::Primary = slot {
            self.image_url = reference.url;
            self.image_public_id = reference.public_id;
        }
    }

    fn patch_asset(patch: &mut Map<String, Value>, slot: AssetSlot, reference: &AssetReference) {
        if let AssetSlot::Primary = slot {
            patch.insert("imageUrl".into(), Value::String(reference.url.clone()));
            patch.insert(
                "imagePublicId".into(),
                Value::String(reference.public_id.clone()),
            );
        }
    }

    fn asset_references(&self) -> Vec<(AssetReference, AssetKind)> {
        vec![(
            AssetReference {
                url: self.image_url.clone(),
                public_id: self.image_public_id.clone(),
            },
            AssetKind::Image,
        )]
    }
}
