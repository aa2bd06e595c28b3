use serde::{Deserialize, Serialize};
use std::fmt;

/// Media kind as understood by the asset host. It is part of both the
/// upload and the destroy URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Video => "video",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (durable URL, opaque host identifier) pair pointing at binary media
/// owned by a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssetReference {
    pub url: String,
    pub public_id: String,
}

/// Raw media bytes waiting to be uploaded.
#[derive(Clone)]
pub struct AssetFile {
    pub bytes: Vec<u8>,
    pub kind: AssetKind,
}

impl fmt::Debug for AssetFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetFile")
            .field("bytes", &self.bytes.len())
            .field("kind", &self.kind)
            .finish()
    }
}
