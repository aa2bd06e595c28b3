pub mod content;
pub mod gate;
pub mod settings;

pub use content::{
    AssetSlot, AssetUploads, ContentEntity, ContentError, ContentService, DeleteOutcome,
};
pub use gate::{evaluate, AdminPolicy, GateDecision, GateState};
pub use settings::SettingsService;
