mod asset;
pub mod certificate;
mod contact;
pub mod project;
mod settings;

pub use asset::*;
pub use contact::*;
pub use settings::*;
