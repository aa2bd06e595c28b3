mod asset;
mod certificate;
mod project;
mod settings;
mod user;

pub use asset::*;
pub use certificate::*;
pub use project::*;
pub use settings::*;
pub use user::*;
