//! External Service Connectors
//!
//! Adapters for the collaborators the portfolio backend depends on: the
//! document store holding content records, the binary asset host, the
//! identity provider and the transactional email relay. All external
//! integrations go through connectors to keep the services independent
//! and testable.
//!
//! Pattern per connector:
//!
//! 1. Trait in `{service}.rs` -> allows mocking in tests
//! 2. HTTP client implementation in the same file
//! 3. Trait object injected into services/routes -> callers never depend
//!    on HTTP details

pub mod asset_store;
pub mod email_service;
pub mod errors;
pub mod identity_service;
pub mod record_store;

pub use asset_store::{AssetStoreClient, AssetStoreConnector};
pub use email_service::{EmailClient, EmailConnector};
pub use errors::ConnectorError;
pub use identity_service::{IdentityClient, IdentityConnector};
pub use record_store::{RecordStoreClient, RecordStoreConnector};
