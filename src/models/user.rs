use serde::Deserialize;

/// Output of the identity provider: a verified identity string. The
/// sign-in flow itself happens elsewhere; we only ever consume its result.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedUser {
    pub email: String,
}
