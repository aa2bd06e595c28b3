use crate::models::SiteSettings;
use serde::Serialize;

/// Shown to visitors who hold a verified identity that is not the
/// administrative one while maintenance is on.
pub const NOT_ADMIN_MESSAGE: &str =
    "You are not an admin. Only administrators can access the site during maintenance.";

/// Authorization policy for the maintenance override. The comparison
/// target is configuration, not a literal in gate logic.
#[derive(Debug, Clone)]
pub struct AdminPolicy {
    admin_identity: String,
}

impl AdminPolicy {
    pub fn new(admin_identity: impl Into<String>) -> Self {
        Self {
            admin_identity: admin_identity.into(),
        }
    }

    /// Exact, case-sensitive equality on the verified identity string.
    pub fn is_admin(&self, identity: &str) -> bool {
        self.admin_identity == identity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Open,
    MaintenanceBlocked,
    MaintenanceAdminOverride,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub state: GateState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pure visibility decision, recomputed on every settings load and
/// identity change. No transition history is kept anywhere.
pub fn evaluate(
    settings: &SiteSettings,
    identity: Option<&str>,
    policy: &AdminPolicy,
) -> GateDecision {
    if !settings.maintenance_mode {
        return GateDecision {
            state: GateState::Open,
            message: None,
        };
    }

    match identity {
        Some(identity) if policy.is_admin(identity) => GateDecision {
            state: GateState::MaintenanceAdminOverride,
            message: None,
        },
        // verified but not the admin: blocked with the distinct notice
        Some(_) => GateDecision {
            state: GateState::MaintenanceBlocked,
            message: Some(NOT_ADMIN_MESSAGE.to_string()),
        },
        // anonymous: blocked with the configured maintenance message
        None => GateDecision {
            state: GateState::MaintenanceBlocked,
            message: Some(settings.maintenance_message.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(maintenance_mode: bool) -> SiteSettings {
        SiteSettings {
            maintenance_mode,
            maintenance_message: "Back soon.".to_string(),
            maintenance_end_time: None,
        }
    }

    fn policy() -> AdminPolicy {
        AdminPolicy::new("admin@example.com")
    }

    #[test]
    fn open_regardless_of_identity_when_maintenance_is_off() {
        for identity in [None, Some("admin@example.com"), Some("eve@example.com")] {
            let decision = evaluate(&settings(false), identity, &policy());
            assert_eq!(decision.state, GateState::Open);
            assert_eq!(decision.message, None);
        }
    }

    #[test]
    fn admin_identity_overrides_maintenance() {
        let decision = evaluate(&settings(true), Some("admin@example.com"), &policy());
        assert_eq!(decision.state, GateState::MaintenanceAdminOverride);
        assert_eq!(decision.message, None);
    }

    #[test]
    fn verified_non_admin_is_blocked_with_the_distinct_notice() {
        let decision = evaluate(&settings(true), Some("eve@example.com"), &policy());
        assert_eq!(decision.state, GateState::MaintenanceBlocked);
        assert_eq!(decision.message.as_deref(), Some(NOT_ADMIN_MESSAGE));
    }

    #[test]
    fn anonymous_visitor_sees_the_configured_message() {
        let decision = evaluate(&settings(true), None, &policy());
        assert_eq!(decision.state, GateState::MaintenanceBlocked);
        assert_eq!(decision.message.as_deref(), Some("Back soon."));
    }

    #[test]
    fn identity_comparison_is_case_sensitive() {
        let decision = evaluate(&settings(true), Some("Admin@Example.com"), &policy());
        assert_eq!(decision.state, GateState::MaintenanceBlocked);
    }
}
