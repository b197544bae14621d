//! Typed view of the session identity the decision rules run over.
//!
//! Raw claims arrive as optional strings; everything here normalizes them into
//! closed enums so the rules never string-compare. Unknown values are kept as
//! explicit variants instead of being erased, because several rules treat
//! "present but unrecognized" differently from "absent".

use crate::services::session::SessionIdentity;

/// Roles the portal recognizes. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ADMIN" => Some(Self::Admin),
            "USER" => Some(Self::User),
            _ => None,
        }
    }
}

/// Role claim as carried by the session: either a known role, or a marker
/// that the claim was absent or unrecognized.
///
/// `Invalid` is load-bearing: an unrecognized role on a protected route forces
/// a logout rather than silently downgrading to anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleClaim {
    Known(Role),
    Invalid,
}

impl RoleClaim {
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(Role::parse).map_or(Self::Invalid, Self::Known)
    }

    pub fn known(&self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(*role),
            Self::Invalid => None,
        }
    }
}

/// Account lifecycle state. Anything the portal does not recognize (including
/// an absent claim) collapses into `Unknown`, which the rules mostly treat
/// like `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    PendingVerification,
    Unknown,
}

impl AccountStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("ACTIVE") => Self::Active,
            Some("PENDING_VERIFICATION") => Self::PendingVerification,
            _ => Self::Unknown,
        }
    }

    /// True unless the account is explicitly pending verification.
    pub fn active_or_unknown(&self) -> bool {
        !matches!(self, Self::PendingVerification)
    }
}

/// Onboarding progress for applicant accounts.
///
/// `Unknown` (claim absent) is distinct from `Incomplete`: sessions minted
/// before the onboarding flow shipped carry no flag, and those users must not
/// be bounced into onboarding retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Onboarding {
    Complete,
    Incomplete,
    Unknown,
}

impl Onboarding {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Complete,
            Some(false) => Self::Incomplete,
            None => Self::Unknown,
        }
    }
}

/// Everything the decision rules know about the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub role: RoleClaim,
    pub status: AccountStatus,
    pub onboarding: Onboarding,
}

impl Principal {
    /// Build a typed principal from a verified session identity.
    /// `None` in means `None` out: an anonymous requester has no principal.
    pub fn extract(identity: Option<&SessionIdentity>) -> Option<Self> {
        let identity = identity?;
        Some(Self {
            role: RoleClaim::parse(identity.role.as_deref()),
            status: AccountStatus::parse(identity.account_status.as_deref()),
            onboarding: Onboarding::from_flag(identity.onboarding_complete),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn identity(
        role: Option<&str>,
        status: Option<&str>,
        onboarded: Option<bool>,
    ) -> SessionIdentity {
        SessionIdentity {
            user_id: Uuid::new_v4(),
            role: role.map(str::to_string),
            account_status: status.map(str::to_string),
            onboarding_complete: onboarded,
        }
    }

    #[test]
    fn role_matching_is_exact() {
        assert_eq!(RoleClaim::parse(Some("ADMIN")), RoleClaim::Known(Role::Admin));
        assert_eq!(RoleClaim::parse(Some("USER")), RoleClaim::Known(Role::User));
        assert_eq!(RoleClaim::parse(Some("admin")), RoleClaim::Invalid);
        assert_eq!(RoleClaim::parse(Some("MANAGER")), RoleClaim::Invalid);
        assert_eq!(RoleClaim::parse(Some("")), RoleClaim::Invalid);
        assert_eq!(RoleClaim::parse(None), RoleClaim::Invalid);
    }

    #[test]
    fn account_status_folds_unrecognized_into_unknown() {
        assert_eq!(AccountStatus::parse(Some("ACTIVE")), AccountStatus::Active);
        assert_eq!(
            AccountStatus::parse(Some("PENDING_VERIFICATION")),
            AccountStatus::PendingVerification
        );
        assert_eq!(AccountStatus::parse(Some("SUSPENDED")), AccountStatus::Unknown);
        assert_eq!(AccountStatus::parse(None), AccountStatus::Unknown);
        assert!(AccountStatus::Unknown.active_or_unknown());
        assert!(!AccountStatus::PendingVerification.active_or_unknown());
    }

    #[test]
    fn onboarding_keeps_absent_distinct_from_incomplete() {
        assert_eq!(Onboarding::from_flag(Some(true)), Onboarding::Complete);
        assert_eq!(Onboarding::from_flag(Some(false)), Onboarding::Incomplete);
        assert_eq!(Onboarding::from_flag(None), Onboarding::Unknown);
    }

    #[test]
    fn extract_maps_claims_and_preserves_absence() {
        assert_eq!(Principal::extract(None), None);

        let full = identity(Some("USER"), Some("ACTIVE"), Some(false));
        let p = Principal::extract(Some(&full)).unwrap();
        assert_eq!(p.role, RoleClaim::Known(Role::User));
        assert_eq!(p.status, AccountStatus::Active);
        assert_eq!(p.onboarding, Onboarding::Incomplete);

        let bare = identity(None, None, None);
        let p = Principal::extract(Some(&bare)).unwrap();
        assert_eq!(p.role, RoleClaim::Invalid);
        assert_eq!(p.status, AccountStatus::Unknown);
        assert_eq!(p.onboarding, Onboarding::Unknown);
    }
}
