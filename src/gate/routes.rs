//! Route classification: URL path -> RouteCategory.
//!
//! Classification is table-driven so tests (and future tenants) can substitute
//! an alternate `RouteTable` instead of patching a global. The default table
//! mirrors the portal's deployed URL structure and must not drift from it.

use crate::gate::principal::Role;

/// Closed set of route categories the gate decides over.
///
/// Precedence lives in `RouteTable::classify`, not here; the enum itself is
/// order-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCategory {
    Admin,
    Onboarding,
    User,
    Verification,
    Auth,
    Public,
}

impl RouteCategory {
    /// Categories an anonymous requester may not enter.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Admin | Self::User | Self::Onboarding | Self::Verification
        )
    }
}

/// Immutable route configuration: which paths belong to which category, and
/// the destinations the decision rules redirect to.
///
/// Matching is intentionally asymmetric:
/// - `admin_root` / `user_root` are segment-rooted (`/admin` or `/admin/...`,
///   but not `/administration`)
/// - the prefix lists are raw `starts_with` matches (`/onboarding` also covers
///   `/onboarding-step-2`)
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub admin_root: String,
    pub user_root: String,
    pub onboarding_prefixes: Vec<String>,
    pub verification_prefixes: Vec<String>,
    pub auth_prefixes: Vec<String>,
    pub public_paths: Vec<String>,

    pub sign_in_path: String,
    pub onboarding_path: String,
    pub verification_path: String,
    pub admin_home: String,
    pub user_home: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            admin_root: "/admin".to_string(),
            user_root: "/app".to_string(),
            onboarding_prefixes: vec!["/onboarding".to_string()],
            verification_prefixes: vec!["/welcome-and-verify".to_string()],
            auth_prefixes: vec![
                "/sign-in".to_string(),
                "/sign-up".to_string(),
                "/reset-password".to_string(),
            ],
            public_paths: vec![
                "/".to_string(),
                "/about".to_string(),
                "/contact".to_string(),
                "/pricing".to_string(),
            ],
            sign_in_path: "/sign-in".to_string(),
            onboarding_path: "/onboarding".to_string(),
            verification_path: "/welcome-and-verify".to_string(),
            admin_home: "/admin".to_string(),
            user_home: "/app/form".to_string(),
        }
    }
}

impl RouteTable {
    /// Classify a path (no query string) into exactly one category.
    ///
    /// Rules are evaluated top to bottom, first match wins. Total: unmatched
    /// paths are public, not denied; whether they exist is the router's
    /// problem, not the gate's.
    pub fn classify(&self, path: &str) -> RouteCategory {
        if under_root(path, &self.admin_root) {
            return RouteCategory::Admin;
        }
        if has_any_prefix(path, &self.onboarding_prefixes) {
            return RouteCategory::Onboarding;
        }
        if under_root(path, &self.user_root) {
            return RouteCategory::User;
        }
        if has_any_prefix(path, &self.verification_prefixes) {
            return RouteCategory::Verification;
        }
        if has_any_prefix(path, &self.auth_prefixes) {
            return RouteCategory::Auth;
        }
        // NOTE: the exact public list and the fall-through agree today; the
        // list stays so the table names the marketing pages explicitly.
        if self.public_paths.iter().any(|p| p == path) {
            return RouteCategory::Public;
        }

        RouteCategory::Public
    }

    /// Landing page for a signed-in role.
    pub fn role_home(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin_home,
            Role::User => &self.user_home,
        }
    }
}

// `/admin` or `/admin/...`; rejects `/administration`.
fn under_root(path: &str, root: &str) -> bool {
    match path.strip_prefix(root) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

fn has_any_prefix(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| path.starts_with(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::default()
    }

    #[test]
    fn admin_root_is_segment_scoped() {
        assert_eq!(table().classify("/admin"), RouteCategory::Admin);
        assert_eq!(table().classify("/admin/applicants"), RouteCategory::Admin);
        // Not a segment under /admin -> falls to the public default.
        assert_eq!(table().classify("/administration"), RouteCategory::Public);
    }

    #[test]
    fn user_root_is_segment_scoped() {
        assert_eq!(table().classify("/app"), RouteCategory::User);
        assert_eq!(table().classify("/app/form"), RouteCategory::User);
        assert_eq!(table().classify("/application"), RouteCategory::Public);
    }

    #[test]
    fn onboarding_matches_raw_prefix() {
        assert_eq!(table().classify("/onboarding"), RouteCategory::Onboarding);
        assert_eq!(
            table().classify("/onboarding/step-2"),
            RouteCategory::Onboarding
        );
        // Raw prefix, deliberately: hyphenated variants stay in the flow.
        assert_eq!(
            table().classify("/onboarding-welcome"),
            RouteCategory::Onboarding
        );
    }

    #[test]
    fn verification_and_auth_prefixes() {
        assert_eq!(
            table().classify("/welcome-and-verify"),
            RouteCategory::Verification
        );
        assert_eq!(table().classify("/sign-in"), RouteCategory::Auth);
        assert_eq!(table().classify("/sign-up/step"), RouteCategory::Auth);
        assert_eq!(table().classify("/reset-password"), RouteCategory::Auth);
    }

    #[test]
    fn public_pages_and_default() {
        assert_eq!(table().classify("/"), RouteCategory::Public);
        assert_eq!(table().classify("/pricing"), RouteCategory::Public);
        // Unknown paths are public by default, never denied here.
        assert_eq!(table().classify("/blog/2024/visa-news"), RouteCategory::Public);
        assert_eq!(table().classify("/health"), RouteCategory::Public);
    }

    #[test]
    fn classification_is_stable_per_path() {
        let t = table();
        for path in ["/admin/a", "/app", "/onboarding", "/sign-in", "/x"] {
            assert_eq!(t.classify(path), t.classify(path));
        }
    }

    #[test]
    fn role_home_destinations() {
        let t = table();
        assert_eq!(t.role_home(Role::Admin), "/admin");
        assert_eq!(t.role_home(Role::User), "/app/form");
    }
}
