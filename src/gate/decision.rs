//! The access decision: `(principal, category, path) -> Action`.
//!
//! The rules live in one ordered slice, evaluated top to bottom, first match
//! wins. Order is part of the contract (an admin on `/sign-in` must hit the
//! signed-in-auth rule before any role/area rule), so changing the sequence
//! changes behavior. Each rule is a standalone function with its own guards
//! and can be exercised in isolation.
//!
//! No rule errors: unrecognized claims route into the explicit invalid-role
//! branches, never into a failure path.

use crate::gate::principal::{AccountStatus, Onboarding, Principal, Role};
use crate::gate::routes::{RouteCategory, RouteTable};

/// Query parameter carrying the originally requested path through the
/// sign-in redirect.
pub const REDIRECT_TO_PARAM: &str = "redirectTo";

/// Outcome of the decision procedure. Built fresh per request, consumed by
/// the response builder, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Let the request continue to its handler.
    Allow,
    /// Send the requester elsewhere, optionally with one query parameter.
    Redirect {
        destination: String,
        query: Option<(&'static str, String)>,
    },
    /// Expire the auth cookies and send the requester back to sign-in.
    ForceLogout { reason: &'static str },
}

impl Action {
    fn redirect(destination: &str) -> Self {
        Self::Redirect {
            destination: destination.to_string(),
            query: None,
        }
    }

    fn redirect_with(destination: &str, name: &'static str, value: &str) -> Self {
        Self::Redirect {
            destination: destination.to_string(),
            query: Some((name, value.to_string())),
        }
    }
}

/// Facts a rule may branch on. Borrowed from the request; rules never mutate.
struct RuleCtx<'a> {
    principal: Option<&'a Principal>,
    category: RouteCategory,
    path: &'a str,
    table: &'a RouteTable,
}

struct Rule {
    name: &'static str,
    eval: fn(&RuleCtx) -> Option<Action>,
}

/// Priority-ordered rule list. The slice order alone fixes precedence;
/// names exist for the decision log.
const RULES: &[Rule] = &[
    Rule {
        name: "anonymous_protected",
        eval: anonymous_protected,
    },
    Rule {
        name: "anonymous_open",
        eval: anonymous_open,
    },
    Rule {
        name: "pending_verification_detour",
        eval: pending_verification_detour,
    },
    Rule {
        name: "verification_page_when_done",
        eval: verification_page_when_done,
    },
    Rule {
        name: "auth_page_while_signed_in",
        eval: auth_page_while_signed_in,
    },
    Rule {
        name: "unrecognized_role_protected",
        eval: unrecognized_role_protected,
    },
    Rule {
        name: "unrecognized_role_open",
        eval: unrecognized_role_open,
    },
    Rule {
        name: "admin_in_applicant_area",
        eval: admin_in_applicant_area,
    },
    Rule {
        name: "user_onboarding_gate",
        eval: user_onboarding_gate,
    },
    Rule {
        name: "user_in_admin_area",
        eval: user_in_admin_area,
    },
];

/// Run the rules in order and return the first action produced.
/// Total: falls back to `Allow` when no rule claims the request.
pub fn decide(
    principal: Option<&Principal>,
    category: RouteCategory,
    path: &str,
    table: &RouteTable,
) -> Action {
    let ctx = RuleCtx {
        principal,
        category,
        path,
        table,
    };
    for rule in RULES {
        if let Some(action) = (rule.eval)(&ctx) {
            tracing::debug!(rule = rule.name, path, category = ?category, "gate decision");
            return action;
        }
    }
    tracing::debug!(rule = "default_allow", path, category = ?category, "gate decision");
    Action::Allow
}

// Anonymous requester on a protected category: to sign-in, remembering where
// they were headed.
fn anonymous_protected(ctx: &RuleCtx) -> Option<Action> {
    if ctx.principal.is_none() && ctx.category.is_protected() {
        return Some(Action::redirect_with(
            &ctx.table.sign_in_path,
            REDIRECT_TO_PARAM,
            ctx.path,
        ));
    }
    None
}

// Anonymous requester anywhere else (auth pages, public pages): fine.
fn anonymous_open(ctx: &RuleCtx) -> Option<Action> {
    if ctx.principal.is_none() {
        return Some(Action::Allow);
    }
    None
}

// A pending-verification account is confined to the verification page and
// the public pages until verified.
fn pending_verification_detour(ctx: &RuleCtx) -> Option<Action> {
    let principal = ctx.principal?;
    if principal.status != AccountStatus::PendingVerification {
        return None;
    }
    match ctx.category {
        RouteCategory::Verification | RouteCategory::Public => Some(Action::Allow),
        _ => Some(Action::redirect(&ctx.table.verification_path)),
    }
}

// Fully set-up account still sitting on the verification page: move them to
// their role's home. Anyone not fully set up may stay.
fn verification_page_when_done(ctx: &RuleCtx) -> Option<Action> {
    let principal = ctx.principal?;
    if ctx.category != RouteCategory::Verification {
        return None;
    }
    match principal.role.known() {
        Some(role) if principal.status.active_or_unknown() => {
            Some(Action::redirect(ctx.table.role_home(role)))
        }
        _ => Some(Action::Allow),
    }
}

// Signed-in requester on sign-in/sign-up/reset: route them to where they
// belong instead. A session with an unrecognized role is not trusted to keep
// existing.
fn auth_page_while_signed_in(ctx: &RuleCtx) -> Option<Action> {
    let principal = ctx.principal?;
    if ctx.category != RouteCategory::Auth {
        return None;
    }
    match principal.role.known() {
        Some(role) => {
            if principal.status.active_or_unknown() {
                Some(Action::redirect(ctx.table.role_home(role)))
            } else {
                Some(Action::redirect(&ctx.table.verification_path))
            }
        }
        None => Some(Action::ForceLogout {
            reason: "invalid_role",
        }),
    }
}

// Unrecognized role never gets into the admin or applicant areas; the
// session is terminated rather than downgraded.
fn unrecognized_role_protected(ctx: &RuleCtx) -> Option<Action> {
    let principal = ctx.principal?;
    if principal.role.known().is_some() {
        return None;
    }
    if matches!(ctx.category, RouteCategory::Admin | RouteCategory::User) {
        return Some(Action::ForceLogout {
            reason: "missing_role",
        });
    }
    None
}

// Unrecognized role outside those areas is harmless.
fn unrecognized_role_open(ctx: &RuleCtx) -> Option<Action> {
    let principal = ctx.principal?;
    if principal.role.known().is_none()
        && !matches!(ctx.category, RouteCategory::Admin | RouteCategory::User)
    {
        return Some(Action::Allow);
    }
    None
}

// Admins do not use the applicant flows.
fn admin_in_applicant_area(ctx: &RuleCtx) -> Option<Action> {
    let principal = ctx.principal?;
    if principal.role.known() != Some(Role::Admin) {
        return None;
    }
    if matches!(ctx.category, RouteCategory::User | RouteCategory::Onboarding) {
        return Some(Action::redirect(&ctx.table.admin_home));
    }
    None
}

// Applicants with an unfinished onboarding are pulled into it; applicants
// who finished are kept out of it. The gating only applies once the account
// is active (or its status is unknown). An absent flag means a session from
// before the flow existed: those pass through untouched.
fn user_onboarding_gate(ctx: &RuleCtx) -> Option<Action> {
    let principal = ctx.principal?;
    if principal.role.known() != Some(Role::User) || !principal.status.active_or_unknown() {
        return None;
    }
    match principal.onboarding {
        Onboarding::Incomplete if ctx.category != RouteCategory::Onboarding => {
            Some(Action::redirect(&ctx.table.onboarding_path))
        }
        Onboarding::Complete if ctx.category == RouteCategory::Onboarding => {
            Some(Action::redirect(&ctx.table.user_home))
        }
        _ => None,
    }
}

// Applicants do not get the back office.
fn user_in_admin_area(ctx: &RuleCtx) -> Option<Action> {
    let principal = ctx.principal?;
    if principal.role.known() == Some(Role::User) && ctx.category == RouteCategory::Admin {
        return Some(Action::redirect(&ctx.table.user_home));
    }
    None
}
