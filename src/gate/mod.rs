/*
 * Responsibility
 * - ゲート一式 (classify / extract / decide / respond) を束ねる
 * - Gatekeeper (orchestrator) と apply() の公開
 * - 外部（app / tests）に公開する型を制御する
 */
mod core;
mod decision;
mod principal;
mod respond;
mod routes;

pub use self::core::{Gatekeeper, apply};
pub use decision::{Action, REDIRECT_TO_PARAM, decide};
pub use principal::{AccountStatus, Onboarding, Principal, Role, RoleClaim};
pub use respond::{LOGOUT_REASON_PARAM, respond};
pub use routes::{RouteCategory, RouteTable};
