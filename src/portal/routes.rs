/*
 * Responsibility
 * - portal の URL 構造を定義
 * - gate が守る範囲 (admin / app / onboarding / verification) と
 *   公開ページ (marketing / auth) をここで一望できるようにする
 */
use axum::{Router, routing::get};

use crate::portal::handlers::{
    admin::{admin_applicants, admin_home},
    applicant::{app_form, app_home, onboarding, welcome_and_verify},
    auth::{reset_password, sign_in, sign_up},
    health::health,
    pages::{about, contact, home, not_found, pricing},
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Marketing (public)
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/pricing", get(pricing))
        // Auth pages
        .route("/sign-in", get(sign_in))
        .route("/sign-up", get(sign_up))
        .route("/reset-password", get(reset_password))
        // Applicant flow
        .route("/welcome-and-verify", get(welcome_and_verify))
        .route("/onboarding", get(onboarding))
        .route("/app", get(app_home))
        .route("/app/form", get(app_form))
        // Back office
        .route("/admin", get(admin_home))
        .route("/admin/applicants", get(admin_applicants))
        .fallback(not_found)
}
