/*
 * Responsibility
 * - 申請者向けフロー (welcome-and-verify / onboarding / app) のスタブ
 */
use axum::response::IntoResponse;

pub async fn welcome_and_verify() -> impl IntoResponse {
    "verify your email"
}

pub async fn onboarding() -> impl IntoResponse {
    "onboarding"
}

pub async fn app_home() -> impl IntoResponse {
    "applicant dashboard"
}

pub async fn app_form() -> impl IntoResponse {
    "visa application form"
}
