/*
 * Responsibility
 * - 管理側 (back office) ページのスタブ
 */
use axum::response::IntoResponse;

pub async fn admin_home() -> impl IntoResponse {
    "back office"
}

pub async fn admin_applicants() -> impl IntoResponse {
    "applicant submissions"
}
