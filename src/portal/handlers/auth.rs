/*
 * Responsibility
 * - 認証ページ (sign-in / sign-up / reset-password) のスタブ
 * - sign-in は redirectTo / reason クエリの着地先。本文では何も処理しない
 */
use axum::response::IntoResponse;

pub async fn sign_in() -> impl IntoResponse {
    "sign in"
}

pub async fn sign_up() -> impl IntoResponse {
    "sign up"
}

pub async fn reset_password() -> impl IntoResponse {
    "reset password"
}
