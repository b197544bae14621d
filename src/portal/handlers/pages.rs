/*
 * Responsibility
 * - 公開 marketing ページのスタブ
 * - ページ描画は範囲外。gate の通過が確認できる最小の本文のみ
 */
use axum::response::IntoResponse;

use crate::error::AppError;

pub async fn home() -> impl IntoResponse {
    "Clearwater Visa Consultancy"
}

pub async fn about() -> impl IntoResponse {
    "about us"
}

pub async fn contact() -> impl IntoResponse {
    "contact"
}

pub async fn pricing() -> impl IntoResponse {
    "pricing"
}

// Unmatched paths are public as far as the gate is concerned; whether they
// exist is decided here.
pub async fn not_found() -> AppError {
    AppError::not_found("page")
}
