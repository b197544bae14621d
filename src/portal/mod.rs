/*
 * Responsibility
 * - portal (ゲート配下のホスト側ルート) の公開ポイント
 */
pub mod handlers;
mod routes;

pub use routes::routes;
