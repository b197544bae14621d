/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - HTTP 横断層 (request-id / trace / limit / timeout) と security headers
 */
pub mod http;
pub mod security_headers;
