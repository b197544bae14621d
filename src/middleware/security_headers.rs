//! Security response headers for the browser-facing portal.
//!
//! Applied at the Router level so every response carries them, the gate's
//! redirects and forced logouts included: browsers honor these headers on
//! 3xx responses too.
//!
//! Responsibility:
//! - Clickjacking protection
//! - MIME sniffing protection
//! - Referrer leakage control
//! - Browser feature restrictions

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

// Header names must be lowercase literals: `from_static` panics on anything
// else, at router build time.
const RESPONSE_HEADERS: &[(&str, &str)] = &[
    // The portal must never be framed (legacy + modern header pair). The
    // pages are served same-origin only, hence default-src 'self'.
    ("x-frame-options", "DENY"),
    (
        "content-security-policy",
        "default-src 'self'; frame-ancestors 'none'",
    ),
    // Prevent MIME sniffing
    ("x-content-type-options", "nosniff"),
    // Same-origin navigation keeps the full referrer (the portal links
    // between its own pages); cross-origin gets the origin at most.
    ("referrer-policy", "strict-origin-when-cross-origin"),
    // No powerful browser features anywhere on the portal
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
];

/// Apply common security headers to all responses.
///
/// `if_not_present` everywhere: a handler that needs a different value for
/// one page can set it and win.
pub fn apply(mut router: Router) -> Router {
    for &(name, value) in RESPONSE_HEADERS {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }
    router
}
