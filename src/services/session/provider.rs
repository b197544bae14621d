//! Session provider interface used by the gatekeeper.
use async_trait::async_trait;
use axum::http::HeaderMap;
use cookie::Cookie;
use thiserror::Error;
use uuid::Uuid;

/// Identity facts a verified session carries about a signed-in account.
///
/// Claim values stay raw strings here on purpose: the gate validates them
/// against its closed enumerations, and "present but unrecognized" must
/// survive the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub role: Option<String>,
    pub account_status: Option<String>,
    pub onboarding_complete: Option<bool>,
}

/// What one session-refresh step produced: who is asking (if anyone), plus
/// the cookies that must ride out on whichever response the request ends
/// with.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub identity: Option<SessionIdentity>,
    /// Rotated or renewed cookies. Empty when nothing changed this request.
    pub refreshed: Vec<Cookie<'static>>,
}

impl SessionSnapshot {
    /// No session, nothing to propagate.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Session-layer errors (key material / backend trouble).
///
/// NOTE:
/// - Kept independent from `AppError` so callers can decide how to fail.
///   The gatekeeper degrades any of these to "anonymous" instead of failing
///   the request.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session key material: {0}")]
    KeyMaterial(String),
    #[error("session token signing failed: {0}")]
    Signing(String),
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}

/// The per-request session step.
///
/// Implementations must be cheap to share (typically `Arc<dyn ...>`) and
/// hold no per-request state.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    // Returns the provider name (for logging).
    fn provider_name(&self) -> &'static str;

    /// Read, verify and (when warranted) renew the session presented on the
    /// request headers.
    ///
    /// Runs exactly once per request, strictly before any routing decision.
    /// A missing, malformed or expired session is not an error; it yields
    /// an anonymous snapshot. `Err` is reserved for the provider itself
    /// being unusable.
    async fn refresh_session(&self, headers: &HeaderMap) -> Result<SessionSnapshot, SessionError>;
}
