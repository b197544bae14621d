//! Transport-level middleware for the whole portal surface.
//!
//! Everything here applies to every route, gated or not; the gate itself
//! runs inside these layers, so its redirects and forced logouts are traced
//! and carry a request id like any page response.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits
//! - Global timeouts

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const REQUEST_ID_HEADER: &str = "x-request-id";

// The portal only ever receives small form posts; the limit is a backstop,
// not a tuning knob.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply the transport layers to the given Router.
pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // Convert layer errors (timeout etc.) into plain status responses so
        // the stack stays `Infallible`.
        .layer(HandleErrorLayer::new(handle_transport_error))
        // Generate a request id if the client did not send one, and echo it
        // back on the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

// A timeout this far out usually means a handler or the session provider
// hung, so it is worth a log line of its own.
async fn handle_transport_error(err: BoxError) -> StatusCode {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("request timed out at the transport layer");
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!(error = %err, "transport layer failure");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
