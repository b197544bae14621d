/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → 依存生成 (session provider / Gatekeeper) → Router 組み立て
 * - portal routes → gate → transport middleware の適用順をここで固定する
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::gate::{self, Gatekeeper, RouteTable};
use crate::middleware;
use crate::portal;
use crate::services::session::build_session_provider;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,portal_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they don't get lost when stderr is
        // swallowed by the process supervisor.
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        // Production: default behavior, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting portal gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_state(config: &Config) -> Result<AppState, AppError> {
    let sessions = build_session_provider(config)?;
    let gate = Gatekeeper::new(
        RouteTable::default(),
        sessions,
        config.auth_cookie_names.clone(),
    );

    Ok(AppState::new(Arc::new(gate)))
}

/// portal routes → gate → 横断 middleware の順で重ねる。
/// gate は handler より外、transport 層より内。
pub fn build_router(state: AppState) -> Router {
    let app = portal::routes();
    let app = gate::apply(app, state.clone());
    let app = app.with_state(state);

    let app = middleware::http::apply(app);
    middleware::security_headers::apply(app)
}
