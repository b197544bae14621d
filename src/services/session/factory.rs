/// Factory: build `JwtSessionProvider` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::session::JwtSessionProvider;

pub fn build_session_provider(config: &Config) -> Result<Arc<JwtSessionProvider>, AppError> {
    let provider = JwtSessionProvider::new(
        &config.session_private_key_pem,
        &config.session_public_key_pem,
        &config.session_issuer,
        &config.session_audience,
        &config.session_cookie_name,
        config.session_ttl_seconds,
        config.session_refresh_window_seconds,
        config.session_leeway_seconds,
        config.app_env.is_production(),
    )?;

    Ok(Arc::new(provider))
}
