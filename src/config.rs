/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, session 鍵, cookie 名など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub session_issuer: String,
    pub session_audience: String,
    // Gate signs refreshed session tokens with the private key and
    // verifies incoming ones with the public key (Ed25519 PKCS#8 PEM).
    pub session_private_key_pem: String,
    pub session_public_key_pem: String,
    pub session_leeway_seconds: u64,

    pub session_cookie_name: String,
    // Cookie names force-expired on logout. Superset of the session cookie;
    // legacy names can be listed here so stale clients get cleaned up too.
    pub auth_cookie_names: Vec<String>,

    pub session_ttl_seconds: u64,
    pub session_refresh_window_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let session_issuer = std::env::var("SESSION_ISSUER")
            .map_err(|_| ConfigError::Missing("SESSION_ISSUER"))?;

        let session_audience = std::env::var("SESSION_AUDIENCE")
            .map_err(|_| ConfigError::Missing("SESSION_AUDIENCE"))?;

        let session_private_key_pem = std::env::var("SESSION_JWT_PRIVATE_KEY_PEM")
            .map_err(|_| ConfigError::Missing("SESSION_JWT_PRIVATE_KEY_PEM"))?
            .replace("\\n", "\n");

        let session_public_key_pem = std::env::var("SESSION_JWT_PUBLIC_KEY_PEM")
            .map_err(|_| ConfigError::Missing("SESSION_JWT_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        let session_leeway_seconds = std::env::var("SESSION_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let session_cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "portal_session".to_string());

        let mut auth_cookie_names = std::env::var("AUTH_COOKIE_NAMES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        // The session cookie itself must always be on the logout-expiry list.
        if !auth_cookie_names.contains(&session_cookie_name) {
            auth_cookie_names.insert(0, session_cookie_name.clone());
        }

        let session_ttl_seconds = std::env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600); // 1 hour

        let session_refresh_window_seconds = std::env::var("SESSION_REFRESH_WINDOW_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(900); // refresh when < 15 min left

        Ok(Self {
            addr,
            app_env,
            session_issuer,
            session_audience,
            session_private_key_pem,
            session_public_key_pem,
            session_leeway_seconds,
            session_cookie_name,
            auth_cookie_names,
            session_ttl_seconds,
            session_refresh_window_seconds,
        })
    }
}
