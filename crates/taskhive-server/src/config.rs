//! Server configuration loaded from the environment.
//!
//! Required variables are checked up front so a misconfigured deployment
//! fails at startup instead of on the first request.

use taskhive_auth::AuthConfig;
use taskhive_db::DbConfig;

/// Variables that must be present for the server to start.
const REQUIRED_VARS: &[&str] = &[
    "TASKHIVE_DB_URL",
    "TASKHIVE_JWT_PRIVATE_KEY_PEM",
    "TASKHIVE_JWT_PUBLIC_KEY_PEM",
];

#[derive(Debug, thiserror::Error)]
#[error("missing required environment variables: {}", missing.join(", "))]
pub struct ConfigError {
    pub missing: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address, e.g. `0.0.0.0`.
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// Origins allowed by CORS (comma-separated in the environment).
    pub cors_origins: Vec<String>,
    /// Marks the refresh cookie `Secure`; enable behind TLS.
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Load configuration, validating required variables first.
    pub fn from_env() -> Result<Self, ConfigError> {
        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|v| std::env::var(v).map(|s| s.is_empty()).unwrap_or(true))
            .map(|v| v.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError { missing });
        }

        let db = DbConfig {
            url: env_or("TASKHIVE_DB_URL", "127.0.0.1:8000"),
            namespace: env_or("TASKHIVE_DB_NAMESPACE", "taskhive"),
            database: env_or("TASKHIVE_DB_DATABASE", "main"),
            username: env_or("TASKHIVE_DB_USERNAME", "root"),
            password: env_or("TASKHIVE_DB_PASSWORD", "root"),
        };

        let auth = AuthConfig {
            jwt_private_key_pem: std::env::var("TASKHIVE_JWT_PRIVATE_KEY_PEM")
                .unwrap_or_default(),
            jwt_public_key_pem: std::env::var("TASKHIVE_JWT_PUBLIC_KEY_PEM").unwrap_or_default(),
            pepper: std::env::var("TASKHIVE_PEPPER").ok().filter(|p| !p.is_empty()),
            access_token_lifetime_secs: env_parsed("TASKHIVE_ACCESS_TOKEN_TTL_SECS", 900),
            refresh_token_lifetime_secs: env_parsed("TASKHIVE_REFRESH_TOKEN_TTL_SECS", 604_800),
            ..AuthConfig::default()
        };

        Ok(Self {
            host: env_or("TASKHIVE_HOST", "0.0.0.0"),
            port: env_parsed("TASKHIVE_PORT", 1234),
            db,
            auth,
            cors_origins: env_or("TASKHIVE_CORS_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            cookie_secure: env_or("TASKHIVE_COOKIE_SECURE", "false") == "true",
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
