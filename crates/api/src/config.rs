use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds to wait for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Root directory for claim document uploads (default: `storage/uploads`).
    pub upload_dir: PathBuf,
    /// Largest accepted upload in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Mark auth cookies `Secure` (default: `false`; set in production behind TLS).
    pub cookie_secure: bool,
    /// Lifetime of a client signing link in days (default: `14`).
    pub signing_link_ttl_days: i64,
    /// Key for the stored W-9 TIN digest. Required; rotating it orphans existing digests.
    pub tin_hash_key: String,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                       |
    /// | `UPLOAD_DIR`             | `storage/uploads`          |
    /// | `MAX_UPLOAD_BYTES`       | `10485760`                 |
    /// | `COOKIE_SECURE`          | `false`                    |
    /// | `SIGNING_LINK_TTL_DAYS`  | `14`                       |
    /// | `TIN_HASH_KEY`           | **required**               |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values or a missing `TIN_HASH_KEY` so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "storage/uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let cookie_secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        let signing_link_ttl_days: i64 = std::env::var("SIGNING_LINK_TTL_DAYS")
            .unwrap_or_else(|_| "14".into())
            .parse()
            .expect("SIGNING_LINK_TTL_DAYS must be a valid i64");

        let tin_hash_key =
            std::env::var("TIN_HASH_KEY").expect("TIN_HASH_KEY must be set in the environment");
        assert!(!tin_hash_key.is_empty(), "TIN_HASH_KEY must not be empty");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            upload_dir,
            max_upload_bytes,
            cookie_secure,
            signing_link_ttl_days,
            tin_hash_key,
            jwt,
        }
    }
}
