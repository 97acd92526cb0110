use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

pub const DEFAULT_JWT_SECRET: &str = "dev-secret-key";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub retention_days: i64,
    pub sweep_interval: Duration,
    pub static_dir: Option<String>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = env_or(key, default);
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {key}: {raw:?}"))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = parse_env("WP_LISTEN_ADDR", "0.0.0.0:5173")?;
        let db_path = env_or("WP_DB_PATH", "./db/willpower.db");
        let cors_allow = env_or("WP_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_env("WP_REQUEST_TIMEOUT_MS", "30000")?;
        let jwt_secret = env_or("WP_JWT_SECRET", DEFAULT_JWT_SECRET);
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("WP_JWT_SECRET cannot be empty");
        }
        let ttl_hours: u64 = parse_env("WP_TOKEN_TTL_HOURS", "72")?;
        let retention_days: i64 = parse_env("WP_RETENTION_DAYS", "30")?;
        if retention_days < 1 {
            anyhow::bail!("WP_RETENTION_DAYS must be at least 1, got {retention_days}");
        }
        let sweep_secs: u64 = parse_env("WP_SWEEP_INTERVAL_SECS", "86400")?;
        if sweep_secs == 0 {
            anyhow::bail!("WP_SWEEP_INTERVAL_SECS must be positive");
        }
        let static_dir = std::env::var("WP_STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_hours * 60 * 60),
            retention_days,
            sweep_interval: Duration::from_secs(sweep_secs),
            static_dir,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
