use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Service settings, read from the environment and an optional `.env` file.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub upstream_timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        // dotenvy doesn't override variables already set in the environment
        dotenvy::dotenv().ok();

        let addr = std::env::var("FARMPROFIT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let timeout_secs = std::env::var("FARMPROFIT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            addr,
            upstream_timeout: Duration::from_secs(timeout_secs),
            log_level,
        }
    }
}
