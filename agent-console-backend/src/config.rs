use std::env;
use std::str::FromStr;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const STATIC_DIR: &str = "STATIC_DIR";
    pub const DISABLE_FRONTEND: &str = "DISABLE_FRONTEND";
    pub const WORKER_ENABLED: &str = "WORKER_ENABLED";
    pub const WORKER_POLL_INTERVAL_SECS: &str = "WORKER_POLL_INTERVAL_SECS";
    pub const WORKER_WORK_DELAY_MS: &str = "WORKER_WORK_DELAY_MS";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8000;
    pub const BIND_ADDRESS: &str = "127.0.0.1";
    pub const DATABASE_URL: &str = "./ai_console.db";
    pub const STATIC_DIR: &str = "./static";
    pub const WORKER_POLL_INTERVAL_SECS: u64 = 2;
    pub const WORKER_WORK_DELAY_MS: u64 = 2000;
}

/// Parse a numeric env var, falling back to `default` when unset or malformed
fn parse_env<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} must be a valid number (got {:?}), using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(name: &str) -> Option<bool> {
    env::var(name).ok().map(|v| {
        let v = v.trim().to_lowercase();
        v == "1" || v == "true" || v == "yes"
    })
}

/// Settings for the background task worker
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub enabled: bool,
    /// Seconds between scans of the task table
    pub poll_interval_secs: u64,
    /// Simulated work time per task
    pub work_delay_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            enabled: true,
            poll_interval_secs: defaults::WORKER_POLL_INTERVAL_SECS,
            work_delay_ms: defaults::WORKER_WORK_DELAY_MS,
        }
    }
}

impl WorkerConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: parse_flag(env_vars::WORKER_ENABLED).unwrap_or(true),
            // tokio's interval panics on a zero period
            poll_interval_secs: parse_env(
                env_vars::WORKER_POLL_INTERVAL_SECS,
                defaults::WORKER_POLL_INTERVAL_SECS,
            )
            .max(1),
            work_delay_ms: parse_env(env_vars::WORKER_WORK_DELAY_MS, defaults::WORKER_WORK_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub database_url: String,
    /// None when frontend serving is disabled
    pub static_dir: Option<String>,
    pub worker: WorkerConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let static_dir = if parse_flag(env_vars::DISABLE_FRONTEND).unwrap_or(false) {
            None
        } else {
            Some(env::var(env_vars::STATIC_DIR).unwrap_or_else(|_| defaults::STATIC_DIR.to_string()))
        };

        Self {
            port: parse_env(env_vars::PORT, defaults::PORT),
            bind_address: env::var(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|_| defaults::BIND_ADDRESS.to_string()),
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            static_dir,
            worker: WorkerConfig::from_env(),
        }
    }
}
