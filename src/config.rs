use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

// ============================================================================
// Configuration - environment-driven, loaded once at startup
// ============================================================================

pub struct Config {
    pub bind: String,
    pub port: u16,
    /// Postgres connection string. When absent the in-memory store is used.
    pub database_url: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        let database_url = env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            info!("DATABASE_URL not set, using the in-memory store");
        }

        Self {
            bind: try_load("FUELBUNK_BIND", "0.0.0.0"),
            port: try_load("FUELBUNK_PORT", "8080"),
            database_url,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
