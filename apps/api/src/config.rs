use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Which record store backs tests and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(anyhow!(
                "STORE_BACKEND must be one of memory, redis, postgres (got '{other}')"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a value is malformed or a backend's URL is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub redis_url: Option<String>,
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store_backend = match std::env::var("STORE_BACKEND") {
            Ok(value) => value.parse::<StoreBackend>()?,
            Err(_) => StoreBackend::default(),
        };

        let redis_url = optional_env("REDIS_URL");
        let database_url = optional_env("DATABASE_URL");

        match store_backend {
            StoreBackend::Redis if redis_url.is_none() => {
                return Err(anyhow!("Required environment variable 'REDIS_URL' is not set"));
            }
            StoreBackend::Postgres if database_url.is_none() => {
                return Err(anyhow!(
                    "Required environment variable 'DATABASE_URL' is not set"
                ));
            }
            _ => {}
        }

        Ok(Config {
            store_backend,
            redis_url,
            database_url,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Config {
            store_backend: StoreBackend::Memory,
            redis_url: None,
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
