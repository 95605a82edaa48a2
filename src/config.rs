use anyhow::{Context, bail};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Which row-store implementation backs the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    Mysql,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,

    /// Scope of the JSON API; the served OpenAPI paths are rewritten to it.
    pub api_prefix: String,
    /// City used by `/calculate` when the request names none.
    pub default_city: String,
    pub max_upload_bytes: usize,

    // Rate limiting
    pub rate_upload_per_min: u32,
    pub rate_api_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let store_backend: StoreBackend = parse_var("STORE_BACKEND", "mysql")?;
        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Mysql && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND=mysql");
        }

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            store_backend,
            database_url,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            default_city: env::var("DEFAULT_CITY").unwrap_or_else(|_| "佛山".to_string()),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", "10485760")?,

            rate_upload_per_min: parse_var("RATE_UPLOAD_PER_MIN", "30")?,
            rate_api_per_min: parse_var("RATE_API_PER_MIN", "600")?,

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

fn parse_var<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("invalid value for {key}"))
}

#[cfg(test)]
impl Config {
    /// Memory-backed config with generous limits, for handler tests.
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            store_backend: StoreBackend::Memory,
            database_url: None,
            api_prefix: "/api".to_string(),
            default_city: "佛山".to_string(),
            max_upload_bytes: 1024 * 1024,
            rate_upload_per_min: 1000,
            rate_api_per_min: 1000,
            log_dir: "logs".to_string(),
        }
    }
}
