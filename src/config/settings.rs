use serde::Deserialize;
use crate::config::env::{self, EnvKey};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
}

/// Connection settings handed to the repository; nothing reads them from the
/// environment after start-up.
#[derive(Clone, Debug, Deserialize)]
pub struct StoreConfig {
    pub redis_url: String,
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            store: StoreConfig {
                redis_url: env::get_or(EnvKey::RedisUrl, DEFAULT_REDIS_URL),
                connect_timeout_secs: env::get_parsed(
                    EnvKey::RedisConnectTimeout,
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                ),
            },
        }
    }
}
