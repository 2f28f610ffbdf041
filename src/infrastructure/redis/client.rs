use redis::{Client, aio::MultiplexedConnection};
use std::time::Duration;
use tracing::info;

use crate::config::settings::StoreConfig;
use crate::infrastructure::store::StoreError;

#[derive(Clone)]
pub struct RedisService {
    conn: MultiplexedConnection,
}

impl RedisService {
    pub async fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::open(config.redis_url.as_str())?;

        let conn = tokio::time::timeout(
            Duration::from_secs(config.connect_timeout_secs),
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| StoreError::Timeout(config.connect_timeout_secs))??;

        info!("✅ Connected to Redis");
        Ok(Self { conn })
    }

    /// Multiplexed connections are cheap to clone and share one socket.
    pub fn get_conn(&self) -> MultiplexedConnection {
        self.conn.clone()
    }
}
