use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use super::client::RedisService;
use crate::codec::FlatMap;
use crate::infrastructure::store::{HashStore, StoreError};

/// Creates the hash at `KEYS[1]` from the field/value pairs in `ARGV`, unless
/// the key is taken.
const INSERT_HASH: &str = r"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return 0
end
if #ARGV > 0 then
    redis.call('HSET', KEYS[1], unpack(ARGV))
end
return 1
";

/// `ZRANGEBYSCORE ... LIMIT` treats a negative count as unlimited.
fn limit_count(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}

/// [`HashStore`] backed by Redis hashes, lists and sorted sets.
#[derive(Clone)]
pub struct RedisStore {
    redis: RedisService,
}

impl RedisStore {
    pub fn new(redis: RedisService) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl HashStore for RedisStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.redis.get_conn();
        let found: bool = conn.exists(key).await?;
        Ok(found)
    }

    async fn read_hash(&self, key: &str) -> Result<FlatMap, StoreError> {
        let mut conn = self.redis.get_conn();
        let fields: FlatMap = conn.hgetall(key).await?;
        Ok(fields)
    }

    async fn insert_hash(&self, key: &str, fields: &FlatMap) -> Result<bool, StoreError> {
        let mut conn = self.redis.get_conn();

        let script = redis::Script::new(INSERT_HASH);
        let mut invocation = script.key(key);
        for (field, value) in fields {
            invocation.arg(field).arg(value);
        }
        let inserted: bool = invocation.invoke_async(&mut conn).await?;

        debug!(key, inserted, fields = fields.len(), "hash inserted");
        Ok(inserted)
    }

    async fn replace_hash(&self, key: &str, fields: &FlatMap) -> Result<(), StoreError> {
        let mut conn = self.redis.get_conn();
        let pairs: Vec<(&str, &str)> = fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect();

        // DEL + HSET in one MULTI so fields dropped by the new encoding go away.
        let mut pipe = redis::pipe();
        pipe.atomic().del(key).ignore();
        if !pairs.is_empty() {
            pipe.hset_multiple(key, pairs.as_slice()).ignore();
        }
        let _: () = pipe.query_async(&mut conn).await?;

        debug!(key, fields = pairs.len(), "hash replaced");
        Ok(())
    }

    async fn read_list(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.redis.get_conn();
        let items: Vec<String> = conn.lrange(key, 0, -1).await?;
        Ok(items)
    }

    async fn replace_list(&self, key: &str, items: &[String]) -> Result<(), StoreError> {
        let mut conn = self.redis.get_conn();

        let mut pipe = redis::pipe();
        pipe.atomic().del(key).ignore();
        if !items.is_empty() {
            pipe.rpush(key, items.to_vec()).ignore();
        }
        let _: () = pipe.query_async(&mut conn).await?;

        debug!(key, items = items.len(), "list replaced");
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.redis.get_conn();
        let removed: u64 = conn.del(keys.to_vec()).await?;
        Ok(removed)
    }

    async fn index_add(&self, index: &str, member: &str, score: f64) -> Result<(), StoreError> {
        let mut conn = self.redis.get_conn();
        let _: () = conn.zadd(index, member, score).await?;
        Ok(())
    }

    async fn index_remove(&self, index: &str, member: &str) -> Result<(), StoreError> {
        let mut conn = self.redis.get_conn();
        let _: () = conn.zrem(index, member).await?;
        Ok(())
    }

    async fn index_range(
        &self,
        index: &str,
        min_score: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Vec<String>, StoreError> {
        let mut conn = self.redis.get_conn();
        let min = min_score.map_or_else(|| "-inf".to_owned(), |score| score.to_string());

        let members: Vec<String> = match limit {
            Some(count) => {
                conn.zrangebyscore_limit(index, min, "+inf", 0, limit_count(count))
                    .await?
            }
            None => conn.zrangebyscore(index, min, "+inf").await?,
        };
        Ok(members)
    }
}
