use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::store::{HashStore, StoreError};
use crate::codec::FlatMap;

/// In-process [`HashStore`] mirroring the Redis semantics the repository
/// relies on: one key space for every value type, empty hashes and lists do
/// not exist, indexes order by score and then member.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

enum Value {
    Hash(FlatMap),
    List(Vec<String>),
    Index(HashMap<String, f64>),
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::WrongType(key.to_owned())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HashStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.values.read().await.contains_key(key))
    }

    async fn read_hash(&self, key: &str) -> Result<FlatMap, StoreError> {
        match self.values.read().await.get(key) {
            None => Ok(FlatMap::new()),
            Some(Value::Hash(fields)) => Ok(fields.clone()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn insert_hash(&self, key: &str, fields: &FlatMap) -> Result<bool, StoreError> {
        let mut values = self.values.write().await;
        if values.contains_key(key) {
            return Ok(false);
        }
        if !fields.is_empty() {
            values.insert(key.to_owned(), Value::Hash(fields.clone()));
        }
        Ok(true)
    }

    async fn replace_hash(&self, key: &str, fields: &FlatMap) -> Result<(), StoreError> {
        let mut values = self.values.write().await;
        if fields.is_empty() {
            values.remove(key);
        } else {
            values.insert(key.to_owned(), Value::Hash(fields.clone()));
        }
        Ok(())
    }

    async fn read_list(&self, key: &str) -> Result<Vec<String>, StoreError> {
        match self.values.read().await.get(key) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => Ok(items.clone()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn replace_list(&self, key: &str, items: &[String]) -> Result<(), StoreError> {
        let mut values = self.values.write().await;
        if items.is_empty() {
            values.remove(key);
        } else {
            values.insert(key.to_owned(), Value::List(items.to_vec()));
        }
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, StoreError> {
        let mut values = self.values.write().await;
        let removed = keys.iter().filter(|key| values.remove(*key).is_some()).count();
        Ok(removed as u64)
    }

    async fn index_add(&self, index: &str, member: &str, score: f64) -> Result<(), StoreError> {
        let mut values = self.values.write().await;
        let entry = values
            .entry(index.to_owned())
            .or_insert_with(|| Value::Index(HashMap::new()));
        let Value::Index(members) = entry else {
            return Err(wrong_type(index));
        };
        members.insert(member.to_owned(), score);
        Ok(())
    }

    async fn index_remove(&self, index: &str, member: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().await;
        let now_empty = match values.get_mut(index) {
            None => return Ok(()),
            Some(Value::Index(members)) => {
                members.remove(member);
                members.is_empty()
            }
            Some(_) => return Err(wrong_type(index)),
        };
        if now_empty {
            values.remove(index);
        }
        Ok(())
    }

    async fn index_range(
        &self,
        index: &str,
        min_score: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Vec<String>, StoreError> {
        let values = self.values.read().await;
        let members = match values.get(index) {
            None => return Ok(Vec::new()),
            Some(Value::Index(members)) => members,
            Some(_) => return Err(wrong_type(index)),
        };

        let mut scored: Vec<(&String, f64)> = members
            .iter()
            .map(|(member, score)| (member, *score))
            .filter(|(_, score)| min_score.is_none_or(|min| *score >= min))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));

        Ok(scored
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|(member, _)| member.clone())
            .collect())
    }
}
