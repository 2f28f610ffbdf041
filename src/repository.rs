//! Repository plumbing
//!
//! Owns entity identity and store-key derivation, and maps CRUD operations
//! onto a [`HashStore`]. Each entity has its own repository next to its model
//! (`modules::*::repository`); this module holds what they share.
//!
//! The repositories take no locks. Creation claims an identity atomically, so
//! concurrent creates of one identity yield a single winner and
//! [`RepositoryError::Duplicate`] for the rest. Concurrent updates of the
//! same identity are last-write-wins, and a job's hash and its outputs list
//! are two separate writes.

use futures_util::{Stream, StreamExt, stream};
use std::future::Future;
use tracing::{debug, info, warn};

use crate::codec::{self, HashRecord, schema};
use crate::common::error::{ListFailure, RepositoryError, Result};
use crate::config::settings::StoreConfig;
use crate::infrastructure::redis::{RedisService, RedisStore};
use crate::infrastructure::store::HashStore;
use crate::modules::job::model::{Job, TranscodeOutput};
use crate::modules::preset::model::LocalPreset;
use crate::modules::presetmap::model::PresetMap;

/// A record type with its own identity and namespace in the store.
pub trait Entity: HashRecord + Send + Sync {
    /// Key namespace, also used in error messages.
    const KIND: &'static str;
    /// Sorted set holding every identity of this type.
    const INDEX: &'static str;

    fn identity(&self) -> &str;

    /// Score under which the identity is indexed.
    fn index_score(&self) -> f64 {
        0.0
    }

    /// Puts back identity fields the hash does not carry.
    fn restore_identity(&mut self, _id: &str) {}
}

/// `{namespace}:{identity}`
pub fn entity_key(kind: &str, id: &str) -> String {
    format!("{kind}:{id}")
}

/// Fails if any entity schema has colliding hash keys. Run once at start-up,
/// before the store is used.
pub fn validate_schemas() -> Result<()> {
    schema::validate::<Job>()?;
    schema::validate::<TranscodeOutput>()?;
    schema::validate::<PresetMap>()?;
    schema::validate::<LocalPreset>()?;
    info!("hash schemas validated");
    Ok(())
}

/// Validates the schemas, then opens Redis with `config`.
pub async fn connect(config: &StoreConfig) -> Result<RedisStore> {
    validate_schemas()?;
    let redis = RedisService::new(config).await?;
    Ok(RedisStore::new(redis))
}

pub(crate) fn not_found<E: Entity>(id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity: E::KIND,
        id: id.to_owned(),
    }
}

pub(crate) async fn ensure_present<E: Entity, S: HashStore>(store: &S, id: &str) -> Result<()> {
    if !store.exists(&entity_key(E::KIND, id)).await? {
        return Err(not_found::<E>(id));
    }
    Ok(())
}

/// Writes a new entity's hash, failing with `Duplicate` if the identity is
/// taken, then indexes it.
pub(crate) async fn insert_entity<E: Entity, S: HashStore>(store: &S, record: &E) -> Result<()> {
    let id = record.identity();
    let fields = codec::encode(record);
    if !store.insert_hash(&entity_key(E::KIND, id), &fields).await? {
        return Err(RepositoryError::Duplicate {
            entity: E::KIND,
            id: id.to_owned(),
        });
    }
    store.index_add(E::INDEX, id, record.index_score()).await?;
    debug!(entity = E::KIND, id, fields = fields.len(), "entity inserted");
    Ok(())
}

/// Replaces the entity's hash in full and (re)indexes it.
pub(crate) async fn write_entity<E: Entity, S: HashStore>(store: &S, record: &E) -> Result<()> {
    let id = record.identity();
    let fields = codec::encode(record);
    store.replace_hash(&entity_key(E::KIND, id), &fields).await?;
    store.index_add(E::INDEX, id, record.index_score()).await?;
    debug!(entity = E::KIND, id, fields = fields.len(), "entity written");
    Ok(())
}

pub(crate) async fn fetch_entity<E: Entity, S: HashStore>(store: &S, id: &str) -> Result<E> {
    let fields = store.read_hash(&entity_key(E::KIND, id)).await?;
    if fields.is_empty() {
        return Err(not_found::<E>(id));
    }
    let mut record: E = codec::decode(&fields)?;
    record.restore_identity(id);
    Ok(record)
}

/// Drops the entity's hash, any `extra_keys` stored with it, and its index
/// entry.
pub(crate) async fn remove_entity<E: Entity, S: HashStore>(
    store: &S,
    id: &str,
    extra_keys: Vec<String>,
) -> Result<()> {
    ensure_present::<E, S>(store, id).await?;

    let mut keys = vec![entity_key(E::KIND, id)];
    keys.extend(extra_keys);
    store.index_remove(E::INDEX, id).await?;
    let removed = store.delete(&keys).await?;
    debug!(entity = E::KIND, id, removed, "entity deleted");
    Ok(())
}

pub(crate) async fn entity_ids<E: Entity, S: HashStore>(
    store: &S,
    min_score: Option<f64>,
    limit: Option<usize>,
) -> Result<Vec<String>> {
    Ok(store.index_range(E::INDEX, min_score, limit).await?)
}

/// Lazily loads every id with `fetch`. Entries that vanished since the index
/// was read are skipped; any other failure is yielded as a [`ListFailure`]
/// and the stream moves on.
pub(crate) fn listing<'a, T, F, Fut>(
    ids: Vec<String>,
    fetch: F,
) -> impl Stream<Item = std::result::Result<T, ListFailure>> + 'a
where
    T: 'a,
    F: Fn(String) -> Fut + 'a,
    Fut: Future<Output = Result<T>> + 'a,
{
    stream::iter(ids)
        .then(move |id| {
            let loading = fetch(id.clone());
            async move { loading.await.map_err(|error| ListFailure { id, error }) }
        })
        .filter_map(|item| async move {
            match item {
                Err(ListFailure {
                    error: RepositoryError::NotFound { .. },
                    ..
                }) => None,
                other => Some(other),
            }
        })
}

/// Everything a listing produced, split into loaded entries and failures.
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub failures: Vec<ListFailure>,
}

impl<T> Listing<T> {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Drains a `find_all` stream, logging each entry that failed to load.
pub async fn collect_listing<T>(
    entries: impl Stream<Item = std::result::Result<T, ListFailure>>,
) -> Listing<T> {
    let results: Vec<_> = entries.collect().await;

    let mut listing = Listing {
        items: Vec::with_capacity(results.len()),
        failures: Vec::new(),
    };
    for result in results {
        match result {
            Ok(item) => listing.items.push(item),
            Err(failure) => {
                warn!(id = %failure.id, error = %failure.error, "skipping entry that failed to load");
                listing.failures.push(failure);
            }
        }
    }
    listing
}
