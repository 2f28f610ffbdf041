use futures_util::Stream;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::model::Job;
use super::outputs;
use crate::codec::scalar::rfc3339_utc;
use crate::common::error::{ListFailure, RepositoryError, Result};
use crate::infrastructure::store::HashStore;
use crate::repository::{self, Entity, listing};

impl Entity for Job {
    const KIND: &'static str = "job";
    const INDEX: &'static str = "jobs";

    fn identity(&self) -> &str {
        &self.id
    }

    /// Jobs are indexed by creation time, in seconds.
    fn index_score(&self) -> f64 {
        self.creation_time.unix_timestamp() as f64
    }
}

/// Narrows [`JobRepository::find_all`]. The default lists every job.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Only jobs created at or after this instant (second precision).
    pub since: Option<OffsetDateTime>,
    pub limit: Option<usize>,
}

fn validate(job: &Job) -> Result<()> {
    if rfc3339_utc(job.creation_time).is_none() {
        return Err(RepositoryError::Validation(format!(
            "creationTime {} is outside years 0000-9999 UTC",
            job.creation_time
        )));
    }
    Ok(())
}

pub struct JobRepository;

impl JobRepository {
    /// Stores a new job, generating its id and creation time when unset.
    ///
    /// The hash is written first so the id is claimed before anything else
    /// is touched; the outputs list follows.
    pub async fn create<S: HashStore>(store: &S, mut job: Job) -> Result<Job> {
        if job.id.is_empty() {
            job.id = Uuid::new_v4().simple().to_string();
        }
        if job.creation_time == OffsetDateTime::UNIX_EPOCH {
            job.creation_time = OffsetDateTime::now_utc();
        }
        validate(&job)?;

        repository::insert_entity(store, &job).await?;
        outputs::write(store, &job.id, &job.outputs).await?;

        info!(job_id = %job.id, provider = %job.provider_name, outputs = job.outputs.len(), "job created");
        Ok(job)
    }

    pub async fn find_by_id<S: HashStore>(store: &S, id: &str) -> Result<Job> {
        let mut job: Job = repository::fetch_entity(store, id).await?;
        job.outputs = outputs::read(store, id).await?;
        Ok(job)
    }

    /// Replaces the stored job and its outputs in full.
    ///
    /// The outputs list is written before the hash.
    pub async fn update<S: HashStore>(store: &S, job: &Job) -> Result<()> {
        validate(job)?;
        repository::ensure_present::<Job, S>(store, &job.id).await?;
        outputs::write(store, &job.id, &job.outputs).await?;
        repository::write_entity(store, job).await?;
        Ok(())
    }

    /// Removes the job hash and its outputs list.
    pub async fn delete<S: HashStore>(store: &S, id: &str) -> Result<()> {
        repository::remove_entity::<Job, S>(store, id, vec![outputs::outputs_key(id)]).await?;
        info!(job_id = %id, "job deleted");
        Ok(())
    }

    /// Jobs matching `filter`, oldest first, loaded one at a time as the
    /// stream is polled.
    pub async fn find_all<S: HashStore>(
        store: &S,
        filter: JobFilter,
    ) -> Result<impl Stream<Item = std::result::Result<Job, ListFailure>> + '_> {
        let since = filter.since.map(|at| at.unix_timestamp() as f64);
        let ids = repository::entity_ids::<Job, S>(store, since, filter.limit).await?;
        Ok(listing(ids, move |id| async move {
            Self::find_by_id(store, &id).await
        }))
    }
}
