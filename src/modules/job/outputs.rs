//! Side collection for `Job::outputs`.
//!
//! A variable-length list of composite values has no flat-hash form, so the
//! outputs live in a list at `joboutputs:{id}`, one element per output in
//! order. Each element is the output's own flat map, serialized as a JSON
//! object. The namespace is disjoint from `job:`, so no job id can name
//! another job's outputs.

use crate::codec::{self, DecodeError, FlatMap};
use crate::common::error::Result;
use crate::infrastructure::store::{HashStore, StoreError};
use crate::repository::entity_key;

use super::model::TranscodeOutput;

const OUTPUTS_KIND: &str = "joboutputs";

pub fn outputs_key(job_id: &str) -> String {
    entity_key(OUTPUTS_KIND, job_id)
}

pub(crate) async fn write<S: HashStore>(store: &S, job_id: &str, outputs: &[TranscodeOutput]) -> Result<()> {
    let items = outputs
        .iter()
        .map(|output| serde_json::to_string(&codec::encode(output)))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(StoreError::from)?;

    store.replace_list(&outputs_key(job_id), &items).await?;
    Ok(())
}

pub(crate) async fn read<S: HashStore>(store: &S, job_id: &str) -> Result<Vec<TranscodeOutput>> {
    let key = outputs_key(job_id);
    let items = store.read_list(&key).await?;

    let mut outputs: Vec<TranscodeOutput> = Vec::with_capacity(items.len());
    for (position, raw) in items.iter().enumerate() {
        let fields: FlatMap = serde_json::from_str(raw)
            .map_err(|e| DecodeError::new(format!("{key}[{position}]"), raw.as_str(), e.to_string()))?;
        outputs.push(codec::decode(&fields)?);
    }
    Ok(outputs)
}
