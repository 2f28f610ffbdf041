use futures_util::Stream;
use tracing::info;
use validator::Validate;

use super::model::PresetMap;
use crate::common::error::{ListFailure, RepositoryError, Result};
use crate::infrastructure::store::HashStore;
use crate::repository::{self, Entity, listing};

impl Entity for PresetMap {
    const KIND: &'static str = "presetmap";
    const INDEX: &'static str = "presetmaps";

    fn identity(&self) -> &str {
        &self.name
    }
}

fn validate(preset_map: &PresetMap) -> Result<()> {
    if preset_map.name.is_empty() {
        return Err(RepositoryError::Validation(
            "presetmap name is required".to_owned(),
        ));
    }
    preset_map.output_opts.validate()?;
    Ok(())
}

pub struct PresetMapRepository;

impl PresetMapRepository {
    pub async fn create<S: HashStore>(store: &S, preset_map: PresetMap) -> Result<PresetMap> {
        validate(&preset_map)?;
        repository::insert_entity(store, &preset_map).await?;

        info!(name = %preset_map.name, providers = preset_map.provider_mapping.len(), "preset map created");
        Ok(preset_map)
    }

    pub async fn find_by_name<S: HashStore>(store: &S, name: &str) -> Result<PresetMap> {
        repository::fetch_entity(store, name).await
    }

    pub async fn update<S: HashStore>(store: &S, preset_map: &PresetMap) -> Result<()> {
        validate(preset_map)?;
        repository::ensure_present::<PresetMap, S>(store, &preset_map.name).await?;
        repository::write_entity(store, preset_map).await
    }

    pub async fn delete<S: HashStore>(store: &S, name: &str) -> Result<()> {
        repository::remove_entity::<PresetMap, S>(store, name, Vec::new()).await?;
        info!(name, "preset map deleted");
        Ok(())
    }

    /// Every preset map, in name order.
    pub async fn find_all<S: HashStore>(
        store: &S,
    ) -> Result<impl Stream<Item = std::result::Result<PresetMap, ListFailure>> + '_> {
        let names = repository::entity_ids::<PresetMap, S>(store, None, None).await?;
        Ok(listing(names, move |name| async move {
            Self::find_by_name(store, &name).await
        }))
    }
}
