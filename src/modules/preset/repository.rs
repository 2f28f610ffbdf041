use futures_util::Stream;
use tracing::info;

use super::model::LocalPreset;
use crate::common::error::{ListFailure, RepositoryError, Result};
use crate::infrastructure::store::HashStore;
use crate::repository::{self, Entity, listing};

impl Entity for LocalPreset {
    const KIND: &'static str = "localpreset";
    const INDEX: &'static str = "localpresets";

    fn identity(&self) -> &str {
        &self.name
    }

    fn restore_identity(&mut self, id: &str) {
        self.name = id.to_owned();
    }
}

fn require_name(preset: &LocalPreset) -> Result<()> {
    if preset.name.is_empty() {
        return Err(RepositoryError::Validation(
            "local preset name is required".to_owned(),
        ));
    }
    Ok(())
}

pub struct LocalPresetRepository;

impl LocalPresetRepository {
    pub async fn create<S: HashStore>(store: &S, preset: LocalPreset) -> Result<LocalPreset> {
        require_name(&preset)?;
        repository::insert_entity(store, &preset).await?;

        info!(name = %preset.name, "local preset created");
        Ok(preset)
    }

    pub async fn find_by_name<S: HashStore>(store: &S, name: &str) -> Result<LocalPreset> {
        repository::fetch_entity(store, name).await
    }

    pub async fn update<S: HashStore>(store: &S, preset: &LocalPreset) -> Result<()> {
        require_name(preset)?;
        repository::ensure_present::<LocalPreset, S>(store, &preset.name).await?;
        repository::write_entity(store, preset).await
    }

    pub async fn delete<S: HashStore>(store: &S, name: &str) -> Result<()> {
        repository::remove_entity::<LocalPreset, S>(store, name, Vec::new()).await?;
        info!(name, "local preset deleted");
        Ok(())
    }

    /// Every local preset, in name order.
    pub async fn find_all<S: HashStore>(
        store: &S,
    ) -> Result<impl Stream<Item = std::result::Result<LocalPreset, ListFailure>> + '_> {
        let names = repository::entity_ids::<LocalPreset, S>(store, None, None).await?;
        Ok(listing(names, move |name| async move {
            Self::find_by_name(store, &name).await
        }))
    }
}
