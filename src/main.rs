use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

use transcoding_store::config::AppConfig;
use transcoding_store::docs::ApiDoc;
use transcoding_store::repository;
use transcoding_store::{
    JobFilter, JobRepository, LocalPresetRepository, PresetMapRepository, collect_listing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if std::env::args().nth(1).as_deref() == Some("openapi") {
        println!("{}", ApiDoc::openapi().to_pretty_json()?);
        return Ok(());
    }

    let config = AppConfig::new();
    let store = repository::connect(&config.store)
        .await
        .context("failed to open the store")?;

    let jobs = collect_listing(JobRepository::find_all(&store, JobFilter::default()).await?).await;
    let preset_maps = collect_listing(PresetMapRepository::find_all(&store).await?).await;
    let local_presets = collect_listing(LocalPresetRepository::find_all(&store).await?).await;

    info!(
        jobs = jobs.items.len(),
        preset_maps = preset_maps.items.len(),
        local_presets = local_presets.items.len(),
        "store inventory"
    );

    let unreadable = jobs.failures.len() + preset_maps.failures.len() + local_presets.failures.len();
    if unreadable > 0 {
        warn!(unreadable, "some entries could not be decoded");
    }

    Ok(())
}
