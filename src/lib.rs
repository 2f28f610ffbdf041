//! Persistence for transcoding jobs and presets on a flat key-value hash
//! store.
//!
//! Records are flattened by the declarative [`codec`] and stored through the
//! per-entity repositories ([`JobRepository`], [`PresetMapRepository`],
//! [`LocalPresetRepository`]) over any [`HashStore`].

pub mod codec;
pub mod common;
pub mod config;
pub mod docs;
pub mod infrastructure;
pub mod modules;
pub mod repository;

pub use common::error::{ListFailure, RepositoryError};
pub use infrastructure::{HashStore, MemoryStore, StoreError};
pub use modules::job::{
    Job, JobFilter, JobRepository, StreamingParams, StreamingProtocol, TranscodeOutput,
};
pub use modules::preset::{
    AudioPreset, LocalPreset, LocalPresetRepository, Preset, ThumbnailPreset, VideoPreset,
};
pub use modules::presetmap::{OutputOptions, PresetMap, PresetMapRepository};
pub use repository::{Listing, collect_listing, validate_schemas};
