pub mod model;
pub mod repository;
pub mod schema;

pub use model::{AudioPreset, LocalPreset, Preset, ThumbnailPreset, VideoPreset};
pub use repository::LocalPresetRepository;
