pub mod model;
pub mod repository;
pub mod schema;

pub use model::{OutputOptions, PresetMap};
pub use repository::PresetMapRepository;
