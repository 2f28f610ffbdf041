pub mod model;
pub mod outputs;
pub mod repository;
pub mod schema;

pub use model::{Job, StreamingParams, StreamingProtocol, TranscodeOutput};
pub use repository::{JobFilter, JobRepository};
