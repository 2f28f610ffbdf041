pub mod error;

pub use error::{ListFailure, RepositoryError, Result};
