use thiserror::Error;

use crate::codec::{DecodeError, SchemaError};
use crate::infrastructure::store::StoreError;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} `{id}` not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} `{id}` already exists")]
    Duplicate { entity: &'static str, id: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid hash schema: {0}")]
    Schema(#[from] SchemaError),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl From<validator::ValidationErrors> for RepositoryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RepositoryError::Validation(errors.to_string())
    }
}

/// An entry `list_*` could not load. Listing carries on past it.
#[derive(Debug, Error)]
#[error("failed to load `{id}`: {error}")]
pub struct ListFailure {
    pub id: String,
    #[source]
    pub error: RepositoryError,
}
