//! Hash codec
//!
//! Converts typed, nested records into the flat `field -> string` maps the
//! store persists, and back. Every record type declares a static schema (see
//! [`schema`]); the encoder and decoder walk that table, no runtime
//! introspection involved.

pub mod decode;
pub mod encode;
pub mod scalar;
pub mod schema;

use std::collections::BTreeMap;
use thiserror::Error;

pub use decode::decode;
pub use encode::encode;
pub use schema::{Field, HashRecord, Mode, SchemaError};

/// Flat hash representation of a record. Ordered so encoding is deterministic.
pub type FlatMap = BTreeMap<String, String>;

/// A hash value that could not be converted into its field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode hash key `{key}` from {value:?}: {reason}")]
pub struct DecodeError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

impl DecodeError {
    pub fn new(key: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
