use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

/// Aggregates provider presets: each preset map in the API resolves to one
/// preset on every provider it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PresetMap {
    /// Unique name of the preset map.
    #[serde(rename = "name")]
    pub name: String,

    /// Provider name to that provider's internal preset id.
    #[serde(rename = "providerMapping")]
    pub provider_mapping: BTreeMap<String, String>,

    #[serde(rename = "output")]
    pub output_opts: OutputOptions,
}

/// Options for the output file that providers don't define themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OutputOptions {
    /// Extension of the output file, without the dot ("webm", not ".webm").
    #[serde(rename = "extension")]
    #[validate(length(min = 1, message = "extension is required"))]
    pub extension: String,
}
