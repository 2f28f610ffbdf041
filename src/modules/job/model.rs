use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::modules::presetmap::model::PresetMap;

/// A transcoding job as persisted by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Job {
    /// Generated when the job is created.
    #[serde(rename = "jobId", default)]
    pub id: String,

    #[serde(rename = "providerName")]
    pub provider_name: String,

    /// Id of the job on the provider.
    #[serde(rename = "providerJobId")]
    pub provider_job_id: String,

    /// Only set for adaptive streaming jobs.
    #[serde(
        rename = "streamingParams",
        default,
        skip_serializing_if = "StreamingParams::is_empty"
    )]
    pub streaming_params: StreamingParams,

    #[serde(rename = "creationTime", with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub creation_time: OffsetDateTime,

    #[serde(rename = "source")]
    pub source_media: String,

    /// Stored next to the job hash, never inside it.
    #[serde(rename = "outputs")]
    pub outputs: Vec<TranscodeOutput>,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            id: String::new(),
            provider_name: String::new(),
            provider_job_id: String::new(),
            streaming_params: StreamingParams::default(),
            creation_time: OffsetDateTime::UNIX_EPOCH,
            source_media: String::new(),
            outputs: Vec::new(),
        }
    }
}

/// A preset map paired with the name of the file it produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranscodeOutput {
    #[serde(rename = "presetmap")]
    pub preset_map: PresetMap,

    #[serde(rename = "filename")]
    pub file_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StreamingParams {
    #[serde(rename = "segmentDuration", default)]
    pub segment_duration: u64,

    #[serde(rename = "protocol", default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<StreamingProtocol>,

    #[serde(rename = "playlistFileName", default, skip_serializing_if = "String::is_empty")]
    pub playlist_file_name: String,
}

impl StreamingParams {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StreamingProtocol {
    Hls,
    Dash,
}

impl StreamingProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamingProtocol::Hls => "hls",
            StreamingProtocol::Dash => "dash",
        }
    }
}

impl fmt::Display for StreamingProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamingProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hls" => Ok(StreamingProtocol::Hls),
            "dash" => Ok(StreamingProtocol::Dash),
            other => Err(format!("unknown streaming protocol {other:?}")),
        }
    }
}
