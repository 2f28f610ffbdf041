use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full preset definition kept locally for providers that can't store
/// presets on their side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocalPreset {
    /// Unique name; it is the store identity and not part of the hash.
    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "preset")]
    pub preset: Preset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Preset {
    #[serde(rename = "name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "container", default, skip_serializing_if = "String::is_empty")]
    pub container: String,
    #[serde(rename = "rateControl", default, skip_serializing_if = "String::is_empty")]
    pub rate_control: String,
    #[serde(rename = "twoPass", default)]
    pub two_pass: bool,
    #[serde(rename = "video", default)]
    pub video: VideoPreset,
    #[serde(rename = "audio", default)]
    pub audio: AudioPreset,
    #[serde(rename = "thumbnail", default)]
    pub thumbnail: ThumbnailPreset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VideoPreset {
    #[serde(rename = "profile", default, skip_serializing_if = "String::is_empty")]
    pub profile: String,
    #[serde(rename = "profileLevel", default, skip_serializing_if = "String::is_empty")]
    pub profile_level: String,
    #[serde(rename = "width", default, skip_serializing_if = "String::is_empty")]
    pub width: String,
    #[serde(rename = "height", default, skip_serializing_if = "String::is_empty")]
    pub height: String,
    #[serde(rename = "codec", default, skip_serializing_if = "String::is_empty")]
    pub codec: String,
    #[serde(rename = "bitrate", default, skip_serializing_if = "String::is_empty")]
    pub bitrate: String,
    #[serde(rename = "gopSize", default, skip_serializing_if = "String::is_empty")]
    pub gop_size: String,
    #[serde(rename = "gopMode", default, skip_serializing_if = "String::is_empty")]
    pub gop_mode: String,
    #[serde(rename = "interlaceMode", default, skip_serializing_if = "String::is_empty")]
    pub interlace_mode: String,
    #[serde(rename = "bframes", default, skip_serializing_if = "String::is_empty")]
    pub b_frames: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AudioPreset {
    #[serde(rename = "codec", default, skip_serializing_if = "String::is_empty")]
    pub codec: String,
    #[serde(rename = "bitrate", default, skip_serializing_if = "String::is_empty")]
    pub bitrate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ThumbnailPreset {
    #[serde(rename = "codec", default, skip_serializing_if = "String::is_empty")]
    pub codec: String,
    #[serde(rename = "width", default, skip_serializing_if = "String::is_empty")]
    pub width: String,
    #[serde(rename = "height", default, skip_serializing_if = "String::is_empty")]
    pub height: String,
    #[serde(rename = "frameCaptureNumerator", default, skip_serializing_if = "String::is_empty")]
    pub frame_capture_numerator: String,
    #[serde(rename = "frameCaptureDenominator", default, skip_serializing_if = "String::is_empty")]
    pub frame_capture_denominator: String,
    #[serde(rename = "frameCaptureQuality", default, skip_serializing_if = "String::is_empty")]
    pub quality: String,
    #[serde(rename = "maxCaptures", default, skip_serializing_if = "String::is_empty")]
    pub max_captures: String,
}
