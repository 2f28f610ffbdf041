use utoipa::OpenApi;

use crate::modules::job::model::{Job, StreamingParams, StreamingProtocol, TranscodeOutput};
use crate::modules::preset::model::{AudioPreset, LocalPreset, Preset, ThumbnailPreset, VideoPreset};
use crate::modules::presetmap::model::{OutputOptions, PresetMap};

/// JSON-facing schemas of the persisted entities. Their property names come
/// from the serde attributes and are unrelated to the hash keys.
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            Job, TranscodeOutput, StreamingParams, StreamingProtocol,
            PresetMap, OutputOptions,
            LocalPreset, Preset, VideoPreset, AudioPreset, ThumbnailPreset
        )
    ),
    tags(
        (name = "Jobs", description = "Transcoding jobs"),
        (name = "Presets", description = "Preset maps and local presets")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_entity() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        for name in ["Job", "TranscodeOutput", "PresetMap", "OutputOptions", "LocalPreset", "Preset"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }

    #[test]
    fn uses_json_field_names() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("providerJobId"));
        assert!(json.contains("creationTime"));
        assert!(!json.contains("providerJobID"));
    }
}
