//! Hash layout of presets. Nested presets claim their own `video.*`,
//! `audio.*` and `thumbnail.*` key families so they can share the parent's
//! namespace.

use super::model::{AudioPreset, LocalPreset, Preset, ThumbnailPreset, VideoPreset};
use crate::codec::{Field, HashRecord};
use crate::{excluded, expand, flat};

impl HashRecord for LocalPreset {
    const NAME: &'static str = "LocalPreset";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<LocalPreset>] = &[
            excluded!(LocalPreset, name),
            expand!(LocalPreset, preset: Preset, "preset"),
        ];
        FIELDS
    }
}

impl HashRecord for Preset {
    const NAME: &'static str = "Preset";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<Preset>] = &[
            flat!(Preset, name, "name"),
            flat!(Preset, description, "description", omitempty),
            flat!(Preset, container, "container", omitempty),
            flat!(Preset, rate_control, "ratecontrol", omitempty),
            flat!(Preset, two_pass, "twopass"),
            expand!(Preset, video: VideoPreset, "video"),
            expand!(Preset, audio: AudioPreset, "audio"),
            expand!(Preset, thumbnail: ThumbnailPreset, "thumbnail"),
        ];
        FIELDS
    }
}

impl HashRecord for VideoPreset {
    const NAME: &'static str = "VideoPreset";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<VideoPreset>] = &[
            flat!(VideoPreset, profile, "video.profile", omitempty),
            flat!(VideoPreset, profile_level, "video.profilelevel", omitempty),
            flat!(VideoPreset, width, "video.width", omitempty),
            flat!(VideoPreset, height, "video.height", omitempty),
            flat!(VideoPreset, codec, "video.codec", omitempty),
            flat!(VideoPreset, bitrate, "video.bitrate", omitempty),
            flat!(VideoPreset, gop_size, "video.gopsize", omitempty),
            flat!(VideoPreset, gop_mode, "video.gopmode", omitempty),
            flat!(VideoPreset, interlace_mode, "video.interlacemode", omitempty),
            flat!(VideoPreset, b_frames, "video.bframes", omitempty),
        ];
        FIELDS
    }
}

impl HashRecord for AudioPreset {
    const NAME: &'static str = "AudioPreset";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<AudioPreset>] = &[
            flat!(AudioPreset, codec, "audio.codec", omitempty),
            flat!(AudioPreset, bitrate, "audio.bitrate", omitempty),
        ];
        FIELDS
    }
}

impl HashRecord for ThumbnailPreset {
    const NAME: &'static str = "ThumbnailPreset";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<ThumbnailPreset>] = &[
            flat!(ThumbnailPreset, codec, "thumbnail.codec", omitempty),
            flat!(ThumbnailPreset, width, "thumbnail.width", omitempty),
            flat!(ThumbnailPreset, height, "thumbnail.height", omitempty),
            flat!(ThumbnailPreset, frame_capture_numerator, "thumbnail.framecapturenumerator", omitempty),
            flat!(ThumbnailPreset, frame_capture_denominator, "thumbnail.framecapturedenominator", omitempty),
            flat!(ThumbnailPreset, quality, "thumbnail.quality", omitempty),
            flat!(ThumbnailPreset, max_captures, "thumbnail.maxcaptures", omitempty),
        ];
        FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{self, DecodeError, FlatMap, schema};

    fn full_preset() -> Preset {
        Preset {
            name: "1080p".to_owned(),
            description: "full hd".to_owned(),
            container: "mp4".to_owned(),
            rate_control: "VBR".to_owned(),
            two_pass: true,
            video: VideoPreset {
                profile: "main".to_owned(),
                profile_level: "3.1".to_owned(),
                width: "1920".to_owned(),
                height: "1080".to_owned(),
                codec: "h264".to_owned(),
                bitrate: "3500000".to_owned(),
                gop_size: "90".to_owned(),
                gop_mode: "fixed".to_owned(),
                interlace_mode: "progressive".to_owned(),
                b_frames: "2".to_owned(),
            },
            audio: AudioPreset {
                codec: "aac".to_owned(),
                bitrate: "128000".to_owned(),
            },
            thumbnail: ThumbnailPreset {
                codec: "png".to_owned(),
                width: "320".to_owned(),
                height: "180".to_owned(),
                frame_capture_numerator: "1".to_owned(),
                frame_capture_denominator: "10".to_owned(),
                quality: "80".to_owned(),
                max_captures: "5".to_owned(),
            },
        }
    }

    #[test]
    fn schemas_are_collision_free() {
        assert_eq!(schema::validate::<Preset>(), Ok(()));
        assert_eq!(schema::validate::<LocalPreset>(), Ok(()));
    }

    #[test]
    fn empty_nested_fields_are_omitted() {
        let preset = Preset {
            two_pass: true,
            video: VideoPreset {
                codec: "h264".to_owned(),
                ..Default::default()
            },
            ..Default::default()
        };

        let map = codec::encode(&preset);
        assert_eq!(map.get("video.codec").map(String::as_str), Some("h264"));
        assert_eq!(map.get("twopass").map(String::as_str), Some("true"));
        assert!(!map.contains_key("audio.codec"));
        assert!(!map.contains_key("description"));
        // name is not omit-empty
        assert_eq!(map.get("name").map(String::as_str), Some(""));
        assert_eq!(map.len(), 3);

        let decoded: Preset = codec::decode(&map).unwrap();
        assert_eq!(decoded.audio.codec, "");
        assert_eq!(decoded, preset);
    }

    #[test]
    fn full_preset_round_trips() {
        let preset = full_preset();
        let map = codec::encode(&preset);
        assert_eq!(map["audio.codec"], "aac");
        assert_eq!(map["thumbnail.codec"], "png");
        assert_eq!(map["ratecontrol"], "VBR");

        let decoded: Preset = codec::decode(&map).unwrap();
        assert_eq!(decoded, preset);
    }

    #[test]
    fn local_preset_name_stays_out_of_the_hash() {
        let local = LocalPreset {
            name: "my-preset".to_owned(),
            preset: full_preset(),
        };

        let map = codec::encode(&local);
        assert!(!map.values().any(|v| v == "my-preset"));
        assert_eq!(map["name"], "1080p");

        let decoded: LocalPreset = codec::decode(&map).unwrap();
        assert_eq!(decoded.name, "");
        assert_eq!(decoded.preset, local.preset);
    }

    #[test]
    fn invalid_boolean_reports_key_and_value() {
        let map = FlatMap::from([
            ("name".to_owned(), "broken".to_owned()),
            ("twopass".to_owned(), "sometimes".to_owned()),
        ]);

        let err = codec::decode::<Preset>(&map).unwrap_err();
        assert_eq!(
            err,
            DecodeError::new("twopass", "sometimes", "invalid boolean")
        );
    }
}
