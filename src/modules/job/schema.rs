use super::model::{Job, StreamingParams, StreamingProtocol, TranscodeOutput};
use crate::codec::scalar::Scalar;
use crate::codec::{Field, HashRecord};
use crate::modules::presetmap::model::PresetMap;
use crate::{excluded, expand, flat};

impl HashRecord for Job {
    const NAME: &'static str = "Job";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<Job>] = &[
            flat!(Job, id, "jobID"),
            flat!(Job, provider_name, "providerName"),
            flat!(Job, provider_job_id, "providerJobID"),
            expand!(Job, streaming_params: StreamingParams, "streamingparams", omitempty),
            flat!(Job, creation_time, "creationTime"),
            flat!(Job, source_media, "source"),
            excluded!(Job, outputs),
        ];
        FIELDS
    }
}

impl HashRecord for StreamingParams {
    const NAME: &'static str = "StreamingParams";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<StreamingParams>] = &[
            flat!(StreamingParams, segment_duration, "segmentDuration"),
            flat!(StreamingParams, protocol, "protocol"),
            flat!(StreamingParams, playlist_file_name, "playlistFileName", omitempty),
        ];
        FIELDS
    }
}

impl HashRecord for TranscodeOutput {
    const NAME: &'static str = "TranscodeOutput";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<TranscodeOutput>] = &[
            expand!(TranscodeOutput, preset_map: PresetMap, "presetmap"),
            flat!(TranscodeOutput, file_name, "filename"),
        ];
        FIELDS
    }
}

/// An unset protocol is stored as the empty string.
impl Scalar for Option<StreamingProtocol> {
    fn to_hash(&self) -> String {
        self.map(|protocol| protocol.as_str().to_owned())
            .unwrap_or_default()
    }

    fn from_hash(raw: &str) -> Result<Self, String> {
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{self, FlatMap, schema};
    use crate::modules::presetmap::model::OutputOptions;
    use time::macros::datetime;

    fn streaming_job() -> Job {
        Job {
            id: "job-123".to_owned(),
            provider_name: "encodingcom".to_owned(),
            provider_job_id: "provider-job-123".to_owned(),
            streaming_params: StreamingParams {
                segment_duration: 10,
                protocol: Some(StreamingProtocol::Hls),
                playlist_file_name: "hls/playlist.m3u8".to_owned(),
            },
            creation_time: datetime!(2016-05-24 14:01:02.5 UTC),
            source_media: "s3://bucket/video.mov".to_owned(),
            outputs: Vec::new(),
        }
    }

    #[test]
    fn schemas_are_collision_free() {
        assert_eq!(schema::validate::<Job>(), Ok(()));
        assert_eq!(schema::validate::<StreamingParams>(), Ok(()));
        assert_eq!(schema::validate::<TranscodeOutput>(), Ok(()));
    }

    #[test]
    fn encodes_streaming_job() {
        let map = codec::encode(&streaming_job());
        let expected: FlatMap = [
            ("jobID", "job-123"),
            ("providerName", "encodingcom"),
            ("providerJobID", "provider-job-123"),
            ("segmentDuration", "10"),
            ("protocol", "hls"),
            ("playlistFileName", "hls/playlist.m3u8"),
            ("creationTime", "2016-05-24T14:01:02.5Z"),
            ("source", "s3://bucket/video.mov"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
        assert_eq!(map, expected);
    }

    #[test]
    fn non_streaming_job_omits_streaming_keys() {
        let job = Job {
            streaming_params: StreamingParams::default(),
            ..streaming_job()
        };

        let map = codec::encode(&job);
        assert!(!map.contains_key("segmentDuration"));
        assert!(!map.contains_key("protocol"));

        let decoded: Job = codec::decode(&map).unwrap();
        assert_eq!(decoded, job);
    }

    #[test]
    fn round_trips_without_outputs() {
        let job = streaming_job();
        let decoded: Job = codec::decode(&codec::encode(&job)).unwrap();
        assert_eq!(decoded, job);

        let empty = Job::default();
        let decoded: Job = codec::decode(&codec::encode(&empty)).unwrap();
        assert_eq!(decoded, empty);
    }

    #[test]
    fn creation_time_at_the_year_limit_encodes() {
        let job = Job {
            creation_time: datetime!(9999-12-31 23:00 -5),
            ..streaming_job()
        };

        let map = codec::encode(&job);
        assert_eq!(map["creationTime"], "9999-12-31T23:00:00-05:00");
        let decoded: Job = codec::decode(&map).unwrap();
        assert_eq!(decoded, job);
    }

    #[test]
    fn outputs_are_not_hashed() {
        let mut job = streaming_job();
        job.outputs.push(TranscodeOutput {
            preset_map: PresetMap {
                name: "720p".to_owned(),
                output_opts: OutputOptions {
                    extension: "mp4".to_owned(),
                },
                ..Default::default()
            },
            file_name: "video_720p.mp4".to_owned(),
        });

        let map = codec::encode(&job);
        assert!(!map.contains_key("filename"));
        assert!(!map.contains_key("presetmap_name"));
        assert_eq!(map, codec::encode(&streaming_job()));
    }

    #[test]
    fn bad_numbers_and_protocols_fail_to_decode() {
        let mut map = codec::encode(&streaming_job());
        map.insert("segmentDuration".to_owned(), "ten".to_owned());
        let err = codec::decode::<Job>(&map).unwrap_err();
        assert_eq!(err.key, "segmentDuration");
        assert_eq!(err.value, "ten");

        let mut map = codec::encode(&streaming_job());
        map.insert("protocol".to_owned(), "rtmp".to_owned());
        let err = codec::decode::<Job>(&map).unwrap_err();
        assert_eq!(err.key, "protocol");
        assert_eq!(err.value, "rtmp");
    }

    #[test]
    fn absent_keys_decode_to_zero_values() {
        let map = FlatMap::from([("jobID".to_owned(), "only-id".to_owned())]);
        let job: Job = codec::decode(&map).unwrap();
        assert_eq!(job.id, "only-id");
        assert_eq!(job.creation_time, time::OffsetDateTime::UNIX_EPOCH);
        assert_eq!(job.streaming_params, StreamingParams::default());
    }

    #[test]
    fn transcode_output_expands_its_preset_map() {
        let output = TranscodeOutput {
            preset_map: PresetMap {
                name: "hls_360p".to_owned(),
                provider_mapping: [("mediaconvert".to_owned(), "hls-360".to_owned())].into(),
                output_opts: OutputOptions {
                    extension: "ts".to_owned(),
                },
            },
            file_name: "360p.ts".to_owned(),
        };

        let map = codec::encode(&output);
        assert_eq!(map["presetmap_name"], "hls_360p");
        assert_eq!(map["pmapping.mediaconvert"], "hls-360");
        assert_eq!(map["extension"], "ts");
        assert_eq!(map["filename"], "360p.ts");

        let decoded: TranscodeOutput = codec::decode(&map).unwrap();
        assert_eq!(decoded, output);
    }

    #[test]
    fn json_names_are_independent_of_hash_keys() {
        let json = serde_json::to_value(streaming_job()).unwrap();
        assert_eq!(json["jobId"], "job-123");
        assert_eq!(json["providerJobId"], "provider-job-123");
        assert_eq!(json["streamingParams"]["protocol"], "hls");
        assert_eq!(json["creationTime"], "2016-05-24T14:01:02.5Z");
        assert!(json.get("jobID").is_none());

        let non_streaming = Job {
            streaming_params: StreamingParams::default(),
            ..streaming_job()
        };
        let json = serde_json::to_value(&non_streaming).unwrap();
        assert!(json.get("streamingParams").is_none());

        let back: Job = serde_json::from_value(json).unwrap();
        assert_eq!(back, non_streaming);
    }
}
