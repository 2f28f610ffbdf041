use super::model::{OutputOptions, PresetMap};
use crate::codec::{Field, HashRecord};

impl HashRecord for PresetMap {
    const NAME: &'static str = "PresetMap";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<PresetMap>] = &[
            crate::flat!(PresetMap, name, "presetmap_name"),
            crate::map_expand!(PresetMap, provider_mapping, "pmapping"),
            crate::expand!(PresetMap, output_opts: OutputOptions, "output"),
        ];
        FIELDS
    }
}

impl HashRecord for OutputOptions {
    const NAME: &'static str = "OutputOptions";

    fn schema() -> &'static [Field<Self>] {
        static FIELDS: &[Field<OutputOptions>] =
            &[crate::flat!(OutputOptions, extension, "extension")];
        FIELDS
    }
}
