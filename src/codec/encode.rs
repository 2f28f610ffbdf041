use super::FlatMap;
use super::schema::{HashRecord, Mode};

/// Encodes `record` into its flat hash representation.
pub fn encode<T: HashRecord>(record: &T) -> FlatMap {
    let mut out = FlatMap::new();
    encode_into(record, &mut out);
    out
}

/// Merges the pairs for `record` into `out`.
pub fn encode_into<T: HashRecord>(record: &T, out: &mut FlatMap) {
    for field in T::schema() {
        match &field.mode {
            Mode::Flat {
                omit_empty,
                is_zero,
                encode,
                ..
            } => {
                if *omit_empty && is_zero(record) {
                    continue;
                }
                out.insert(field.key.to_owned(), encode(record));
            }
            Mode::Expand {
                omit_empty,
                is_zero,
                encode,
                ..
            } => {
                if *omit_empty && is_zero(record) {
                    continue;
                }
                encode(record, out);
            }
            Mode::MapExpand { encode, .. } => encode(record, out),
            Mode::Excluded => {}
        }
    }
}
