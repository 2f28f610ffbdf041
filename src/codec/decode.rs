use std::collections::BTreeMap;

use super::schema::{HashRecord, Mode};
use super::{DecodeError, FlatMap};

/// Rebuilds a `T` from its flat hash representation.
///
/// Absent keys leave the field at its zero value. Keys the schema does not
/// know about are ignored.
pub fn decode<T: HashRecord>(map: &FlatMap) -> Result<T, DecodeError> {
    let mut record = T::default();
    for field in T::schema() {
        match &field.mode {
            Mode::Flat { decode, .. } => {
                if let Some(raw) = map.get(field.key) {
                    decode(&mut record, raw)
                        .map_err(|reason| DecodeError::new(field.key, raw.as_str(), reason))?;
                }
            }
            Mode::Expand { decode, .. } => decode(&mut record, map)?,
            Mode::MapExpand { decode, .. } => decode(&mut record, map),
            Mode::Excluded => {}
        }
    }
    Ok(record)
}

/// Entries of `map` under `prefix`, with the prefix stripped.
pub fn collect_prefixed(map: &FlatMap, prefix: &str) -> BTreeMap<String, String> {
    map.range(prefix.to_owned()..)
        .take_while(|(key, _)| key.starts_with(prefix))
        .map(|(key, value)| (key[prefix.len()..].to_owned(), value.clone()))
        .collect()
}
