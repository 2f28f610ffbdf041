//! Field schemas
//!
//! A record participates in hash mapping by implementing [`HashRecord`] and
//! returning a static table of [`Field`] descriptors. Tables are declared with
//! the [`flat!`](crate::flat), [`expand!`](crate::expand),
//! [`map_expand!`](crate::map_expand) and [`excluded!`](crate::excluded)
//! macros, which generate the accessors for each field.

use std::collections::BTreeSet;
use thiserror::Error;

use super::{DecodeError, FlatMap};

/// A record type with a statically declared hash schema.
pub trait HashRecord: Default + PartialEq + 'static {
    /// Record name used in diagnostics.
    const NAME: &'static str;

    fn schema() -> &'static [Field<Self>];
}

/// One entry of a record's schema.
pub struct Field<T> {
    /// Field identifier on the record.
    pub ident: &'static str,
    /// Hash key for flat fields, prefix stem for map fields, label otherwise.
    pub key: &'static str,
    pub mode: Mode<T>,
}

pub enum Mode<T> {
    /// Written as a single `key -> value` pair.
    Flat {
        omit_empty: bool,
        is_zero: fn(&T) -> bool,
        encode: fn(&T) -> String,
        decode: fn(&mut T, &str) -> Result<(), String>,
    },
    /// Nested record merged into the parent's namespace without prefixing.
    Expand {
        omit_empty: bool,
        is_zero: fn(&T) -> bool,
        encode: fn(&T, &mut FlatMap),
        decode: fn(&mut T, &FlatMap) -> Result<(), DecodeError>,
        keys: fn(&mut Vec<KeySpec>),
    },
    /// String map whose entries are written as `{prefix}{entry}`.
    MapExpand {
        prefix: &'static str,
        encode: fn(&T, &mut FlatMap),
        decode: fn(&mut T, &FlatMap),
    },
    /// Never part of the hash.
    Excluded,
}

impl<T> Field<T> {
    pub fn is_excluded(&self) -> bool {
        matches!(self.mode, Mode::Excluded)
    }
}

/// A hash key, or family of keys, claimed by a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySpec {
    Exact(&'static str),
    Prefix(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{record}: hash key `{key}` is claimed by more than one field")]
    Collision { record: &'static str, key: &'static str },

    #[error("{record}: hash key `{key}` overlaps map prefix `{prefix}`")]
    PrefixOverlap {
        record: &'static str,
        key: &'static str,
        prefix: &'static str,
    },
}

/// Appends every key the full expansion of `T` can write.
pub fn collect_keys<T: HashRecord>(out: &mut Vec<KeySpec>) {
    for field in T::schema() {
        match &field.mode {
            Mode::Flat { .. } => out.push(KeySpec::Exact(field.key)),
            Mode::Expand { keys, .. } => keys(out),
            Mode::MapExpand { prefix, .. } => out.push(KeySpec::Prefix(*prefix)),
            Mode::Excluded => {}
        }
    }
}

/// Checks that no two fields across the expansion of `T` write the same key.
pub fn validate<T: HashRecord>() -> Result<(), SchemaError> {
    let mut keys = Vec::new();
    collect_keys::<T>(&mut keys);
    check_keys(T::NAME, &keys)
}

pub fn check_keys(record: &'static str, keys: &[KeySpec]) -> Result<(), SchemaError> {
    let mut exact = BTreeSet::new();
    let mut prefixes: Vec<&'static str> = Vec::new();

    for spec in keys {
        match *spec {
            KeySpec::Exact(key) => {
                if !exact.insert(key) {
                    return Err(SchemaError::Collision { record, key });
                }
            }
            KeySpec::Prefix(prefix) => {
                if let Some(&other) = prefixes
                    .iter()
                    .find(|&&other| other.starts_with(prefix) || prefix.starts_with(other))
                {
                    return Err(SchemaError::PrefixOverlap {
                        record,
                        key: other,
                        prefix,
                    });
                }
                prefixes.push(prefix);
            }
        }
    }

    for &prefix in &prefixes {
        if let Some(&key) = exact.iter().find(|&&key| key.starts_with(prefix)) {
            return Err(SchemaError::PrefixOverlap {
                record,
                key,
                prefix,
            });
        }
    }

    Ok(())
}

/// Declares a flat field: `flat!(Record, field, "hashKey")`, optionally
/// followed by `omitempty`. The field type must implement
/// [`Scalar`](crate::codec::scalar::Scalar).
#[macro_export]
macro_rules! flat {
    (@build $record:ty, $field:ident, $key:literal, $omit:expr) => {
        $crate::codec::schema::Field::<$record> {
            ident: stringify!($field),
            key: $key,
            mode: $crate::codec::schema::Mode::Flat {
                omit_empty: $omit,
                is_zero: |r: &$record| $crate::codec::scalar::Scalar::is_zero(&r.$field),
                encode: |r: &$record| $crate::codec::scalar::Scalar::to_hash(&r.$field),
                decode: |r: &mut $record, raw: &str| -> ::std::result::Result<(), String> {
                    r.$field = $crate::codec::scalar::Scalar::from_hash(raw)?;
                    Ok(())
                },
            },
        }
    };
    ($record:ty, $field:ident, $key:literal, omitempty) => {
        $crate::flat!(@build $record, $field, $key, true)
    };
    ($record:ty, $field:ident, $key:literal) => {
        $crate::flat!(@build $record, $field, $key, false)
    };
}

/// Declares an expanded nested record: `expand!(Record, field: Nested, "label")`,
/// optionally followed by `omitempty` to skip an all-zero nested record.
#[macro_export]
macro_rules! expand {
    (@build $record:ty, $field:ident, $sub:ty, $key:literal, $omit:expr) => {
        $crate::codec::schema::Field::<$record> {
            ident: stringify!($field),
            key: $key,
            mode: $crate::codec::schema::Mode::Expand {
                omit_empty: $omit,
                is_zero: |r: &$record| r.$field == <$sub as ::std::default::Default>::default(),
                encode: |r: &$record, out: &mut $crate::codec::FlatMap| {
                    $crate::codec::encode::encode_into(&r.$field, out)
                },
                decode: |r: &mut $record,
                         map: &$crate::codec::FlatMap|
                 -> ::std::result::Result<(), $crate::codec::DecodeError> {
                    r.$field = $crate::codec::decode::decode::<$sub>(map)?;
                    Ok(())
                },
                keys: $crate::codec::schema::collect_keys::<$sub>,
            },
        }
    };
    ($record:ty, $field:ident : $sub:ty, $key:literal, omitempty) => {
        $crate::expand!(@build $record, $field, $sub, $key, true)
    };
    ($record:ty, $field:ident : $sub:ty, $key:literal) => {
        $crate::expand!(@build $record, $field, $sub, $key, false)
    };
}

/// Declares a `BTreeMap<String, String>` field whose entries are written
/// under `"{key}."`.
#[macro_export]
macro_rules! map_expand {
    ($record:ty, $field:ident, $key:literal) => {
        $crate::codec::schema::Field::<$record> {
            ident: stringify!($field),
            key: $key,
            mode: $crate::codec::schema::Mode::MapExpand {
                prefix: concat!($key, "."),
                encode: |r: &$record, out: &mut $crate::codec::FlatMap| {
                    for (entry, value) in &r.$field {
                        out.insert(format!("{}{}", concat!($key, "."), entry), value.clone());
                    }
                },
                decode: |r: &mut $record, map: &$crate::codec::FlatMap| {
                    r.$field = $crate::codec::decode::collect_prefixed(map, concat!($key, "."));
                },
            },
        }
    };
}

/// Declares a field that never takes part in hash mapping.
#[macro_export]
macro_rules! excluded {
    ($record:ty, $field:ident) => {
        $crate::codec::schema::Field::<$record> {
            ident: stringify!($field),
            key: "-",
            mode: $crate::codec::schema::Mode::Excluded,
        }
    };
}
