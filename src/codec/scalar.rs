//! Textual encoding of flat field values.

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

/// A value stored as a single hash field.
pub trait Scalar: Sized {
    fn to_hash(&self) -> String;

    /// Parses a stored value; the error is a human readable reason.
    fn from_hash(raw: &str) -> Result<Self, String>;

    fn is_zero(&self) -> bool;
}

impl Scalar for String {
    fn to_hash(&self) -> String {
        self.clone()
    }

    fn from_hash(raw: &str) -> Result<Self, String> {
        Ok(raw.to_owned())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Scalar for bool {
    fn to_hash(&self) -> String {
        self.to_string()
    }

    fn from_hash(raw: &str) -> Result<Self, String> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err("invalid boolean".to_owned()),
        }
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl Scalar for u64 {
    fn to_hash(&self) -> String {
        self.to_string()
    }

    fn from_hash(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

/// The canonical stored form of `at`: RFC 3339 in UTC. `None` when the UTC
/// date falls outside years 0000..=9999.
pub fn rfc3339_utc(at: OffsetDateTime) -> Option<String> {
    at.checked_to_offset(UtcOffset::UTC)?.format(&Rfc3339).ok()
}

/// Timestamps are stored as RFC 3339 in UTC, keeping sub-second precision.
/// The zero value is the Unix epoch.
///
/// An instant whose UTC date leaves the RFC 3339 year range keeps its own
/// offset instead. The repository refuses timestamps with neither form.
impl Scalar for OffsetDateTime {
    fn to_hash(&self) -> String {
        rfc3339_utc(*self)
            .or_else(|| self.format(&Rfc3339).ok())
            .unwrap_or_default()
    }

    fn from_hash(raw: &str) -> Result<Self, String> {
        OffsetDateTime::parse(raw, &Rfc3339).map_err(|e| e.to_string())
    }

    fn is_zero(&self) -> bool {
        *self == OffsetDateTime::UNIX_EPOCH
    }
}
