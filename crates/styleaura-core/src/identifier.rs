//! Store-native record identifiers.
//!
//! Records are keyed by a 12-byte [`ObjectId`] generated at insert time:
//!
//! | bytes | content                                   |
//! |-------|-------------------------------------------|
//! | 0..4  | seconds since the Unix epoch, big endian  |
//! | 4..9  | per-process random value                  |
//! | 9..12 | wrapping counter, big endian              |
//!
//! The canonical printable form is 24 lowercase hex characters. Every record
//! handed to a caller carries that string form, and every lookup parses it
//! back through [`ObjectId::parse_str`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};

/// Length of the printable hex form.
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// Extended JSON key wrapping an id, as emitted by the Data API (`{"$oid": "..."}`).
pub const EXTENDED_JSON_OID_KEY: &str = "$oid";

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// A 12-byte opaque record identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        #[allow(clippy::cast_possible_truncation)]
        let timestamp = secs as u32;
        let count = next_counter();

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Seconds since the Unix epoch at which this id was generated.
    #[must_use]
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Parses the 24-character hex form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] for anything that is not exactly
    /// 24 hex digits, including the empty string.
    pub fn parse_str(s: &str) -> Result<Self> {
        if s.len() != OBJECT_ID_HEX_LEN {
            return Err(Error::InvalidIdentifier(s.to_string()));
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| Error::InvalidIdentifier(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Canonical lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Extended JSON form used in store filters: `{"$oid": "<hex>"}`.
    #[must_use]
    pub fn to_extended_json(&self) -> Value {
        serde_json::json!({ EXTENDED_JSON_OID_KEY: self.to_hex() })
    }

    /// Reads an id from a JSON value, either a plain hex string or an
    /// extended JSON `{"$oid": "<hex>"}` object.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse_str(s).ok(),
            Value::Object(obj) => obj
                .get(EXTENDED_JSON_OID_KEY)
                .and_then(Value::as_str)
                .and_then(|s| Self::parse_str(s).ok()),
            _ => None,
        }
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid object id: {value}")))
    }
}

fn process_unique() -> &'static [u8] {
    static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
    PROCESS_UNIQUE.get_or_init(|| {
        let random = uuid::Uuid::new_v4();
        let mut out = [0u8; 5];
        out.copy_from_slice(&random.as_bytes()[..5]);
        out
    })
}

fn next_counter() -> u32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    let counter = COUNTER.get_or_init(|| {
        let seed = uuid::Uuid::new_v4();
        let b = seed.as_bytes();
        AtomicU32::new(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    });
    counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK
}

#[cfg(test)]
#[path = "identifier_tests.rs"]
mod tests;
