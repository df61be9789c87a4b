//! Opaque content-version identifiers.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LocatorError;

/// Raw width of a version identifier in bytes.
pub const VERSION_ID_LEN: usize = 12;

/// Width of the hex wire form.
const HEX_LEN: usize = VERSION_ID_LEN * 2;

/// An opaque identifier for one exact content snapshot.
///
/// The wire form is a fixed-length lowercase hex string, e.g.
/// `519665f6223ebd6980884f2b`. Parsing accepts mixed case; rendering is
/// always lowercase, so the canonical URL grammar stays byte-for-byte
/// stable across round trips.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionId([u8; VERSION_ID_LEN]);

impl VersionId {
    /// Build an identifier from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; VERSION_ID_LEN]) -> Self {
        return Self(bytes);
    }

    /// The raw byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; VERSION_ID_LEN] {
        return &self.0;
    }
}

impl FromStr for VersionId {
    type Err = LocatorError;

    /// Parse the fixed-length hex wire form.
    ///
    /// # Errors
    ///
    /// Returns `LocatorError::InvalidIdentifier` on wrong length or non-hex
    /// input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HEX_LEN {
            return Err(LocatorError::InvalidIdentifier { raw: s.to_string() });
        }
        let decoded = hex::decode(s).map_err(|_err| {
            return LocatorError::InvalidIdentifier { raw: s.to_string() };
        })?;
        let bytes: [u8; VERSION_ID_LEN] = decoded.try_into().map_err(|_err| {
            return LocatorError::InvalidIdentifier { raw: s.to_string() };
        })?;
        return Ok(Self(bytes));
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&hex::encode(self.0));
    }
}

impl fmt::Debug for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "VersionId(\"{self}\")");
    }
}

impl Serialize for VersionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.collect_str(self);
    }
}

impl<'de> Deserialize<'de> for VersionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        return raw.parse().map_err(D::Error::custom);
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::VersionId;
    use crate::error::LocatorError;

    #[test]
    fn round_trips_through_display() {
        let id: VersionId = "519665f6223ebd6980884f2b".parse().unwrap();
        assert_eq!(id.to_string(), "519665f6223ebd6980884f2b");
    }

    #[test]
    fn mixed_case_normalizes_to_lowercase() {
        let id: VersionId = "519665F6223EBD6980884F2B".parse().unwrap();
        assert_eq!(id.to_string(), "519665f6223ebd6980884f2b");
    }

    #[test]
    fn rejects_wrong_length() {
        let result = "519665f6".parse::<VersionId>();
        assert!(matches!(result, Err(LocatorError::InvalidIdentifier { .. })));
    }

    #[test]
    fn rejects_non_hex() {
        let result = "zz9665f6223ebd6980884f2b".parse::<VersionId>();
        assert!(matches!(result, Err(LocatorError::InvalidIdentifier { .. })));
    }

    #[test]
    fn serde_uses_hex_string_form() {
        let id: VersionId = "519665f6223ebd6980884f2b".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"519665f6223ebd6980884f2b\"");
        let back: VersionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
