//! Client identifiers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Length in bytes of a well-formed client identifier.
pub const CLIENT_ID_LEN: usize = 16;

/// Fixed-length opaque client identifier, used as the registry key.
///
/// Serialized as the hyphenated UUID text form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId([u8; CLIENT_ID_LEN]);

impl ClientId {
    /// Sentinel for empty or malformed source values (all bytes zero).
    pub const INVALID: Self = Self([0; CLIENT_ID_LEN]);

    /// Builds an identifier from raw bytes.
    ///
    /// Anything other than exactly [`CLIENT_ID_LEN`] bytes maps to
    /// [`ClientId::INVALID`], never to a partial identifier.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        <[u8; CLIENT_ID_LEN]>::try_from(bytes).map_or(Self::INVALID, Self)
    }

    /// Parses the UUID text form, mapping unparsable input to
    /// [`ClientId::INVALID`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Uuid::parse_str(input.trim()).map_or(Self::INVALID, Self::from)
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new_random() -> Self {
        Self::from(Uuid::new_v4())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CLIENT_ID_LEN] {
        &self.0
    }

    /// Returns `false` for the [`ClientId::INVALID`] sentinel.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// Returns the identifier as a UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.0)
    }
}

impl From<Uuid> for ClientId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.into_bytes())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_uuid().hyphenated(), f)
    }
}

impl Serialize for ClientId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_uuid().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_accepts_exactly_sixteen_bytes() {
        let bytes: Vec<u8> = (1..=16).collect();

        let id = ClientId::from_bytes(&bytes);

        assert!(id.is_valid());
        assert_eq!(id.as_bytes().as_slice(), bytes.as_slice());
    }

    #[test]
    fn test_from_bytes_maps_wrong_lengths_to_invalid() {
        assert_eq!(ClientId::from_bytes(&[]), ClientId::INVALID);
        assert_eq!(ClientId::from_bytes(&[7; 15]), ClientId::INVALID);
        assert_eq!(ClientId::from_bytes(&[7; 17]), ClientId::INVALID);
    }

    #[test]
    fn test_parse_round_trips_uuid_text() {
        let uuid = Uuid::new_v4();

        let id = ClientId::parse(&uuid.to_string());

        assert_eq!(id.as_uuid(), uuid);
        assert_eq!(id.to_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn test_parse_maps_garbage_to_invalid() {
        assert_eq!(ClientId::parse(""), ClientId::INVALID);
        assert_eq!(ClientId::parse("not-a-uuid"), ClientId::INVALID);
        assert!(!ClientId::parse("00000000-0000-0000-0000-000000000000").is_valid());
    }

    #[test]
    fn test_serializes_as_uuid_string() {
        let id = ClientId::new_random();

        let json = serde_json::to_value(id).unwrap();

        assert_eq!(json, serde_json::Value::String(id.to_string()));
        let back: ClientId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }
}
