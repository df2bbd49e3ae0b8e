//! Payload serializers.
//!
//! The authenticator never looks inside a payload; it only needs a way to
//! turn `P` into bytes and back. [`PayloadSerializer`] is that contract and
//! this module ships MessagePack, CBOR and JSON implementations plus a
//! runtime-selectable [`PayloadFormat`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializer failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializerError {
    /// The value could not be represented in the wire format.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The bytes do not describe a value of the requested shape.
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Converts payload values to and from bytes.
///
/// Implementations must round-trip: `deserialize(serialize(v)) == v` for every
/// value they accept.
pub trait PayloadSerializer: Send + Sync {
    /// Encode a value.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError::Encode`] if the value cannot be represented.
    fn serialize<P: Serialize>(&self, value: &P) -> Result<Vec<u8>, SerializerError>;

    /// Decode a value of type `P`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError::Decode`] on malformed input or a shape mismatch.
    fn deserialize<P: DeserializeOwned>(&self, bytes: &[u8]) -> Result<P, SerializerError>;
}

/// MessagePack with struct fields encoded as named maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessagePack;

impl PayloadSerializer for MessagePack {
    fn serialize<P: Serialize>(&self, value: &P) -> Result<Vec<u8>, SerializerError> {
        rmp_serde::to_vec_named(value).map_err(|e| SerializerError::Encode(e.to_string()))
    }

    fn deserialize<P: DeserializeOwned>(&self, bytes: &[u8]) -> Result<P, SerializerError> {
        rmp_serde::from_slice(bytes).map_err(|e| SerializerError::Decode(e.to_string()))
    }
}

/// CBOR (RFC 8949) via `ciborium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cbor;

impl PayloadSerializer for Cbor {
    fn serialize<P: Serialize>(&self, value: &P) -> Result<Vec<u8>, SerializerError> {
        let mut bytes = Vec::new();
        ciborium::into_writer(value, &mut bytes)
            .map_err(|e| SerializerError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    fn deserialize<P: DeserializeOwned>(&self, bytes: &[u8]) -> Result<P, SerializerError> {
        ciborium::from_reader(bytes).map_err(|e| SerializerError::Decode(e.to_string()))
    }
}

/// Compact JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json;

impl PayloadSerializer for Json {
    fn serialize<P: Serialize>(&self, value: &P) -> Result<Vec<u8>, SerializerError> {
        serde_json::to_vec(value).map_err(|e| SerializerError::Encode(e.to_string()))
    }

    fn deserialize<P: DeserializeOwned>(&self, bytes: &[u8]) -> Result<P, SerializerError> {
        serde_json::from_slice(bytes).map_err(|e| SerializerError::Decode(e.to_string()))
    }
}

/// Serializer chosen at runtime, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// [`MessagePack`].
    #[default]
    #[serde(alias = "messagepack")]
    Msgpack,
    /// [`Cbor`].
    Cbor,
    /// [`Json`].
    Json,
}

impl PayloadSerializer for PayloadFormat {
    fn serialize<P: Serialize>(&self, value: &P) -> Result<Vec<u8>, SerializerError> {
        match self {
            Self::Msgpack => MessagePack.serialize(value),
            Self::Cbor => Cbor.serialize(value),
            Self::Json => Json.serialize(value),
        }
    }

    fn deserialize<P: DeserializeOwned>(&self, bytes: &[u8]) -> Result<P, SerializerError> {
        match self {
            Self::Msgpack => MessagePack.deserialize(bytes),
            Self::Cbor => Cbor.deserialize(bytes),
            Self::Json => Json.deserialize(bytes),
        }
    }
}

impl std::fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Msgpack => write!(f, "msgpack"),
            Self::Cbor => write!(f, "cbor"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Session {
        user_id: u64,
        roles: Vec<String>,
        attrs: BTreeMap<String, String>,
    }

    fn session() -> Session {
        Session {
            user_id: 42,
            roles: vec!["admin".into(), "billing".into()],
            attrs: BTreeMap::from([("tenant".into(), "acme".into())]),
        }
    }

    fn roundtrip<S: PayloadSerializer>(serializer: &S) {
        let bytes = serializer.serialize(&session()).unwrap();
        let back: Session = serializer.deserialize(&bytes).unwrap();
        assert_eq!(back, session());
    }

    #[test]
    fn every_format_roundtrips() {
        roundtrip(&MessagePack);
        roundtrip(&Cbor);
        roundtrip(&Json);
        roundtrip(&PayloadFormat::Msgpack);
        roundtrip(&PayloadFormat::Cbor);
        roundtrip(&PayloadFormat::Json);
    }

    #[test]
    fn msgpack_string_matches_reference_bytes() {
        // fixstr header 0xa4 followed by the UTF-8 bytes.
        assert_eq!(
            MessagePack.serialize(&"data").unwrap(),
            [0xa4, b'd', b'a', b't', b'a']
        );
    }

    #[test]
    fn msgpack_struct_uses_field_names() {
        let bytes = MessagePack.serialize(&session()).unwrap();
        assert!(bytes.windows(b"user_id".len()).any(|w| w == b"user_id"));
    }

    #[test]
    fn shape_mismatch_is_decode_error() {
        let bytes = MessagePack.serialize(&"not a session").unwrap();
        let err = MessagePack.deserialize::<Session>(&bytes).unwrap_err();
        assert!(matches!(err, SerializerError::Decode(_)));

        let err = Json.deserialize::<u8>(b"300").unwrap_err();
        assert!(matches!(err, SerializerError::Decode(_)));
    }

    #[test]
    fn truncated_input_is_decode_error() {
        let bytes = Cbor.serialize(&session()).unwrap();
        let err = Cbor
            .deserialize::<Session>(&bytes[..bytes.len() / 2])
            .unwrap_err();
        assert!(matches!(err, SerializerError::Decode(_)));
    }

    #[test]
    fn json_rejects_non_string_map_keys() {
        let map = BTreeMap::from([((1u8, 2u8), "pair")]);
        assert!(matches!(
            Json.serialize(&map),
            Err(SerializerError::Encode(_))
        ));
    }

    #[test]
    fn format_names() {
        let parsed: PayloadFormat = serde_json::from_str("\"cbor\"").unwrap();
        assert_eq!(parsed, PayloadFormat::Cbor);
        let alias: PayloadFormat = serde_json::from_str("\"messagepack\"").unwrap();
        assert_eq!(alias, PayloadFormat::Msgpack);
        assert_eq!(PayloadFormat::default().to_string(), "msgpack");
    }
}
