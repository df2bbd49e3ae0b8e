//! Error types for token issuance and validation.

use tessera_crypto::CryptoError;
use thiserror::Error;

use crate::segment::DecodeError;
use crate::serializer::SerializerError;

/// Which encoded token segment failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The middle segment carrying the (sealed) payload.
    Payload,
    /// The trailing signature segment.
    Signature,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payload => write!(f, "payload"),
            Self::Signature => write!(f, "signature"),
        }
    }
}

/// Errors returned by [`Authenticator`](crate::Authenticator).
///
/// Messages never include token text, payload bytes or key material. Any
/// error from `parse`/`decode` means the token must be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token does not have exactly three segments.
    #[error("expected 3 sections in token, got {sections}")]
    Structure {
        /// Number of delimiter-separated sections found.
        sections: usize,
    },

    /// The timestamp segment is not a base-10 integer.
    #[error("invalid timestamp segment")]
    InvalidTimestamp,

    /// The token was issued more than `ttl` seconds ago.
    #[error("authentication expired")]
    Expired {
        /// Issuance time carried by the token.
        issued_at: i64,
        /// Verification time.
        now: i64,
        /// Allowed age in seconds.
        ttl: u64,
    },

    /// A segment is not valid segment encoding.
    #[error("malformed {section} segment: {source}")]
    MalformedSegment {
        /// Which segment failed.
        section: Section,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// Signature verification failed.
    #[error("payload or signature was modified")]
    Tampered,

    /// The payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Serialization(#[source] SerializerError),

    /// The verified payload bytes did not deserialize into the payload type.
    #[error("payload deserialization failed: {0}")]
    Deserialization(#[source] SerializerError),

    /// Sealing the payload failed.
    #[error("payload encryption failed: {0}")]
    Encryption(#[source] CryptoError),

    /// Opening the sealed payload failed.
    #[error("payload decryption failed: {0}")]
    Decryption(#[source] CryptoError),
}

/// Coarse, copyable classification of a [`TokenError`], for branching and
/// metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// [`TokenError::Structure`] or [`TokenError::InvalidTimestamp`].
    Structural,
    /// [`TokenError::Expired`].
    Expired,
    /// [`TokenError::MalformedSegment`].
    MalformedSegment,
    /// [`TokenError::Tampered`].
    Tampered,
    /// [`TokenError::Serialization`].
    Serialization,
    /// [`TokenError::Deserialization`].
    Deserialization,
    /// [`TokenError::Encryption`].
    Encryption,
    /// [`TokenError::Decryption`].
    Decryption,
}

impl ErrorKind {
    /// Stable snake_case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Expired => "expired",
            Self::MalformedSegment => "malformed_segment",
            Self::Tampered => "tampered",
            Self::Serialization => "serialization",
            Self::Deserialization => "deserialization",
            Self::Encryption => "encryption",
            Self::Decryption => "decryption",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TokenError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Structure { .. } | Self::InvalidTimestamp => ErrorKind::Structural,
            Self::Expired { .. } => ErrorKind::Expired,
            Self::MalformedSegment { .. } => ErrorKind::MalformedSegment,
            Self::Tampered => ErrorKind::Tampered,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Deserialization(_) => ErrorKind::Deserialization,
            Self::Encryption(_) => ErrorKind::Encryption,
            Self::Decryption(_) => ErrorKind::Decryption,
        }
    }

    /// True for errors raised while validating a token, false for errors
    /// raised while issuing one.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        !matches!(self, Self::Serialization(_) | Self::Encryption(_))
    }
}

/// Result type alias for token operations.
pub type TokenResult<T> = Result<T, TokenError>;
