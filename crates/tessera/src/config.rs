//! Authenticator configuration.
//!
//! Keys are carried as unpadded URL-safe base64, the same alphabet tokens
//! use, so a config file can be written with the tooling used to inspect
//! tokens.
//!
//! ```toml
//! signing_key = "nWGxne_9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A"
//! encryption_key = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8"
//! payload_format = "cbor"
//! ```

use serde::{Deserialize, Serialize};
use tessera_crypto::{AeadKey, CryptoError, Ed25519SigningKey, Ed25519VerifyingKey};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::authenticator::Authenticator;
use crate::segment;
use crate::serializer::PayloadFormat;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A key field is not valid base64.
    #[error("{field} is not valid base64url: {source}")]
    KeyEncoding {
        /// Config field name.
        field: &'static str,
        /// Underlying decode failure.
        #[source]
        source: segment::DecodeError,
    },

    /// A key field decoded to unusable key material.
    #[error("{field} is not a usable key: {source}")]
    InvalidKey {
        /// Config field name.
        field: &'static str,
        /// Underlying key error.
        #[source]
        source: CryptoError,
    },
}

/// Serializable authenticator settings.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthenticatorConfig {
    /// Ed25519 seed (32 bytes).
    pub signing_key: String,

    /// Ed25519 public key (32 bytes). Derived from `signing_key` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifying_key: Option<String>,

    /// XChaCha20-Poly1305 key (32 bytes). Payloads are sealed when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,

    /// Payload wire format.
    ///
    /// Default: `msgpack`
    #[serde(default)]
    pub payload_format: PayloadFormat,
}

impl AuthenticatorConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on syntax errors, missing `signing_key`
    /// or unknown fields.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// A configuration with freshly generated signing and encryption keys.
    #[must_use]
    pub fn generate() -> Self {
        let signing_key = Ed25519SigningKey::generate();
        let encryption_key = AeadKey::generate();
        let seed = Zeroizing::new(signing_key.to_bytes());
        Self {
            signing_key: segment::encode(seed.as_slice()),
            verifying_key: Some(segment::encode(signing_key.verifying_key().to_bytes())),
            encryption_key: Some(segment::encode(encryption_key.as_bytes())),
            payload_format: PayloadFormat::default(),
        }
    }

    /// Build an authenticator for payload type `P`.
    ///
    /// # Errors
    ///
    /// Returns an error if any key field is malformed.
    pub fn build<P>(&self) -> Result<Authenticator<P, PayloadFormat>, ConfigError> {
        let signing_key = decode_key(
            "signing_key",
            &self.signing_key,
            Ed25519SigningKey::try_from_slice,
        )?;
        let verifying_key = match &self.verifying_key {
            Some(text) => decode_key("verifying_key", text, Ed25519VerifyingKey::try_from_slice)?,
            None => signing_key.verifying_key(),
        };

        let mut authenticator =
            Authenticator::new(signing_key, verifying_key).with_serializer(self.payload_format);
        if let Some(text) = &self.encryption_key {
            let key = decode_key("encryption_key", text, AeadKey::try_from_slice)?;
            authenticator = authenticator.with_encryption_key(&key);
        }
        Ok(authenticator)
    }
}

fn decode_key<K>(
    field: &'static str,
    text: &str,
    parse: impl FnOnce(&[u8]) -> Result<K, CryptoError>,
) -> Result<K, ConfigError> {
    let bytes = segment::decode(text.trim())
        .map(Zeroizing::new)
        .map_err(|source| ConfigError::KeyEncoding { field, source })?;
    parse(&bytes).map_err(|source| ConfigError::InvalidKey { field, source })
}

impl std::fmt::Debug for AuthenticatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatorConfig")
            .field("signing_key", &"<redacted>")
            .field("verifying_key", &self.verifying_key)
            .field(
                "encryption_key",
                &self.encryption_key.as_ref().map(|_| "<redacted>"),
            )
            .field("payload_format", &self.payload_format)
            .finish()
    }
}
