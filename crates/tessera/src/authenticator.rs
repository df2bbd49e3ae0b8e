//! Token issuance and validation.
//!
//! ## Wire format
//!
//! ```text
//! <timestamp>.<segment(sealed(serialized payload))>.<segment(signature)>
//! ```
//!
//! The signature covers the literal bytes `<timestamp>.<payload segment>` as
//! they appear in the token text.
//!
//! ## Validation order
//!
//! 1. exactly three sections
//! 2. decimal timestamp
//! 3. `now - ttl <= timestamp`
//! 4. signature segment decodes
//! 5. signature verifies over the token prefix ending at the last delimiter
//! 6. payload segment decodes
//! 7. payload cipher opens
//! 8. payload deserializes
//!
//! Expiry is checked before the signature, so whether a timestamp is still
//! fresh can be learned without a valid signature. The timestamp is not
//! secret. Nothing after step 5 runs on unauthenticated bytes.
//!
//! ## Logging
//!
//! Issuance emits a `trace` event and each rejection a `debug` event carrying
//! only the [`ErrorKind`](crate::error::ErrorKind) and the ttl. Token text,
//! payload bytes and keys are never recorded.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tessera_crypto::{AeadKey, Ed25519Signature, Ed25519SigningKey, Ed25519VerifyingKey};

use crate::cipher::{PayloadCipher, Plaintext, XChaCha20Cipher};
use crate::clock::{Clock, SystemClock};
use crate::error::{Section, TokenError, TokenResult};
use crate::segment::{self, DELIMITER};
use crate::serializer::{MessagePack, PayloadSerializer};
use crate::token::Token;

/// Issues and validates tokens carrying a payload of type `P`.
///
/// Immutable after construction and safe to share across threads.
pub struct Authenticator<P, S = MessagePack> {
    signing_key: Ed25519SigningKey,
    verifying_key: Ed25519VerifyingKey,
    cipher: Arc<dyn PayloadCipher>,
    clock: Arc<dyn Clock>,
    serializer: S,
    _payload: PhantomData<fn() -> P>,
}

impl<P> Authenticator<P, MessagePack> {
    /// Create an authenticator that signs with `signing_key` and verifies
    /// with `verifying_key`.
    ///
    /// Defaults: MessagePack payloads, no confidentiality, system clock.
    #[must_use]
    pub fn new(signing_key: Ed25519SigningKey, verifying_key: Ed25519VerifyingKey) -> Self {
        Self {
            signing_key,
            verifying_key,
            cipher: Arc::new(Plaintext),
            clock: Arc::new(SystemClock),
            serializer: MessagePack,
            _payload: PhantomData,
        }
    }

    /// Create an authenticator whose verifying key is derived from
    /// `signing_key`.
    #[must_use]
    pub fn from_signing_key(signing_key: Ed25519SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self::new(signing_key, verifying_key)
    }
}

impl<P, S> Authenticator<P, S> {
    /// Seal payloads with XChaCha20-Poly1305 under `key`.
    #[must_use]
    pub fn with_encryption_key(self, key: &AeadKey) -> Self {
        self.with_cipher(XChaCha20Cipher::new(key))
    }

    /// Replace the payload cipher.
    #[must_use]
    pub fn with_cipher(mut self, cipher: impl PayloadCipher + 'static) -> Self {
        self.cipher = Arc::new(cipher);
        self
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the payload serializer.
    #[must_use]
    pub fn with_serializer<T: PayloadSerializer>(self, serializer: T) -> Authenticator<P, T> {
        Authenticator {
            signing_key: self.signing_key,
            verifying_key: self.verifying_key,
            cipher: self.cipher,
            clock: self.clock,
            serializer,
            _payload: PhantomData,
        }
    }

    /// Public key used to verify tokens.
    #[must_use]
    pub const fn verifying_key(&self) -> &Ed25519VerifyingKey {
        &self.verifying_key
    }

    /// Whether payloads are sealed before encoding.
    #[must_use]
    pub fn is_confidential(&self) -> bool {
        self.cipher.is_confidential()
    }
}

impl<P: Serialize, S: PayloadSerializer> Authenticator<P, S> {
    /// Issue a token for `payload`, timestamped with the current time.
    ///
    /// # Errors
    ///
    /// [`TokenError::Serialization`] or [`TokenError::Encryption`].
    pub fn generate(&self, payload: &P) -> TokenResult<Token> {
        let plaintext = self
            .serializer
            .serialize(payload)
            .map_err(TokenError::Serialization)?;
        let sealed = self.cipher.seal(&plaintext).map_err(TokenError::Encryption)?;

        let issued_at = self.clock.now();
        let delimiter = char::from(DELIMITER);
        let mut text = format!("{issued_at}{delimiter}{}", segment::encode(&sealed));

        let signature = self.signing_key.sign(text.as_bytes());
        text.push(delimiter);
        text.push_str(&segment::encode(signature.to_bytes()));

        tracing::trace!(
            payload_len = plaintext.len(),
            sealed = self.cipher.is_confidential(),
            "token issued"
        );
        Ok(Token::new(text))
    }
}

impl<P: DeserializeOwned, S: PayloadSerializer> Authenticator<P, S> {
    /// Validate `token` and return its payload.
    ///
    /// `ttl` is the maximum age in seconds; a token issued at `T` is accepted
    /// up to and including `T + ttl`.
    ///
    /// # Errors
    ///
    /// Any [`TokenError`] other than `Serialization`/`Encryption`. Callers
    /// should treat every error as "reject the token".
    pub fn decode(&self, token: impl AsRef<[u8]>, ttl: u64) -> TokenResult<P> {
        self.validate(token.as_ref(), ttl).inspect_err(|err| {
            tracing::debug!(kind = %err.kind(), ttl, "token rejected");
        })
    }

    /// Validate `token` and store its payload in `dst`.
    ///
    /// `dst` is left untouched on error.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode).
    pub fn parse(&self, token: impl AsRef<[u8]>, dst: &mut P, ttl: u64) -> TokenResult<()> {
        *dst = self.decode(token, ttl)?;
        Ok(())
    }

    fn validate(&self, token: &[u8], ttl: u64) -> TokenResult<P> {
        let sections: Vec<&[u8]> = token.split(|b| *b == DELIMITER).collect();
        let &[timestamp, payload, signature] = sections.as_slice() else {
            return Err(TokenError::Structure {
                sections: sections.len(),
            });
        };

        let issued_at = parse_timestamp(timestamp)?;
        let now = self.clock.now();
        if now.saturating_sub(i64::try_from(ttl).unwrap_or(i64::MAX)) > issued_at {
            return Err(TokenError::Expired {
                issued_at,
                now,
                ttl,
            });
        }

        let signature = segment::decode(signature).map_err(|source| TokenError::MalformedSegment {
            section: Section::Signature,
            source,
        })?;
        let signature =
            Ed25519Signature::try_from_slice(&signature).map_err(|_| TokenError::Tampered)?;

        // Three sections means at least two delimiters, so this always hits.
        let signed_len = token
            .iter()
            .rposition(|b| *b == DELIMITER)
            .ok_or(TokenError::Structure { sections: 1 })?;
        self.verifying_key
            .verify(&token[..signed_len], &signature)
            .map_err(|_| TokenError::Tampered)?;

        let sealed = segment::decode(payload).map_err(|source| TokenError::MalformedSegment {
            section: Section::Payload,
            source,
        })?;
        let plaintext = self.cipher.open(&sealed).map_err(TokenError::Decryption)?;

        self.serializer
            .deserialize(&plaintext)
            .map_err(TokenError::Deserialization)
    }
}

fn parse_timestamp(segment: &[u8]) -> TokenResult<i64> {
    std::str::from_utf8(segment)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or(TokenError::InvalidTimestamp)
}

impl<P, S: Clone> Clone for Authenticator<P, S> {
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
            verifying_key: self.verifying_key.clone(),
            cipher: Arc::clone(&self.cipher),
            clock: Arc::clone(&self.clock),
            serializer: self.serializer.clone(),
            _payload: PhantomData,
        }
    }
}

impl<P, S: std::fmt::Debug> std::fmt::Debug for Authenticator<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("verifying_key", &self.verifying_key)
            .field("confidential", &self.cipher.is_confidential())
            .field("serializer", &self.serializer)
            .finish_non_exhaustive()
    }
}
