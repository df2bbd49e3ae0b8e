//! Payload confidentiality.
//!
//! The authenticator always runs the serialized payload through a
//! [`PayloadCipher`]. [`Plaintext`] is the identity, so issuing and
//! validating follow the same path whether or not confidentiality is on.

use tessera_crypto::{AeadKey, CryptoResult, XChaCha20Poly1305Cipher};

/// Associated data bound into every sealed payload.
const PAYLOAD_AAD: &[u8] = b"tessera-payload-v1";

/// Seals serialized payload bytes before encoding and opens them after
/// signature verification.
pub trait PayloadCipher: Send + Sync {
    /// Seal plaintext payload bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying cipher fails.
    fn seal(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Open sealed payload bytes.
    ///
    /// # Errors
    ///
    /// Returns an error on authentication failure or malformed input.
    fn open(&self, sealed: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Whether sealing hides the payload.
    fn is_confidential(&self) -> bool;
}

/// Identity cipher: payloads travel as signed plaintext.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plaintext;

impl PayloadCipher for Plaintext {
    fn seal(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        Ok(plaintext.to_vec())
    }

    fn open(&self, sealed: &[u8]) -> CryptoResult<Vec<u8>> {
        Ok(sealed.to_vec())
    }

    fn is_confidential(&self) -> bool {
        false
    }
}

/// XChaCha20-Poly1305 with a random nonce per token.
///
/// Output layout is `nonce (24) || ciphertext || tag (16)`.
#[derive(Debug)]
pub struct XChaCha20Cipher {
    inner: XChaCha20Poly1305Cipher,
}

impl XChaCha20Cipher {
    /// Create a cipher keyed by `key`.
    #[must_use]
    pub fn new(key: &AeadKey) -> Self {
        Self {
            inner: XChaCha20Poly1305Cipher::new(key),
        }
    }
}

impl PayloadCipher for XChaCha20Cipher {
    fn seal(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.inner.encrypt_with_random_nonce(plaintext, PAYLOAD_AAD)
    }

    fn open(&self, sealed: &[u8]) -> CryptoResult<Vec<u8>> {
        self.inner.decrypt_with_prepended_nonce(sealed, PAYLOAD_AAD)
    }

    fn is_confidential(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_crypto::CryptoError;

    #[test]
    fn plaintext_is_identity() {
        assert_eq!(Plaintext.seal(b"abc").unwrap(), b"abc");
        assert_eq!(Plaintext.open(b"abc").unwrap(), b"abc");
        assert!(!Plaintext.is_confidential());
    }

    #[test]
    fn xchacha_roundtrip_hides_plaintext() {
        let cipher = XChaCha20Cipher::new(&AeadKey::generate());
        let sealed = cipher.seal(b"user=42").unwrap();

        assert!(!sealed.windows(7).any(|w| w == b"user=42"));
        assert_eq!(cipher.open(&sealed).unwrap(), b"user=42");
        assert!(cipher.is_confidential());
    }

    #[test]
    fn xchacha_rejects_other_key() {
        let sealed = XChaCha20Cipher::new(&AeadKey::generate())
            .seal(b"payload")
            .unwrap();
        let other = XChaCha20Cipher::new(&AeadKey::generate());
        assert_eq!(other.open(&sealed), Err(CryptoError::AeadDecryptFailed));
    }

    #[test]
    fn xchacha_rejects_foreign_associated_data() {
        let key = AeadKey::generate();
        let sealed = XChaCha20Poly1305Cipher::new(&key)
            .encrypt_with_random_nonce(b"payload", b"other-format")
            .unwrap();
        assert_eq!(
            XChaCha20Cipher::new(&key).open(&sealed),
            Err(CryptoError::AeadDecryptFailed)
        );
    }
}
