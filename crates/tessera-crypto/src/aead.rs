//! XChaCha20-Poly1305 authenticated encryption.
//!
//! Sealed payloads are laid out as `nonce || ciphertext || tag` so a single
//! byte string carries everything needed to open it again.

use crate::error::{CryptoError, CryptoResult};
use chacha20poly1305::{
    XChaCha20Poly1305,
    aead::{Aead, KeyInit, Payload},
};
use zeroize::ZeroizeOnDrop;

/// AEAD key size (256 bits).
pub const AEAD_KEY_SIZE: usize = 32;

/// XChaCha20-Poly1305 nonce size (192 bits / 24 bytes).
pub const XCHACHA20_NONCE_SIZE: usize = 24;

/// Poly1305 authentication tag size (128 bits / 16 bytes).
pub const AEAD_TAG_SIZE: usize = 16;

/// AEAD encryption key with zeroize semantics.
#[derive(Clone, ZeroizeOnDrop)]
pub struct AeadKey {
    bytes: [u8; AEAD_KEY_SIZE],
}

impl AeadKey {
    /// Create a new AEAD key from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; AEAD_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh random key from the OS RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; AEAD_KEY_SIZE];
        rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut bytes);
        Self { bytes }
    }

    /// Try to create from a slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly `AEAD_KEY_SIZE` bytes.
    pub fn try_from_slice(slice: &[u8]) -> CryptoResult<Self> {
        let bytes: [u8; AEAD_KEY_SIZE] =
            slice.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: AEAD_KEY_SIZE,
                actual: slice.len(),
            })?;
        Ok(Self { bytes })
    }

    /// Get the key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; AEAD_KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for AeadKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AeadKey").finish_non_exhaustive()
    }
}

/// XChaCha20-Poly1305 nonce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XChaCha20Nonce([u8; XCHACHA20_NONCE_SIZE]);

impl XChaCha20Nonce {
    /// Create from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; XCHACHA20_NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Generate a random nonce.
    ///
    /// The 192-bit nonce is safe to draw at random for every message.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; XCHACHA20_NONCE_SIZE];
        rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut bytes);
        Self(bytes)
    }

    /// Get the nonce bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; XCHACHA20_NONCE_SIZE] {
        &self.0
    }
}

/// XChaCha20-Poly1305 AEAD cipher.
pub struct XChaCha20Poly1305Cipher {
    cipher: XChaCha20Poly1305,
}

impl XChaCha20Poly1305Cipher {
    /// Create a new cipher from a key.
    #[must_use]
    pub fn new(key: &AeadKey) -> Self {
        let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
        Self { cipher }
    }

    /// Encrypt plaintext with associated data under an explicit nonce.
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails.
    pub fn encrypt(
        &self,
        nonce: &XChaCha20Nonce,
        plaintext: &[u8],
        aad: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        let payload = Payload {
            msg: plaintext,
            aad,
        };
        self.cipher
            .encrypt(nonce.as_bytes().into(), payload)
            .map_err(|_| CryptoError::AeadEncryptFailed)
    }

    /// Decrypt ciphertext with associated data.
    ///
    /// # Errors
    ///
    /// Returns an error on authentication failure.
    pub fn decrypt(
        &self,
        nonce: &XChaCha20Nonce,
        ciphertext: &[u8],
        aad: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        let payload = Payload {
            msg: ciphertext,
            aad,
        };
        self.cipher
            .decrypt(nonce.as_bytes().into(), payload)
            .map_err(|_| CryptoError::AeadDecryptFailed)
    }

    /// Encrypt with a random nonce, returning `nonce || ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails.
    pub fn encrypt_with_random_nonce(
        &self,
        plaintext: &[u8],
        aad: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        let nonce = XChaCha20Nonce::generate();
        let ciphertext = self.encrypt(&nonce, plaintext, aad)?;
        let mut sealed = Vec::with_capacity(XCHACHA20_NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(nonce.as_bytes());
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Decrypt `nonce || ciphertext` as produced by
    /// [`encrypt_with_random_nonce`](Self::encrypt_with_random_nonce).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is too short or authentication fails.
    pub fn decrypt_with_prepended_nonce(
        &self,
        nonce_and_ciphertext: &[u8],
        aad: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        if nonce_and_ciphertext.len() < XCHACHA20_NONCE_SIZE + AEAD_TAG_SIZE {
            return Err(CryptoError::AeadDecryptFailed);
        }
        let (nonce, ciphertext) = nonce_and_ciphertext.split_at(XCHACHA20_NONCE_SIZE);
        let mut nonce_bytes = [0u8; XCHACHA20_NONCE_SIZE];
        nonce_bytes.copy_from_slice(nonce);
        self.decrypt(&XChaCha20Nonce::from_bytes(nonce_bytes), ciphertext, aad)
    }
}

impl std::fmt::Debug for XChaCha20Poly1305Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XChaCha20Poly1305Cipher")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_nonce_roundtrip() {
        let cipher = XChaCha20Poly1305Cipher::new(&AeadKey::generate());

        let sealed = cipher.encrypt_with_random_nonce(b"session", b"ctx").unwrap();
        assert_eq!(
            sealed.len(),
            XCHACHA20_NONCE_SIZE + b"session".len() + AEAD_TAG_SIZE
        );

        let opened = cipher.decrypt_with_prepended_nonce(&sealed, b"ctx").unwrap();
        assert_eq!(opened, b"session");
    }

    #[test]
    fn fresh_nonce_per_message() {
        let cipher = XChaCha20Poly1305Cipher::new(&AeadKey::generate());
        let a = cipher.encrypt_with_random_nonce(b"same", b"").unwrap();
        let b = cipher.encrypt_with_random_nonce(b"same", b"").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails() {
        let sealed = XChaCha20Poly1305Cipher::new(&AeadKey::generate())
            .encrypt_with_random_nonce(b"secret", b"aad")
            .unwrap();
        let result = XChaCha20Poly1305Cipher::new(&AeadKey::generate())
            .decrypt_with_prepended_nonce(&sealed, b"aad");
        assert_eq!(result, Err(CryptoError::AeadDecryptFailed));
    }

    #[test]
    fn wrong_aad_fails() {
        let cipher = XChaCha20Poly1305Cipher::new(&AeadKey::generate());
        let sealed = cipher.encrypt_with_random_nonce(b"secret", b"aad1").unwrap();
        assert_eq!(
            cipher.decrypt_with_prepended_nonce(&sealed, b"aad2"),
            Err(CryptoError::AeadDecryptFailed)
        );
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let cipher = XChaCha20Poly1305Cipher::new(&AeadKey::generate());
        let mut sealed = cipher.encrypt_with_random_nonce(b"secret", b"").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert_eq!(
            cipher.decrypt_with_prepended_nonce(&sealed, b""),
            Err(CryptoError::AeadDecryptFailed)
        );
    }

    #[test]
    fn short_input_fails() {
        let cipher = XChaCha20Poly1305Cipher::new(&AeadKey::generate());
        let short = [0u8; XCHACHA20_NONCE_SIZE + AEAD_TAG_SIZE - 1];
        assert_eq!(
            cipher.decrypt_with_prepended_nonce(&short, b""),
            Err(CryptoError::AeadDecryptFailed)
        );
    }

    #[test]
    fn empty_plaintext_is_tag_only() {
        let key = AeadKey::from_bytes([9u8; AEAD_KEY_SIZE]);
        let cipher = XChaCha20Poly1305Cipher::new(&key);
        let nonce = XChaCha20Nonce::from_bytes([1u8; XCHACHA20_NONCE_SIZE]);

        let ciphertext = cipher.encrypt(&nonce, b"", b"").unwrap();
        assert_eq!(ciphertext.len(), AEAD_TAG_SIZE);
        assert!(cipher.decrypt(&nonce, &ciphertext, b"").unwrap().is_empty());
    }

    #[test]
    fn key_from_slice_checks_length() {
        assert!(AeadKey::try_from_slice(&[0u8; AEAD_KEY_SIZE]).is_ok());
        assert_eq!(
            AeadKey::try_from_slice(&[0u8; 16]).unwrap_err(),
            CryptoError::InvalidKeyLength {
                expected: AEAD_KEY_SIZE,
                actual: 16
            }
        );
    }

    #[test]
    fn debug_output_hides_key() {
        let key = AeadKey::from_bytes([0xAB; AEAD_KEY_SIZE]);
        assert_eq!(format!("{key:?}"), "AeadKey { .. }");
    }
}
