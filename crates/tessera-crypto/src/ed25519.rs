//! Ed25519 signing and verification.
//!
//! Thin wrappers around `ed25519-dalek` that zeroize secret material on drop
//! and keep key bytes out of `Debug` output.

use crate::error::{CryptoError, CryptoResult};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::ZeroizeOnDrop;

/// Ed25519 secret key (seed) size in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Ed25519 public key size in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Ed25519 signature size in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Ed25519 signing key (secret key).
#[derive(ZeroizeOnDrop)]
pub struct Ed25519SigningKey {
    inner: SigningKey,
}

impl Ed25519SigningKey {
    /// Generate a new random signing key from the OS RNG.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            inner: SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    /// Create from a raw 32-byte seed.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_SIZE]) -> Self {
        Self {
            inner: SigningKey::from_bytes(bytes),
        }
    }

    /// Try to create from a slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly `SECRET_KEY_SIZE` bytes.
    pub fn try_from_slice(slice: &[u8]) -> CryptoResult<Self> {
        let bytes: &[u8; SECRET_KEY_SIZE] =
            slice.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: SECRET_KEY_SIZE,
                actual: slice.len(),
            })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Export the seed bytes.
    ///
    /// **Security Warning:** the caller owns zeroizing the returned copy.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.inner.to_bytes()
    }

    /// Get the corresponding verifying (public) key.
    #[must_use]
    pub fn verifying_key(&self) -> Ed25519VerifyingKey {
        Ed25519VerifyingKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Sign a message. Ed25519 signing is deterministic.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature {
            inner: self.inner.sign(message),
        }
    }
}

impl Clone for Ed25519SigningKey {
    fn clone(&self) -> Self {
        Self {
            inner: SigningKey::from_bytes(&self.inner.to_bytes()),
        }
    }
}

impl std::fmt::Debug for Ed25519SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519SigningKey")
            .field("public", &hex::encode(self.inner.verifying_key().as_bytes()))
            .finish_non_exhaustive()
    }
}

/// Ed25519 verifying key (public key).
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519VerifyingKey {
    inner: VerifyingKey,
}

impl Ed25519VerifyingKey {
    /// Create from raw public key bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid compressed Edwards point.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_SIZE]) -> CryptoResult<Self> {
        let inner = VerifyingKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { inner })
    }

    /// Try to create from a slice.
    ///
    /// # Errors
    ///
    /// Returns an error on a length mismatch or an invalid point.
    pub fn try_from_slice(slice: &[u8]) -> CryptoResult<Self> {
        let bytes: &[u8; PUBLIC_KEY_SIZE] =
            slice.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: slice.len(),
            })?;
        Self::from_bytes(bytes)
    }

    /// Export the public key bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.inner.to_bytes()
    }

    /// Verify a signature over a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is invalid.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> CryptoResult<()> {
        self.inner
            .verify(message, &signature.inner)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

impl std::fmt::Debug for Ed25519VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519VerifyingKey({})", hex::encode(self.to_bytes()))
    }
}

/// Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature {
    inner: Signature,
}

impl Ed25519Signature {
    /// Create from raw signature bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Self {
        Self {
            inner: Signature::from_bytes(bytes),
        }
    }

    /// Try to create from a slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not exactly `SIGNATURE_SIZE` bytes.
    pub fn try_from_slice(slice: &[u8]) -> CryptoResult<Self> {
        let bytes: &[u8; SIGNATURE_SIZE] =
            slice
                .try_into()
                .map_err(|_| CryptoError::InvalidSignatureLength {
                    expected: SIGNATURE_SIZE,
                    actual: slice.len(),
                })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Export the signature bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.inner.to_bytes()
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({})", hex::encode(self.to_bytes()))
    }
}
