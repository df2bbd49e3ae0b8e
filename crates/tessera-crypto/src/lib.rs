//! Cryptographic primitives behind tessera tokens.
//!
//! Tokens are signed with Ed25519 and, when confidentiality is requested,
//! their payload is sealed with XChaCha20-Poly1305. This crate wraps both
//! primitives so that secret material is zeroized on drop and never shows up
//! in `Debug` output.
//!
//! # Modules
//!
//! - [`ed25519`] - Ed25519 signing and verification
//! - [`aead`] - XChaCha20-Poly1305 AEAD
//! - [`error`] - shared error type
//!
//! # Example
//!
//! ```rust
//! use tessera_crypto::{AeadKey, Ed25519SigningKey, XChaCha20Poly1305Cipher};
//!
//! let sk = Ed25519SigningKey::generate();
//! let signature = sk.sign(b"1700000000.cGF5bG9hZA");
//! assert!(sk.verifying_key().verify(b"1700000000.cGF5bG9hZA", &signature).is_ok());
//!
//! let cipher = XChaCha20Poly1305Cipher::new(&AeadKey::generate());
//! let sealed = cipher.encrypt_with_random_nonce(b"payload", b"").unwrap();
//! assert_eq!(cipher.decrypt_with_prepended_nonce(&sealed, b"").unwrap(), b"payload");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aead;
pub mod ed25519;
pub mod error;

pub use aead::{AEAD_KEY_SIZE, AeadKey, XChaCha20Nonce, XChaCha20Poly1305Cipher};
pub use ed25519::{
    Ed25519Signature, Ed25519SigningKey, Ed25519VerifyingKey, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE,
    SIGNATURE_SIZE,
};
pub use error::{CryptoError, CryptoResult};
