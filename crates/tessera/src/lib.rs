//! Stateless signed session tokens.
//!
//! A token binds an application payload to its issuance time with an
//! Ed25519 signature and, optionally, seals the payload with
//! XChaCha20-Poly1305:
//!
//! ```text
//! 1700000000.pGRhdGE.<64-byte signature, base64url>
//! ```
//!
//! Servers validate tokens by recomputation alone. No session store, no
//! lookup, only the key pair.
//!
//! # Modules
//!
//! - [`authenticator`] - issuing and validating tokens
//! - [`segment`] - delimiter-safe segment encoding
//! - [`serializer`] - payload serializers (MessagePack, CBOR, JSON)
//! - [`cipher`] - optional payload confidentiality
//! - [`clock`] - injectable time source
//! - [`config`] - TOML-loadable settings
//! - [`error`] - error taxonomy
//!
//! # Example
//!
//! ```rust
//! use tessera::{AeadKey, Authenticator, Ed25519SigningKey, TokenError};
//!
//! let auth = Authenticator::<String>::from_signing_key(Ed25519SigningKey::generate())
//!     .with_encryption_key(&AeadKey::generate());
//!
//! let token = auth.generate(&"data".to_string()).unwrap();
//! assert_eq!(auth.decode(&token, 60).unwrap(), "data");
//!
//! let other = Authenticator::<String>::from_signing_key(Ed25519SigningKey::generate());
//! assert_eq!(other.decode(&token, 60), Err(TokenError::Tampered));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod authenticator;
pub mod cipher;
pub mod clock;
pub mod config;
pub mod error;
pub mod segment;
pub mod serializer;
mod token;

pub use authenticator::Authenticator;
pub use cipher::{PayloadCipher, Plaintext, XChaCha20Cipher};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AuthenticatorConfig, ConfigError};
pub use error::{ErrorKind, Section, TokenError, TokenResult};
pub use serializer::{Cbor, Json, MessagePack, PayloadFormat, PayloadSerializer, SerializerError};
pub use token::Token;

pub use tessera_crypto::{AeadKey, CryptoError, Ed25519SigningKey, Ed25519VerifyingKey};
