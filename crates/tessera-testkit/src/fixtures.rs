//! Deterministic fixtures.
//!
//! Keys are fixed so failures reproduce byte for byte; the clock is manual so
//! expiry can be tested without sleeping.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tessera::{AeadKey, Authenticator, Ed25519SigningKey, ManualClock};

// ─────────────────────────────────────────────────────────────────────────────
// Time
// ─────────────────────────────────────────────────────────────────────────────

/// Issuance time used by fixtures (2023-11-14T22:13:20Z).
pub const EPOCH: i64 = 1_700_000_000;

/// A manual clock started at [`EPOCH`].
#[must_use]
pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(EPOCH))
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────────────────────────

/// Signing key "A" (RFC 8032 TEST 1 seed).
#[must_use]
pub fn signing_key_a() -> Ed25519SigningKey {
    Ed25519SigningKey::from_bytes(&[
        0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c,
        0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae,
        0x7f, 0x60,
    ])
}

/// Signing key "B", unrelated to [`signing_key_a`].
#[must_use]
pub fn signing_key_b() -> Ed25519SigningKey {
    Ed25519SigningKey::from_bytes(&[0xb0; 32])
}

/// Fixed payload encryption key.
#[must_use]
pub fn encryption_key() -> AeadKey {
    AeadKey::from_bytes(std::array::from_fn(|i| {
        u8::try_from(i).unwrap_or_default()
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Authenticators
// ─────────────────────────────────────────────────────────────────────────────

/// Plaintext authenticator on key A driven by the returned clock.
#[must_use]
pub fn authenticator<P>() -> (Authenticator<P>, Arc<ManualClock>) {
    let clock = clock();
    let auth = Authenticator::from_signing_key(signing_key_a()).with_clock(Arc::clone(&clock));
    (auth, clock)
}

/// Like [`authenticator`], with payloads sealed under [`encryption_key`].
#[must_use]
pub fn sealed_authenticator<P>() -> (Authenticator<P>, Arc<ManualClock>) {
    let (auth, clock) = authenticator();
    (auth.with_encryption_key(&encryption_key()), clock)
}

// ─────────────────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// A typical session payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Subject identifier.
    pub user_id: u64,
    /// Display name.
    pub name: String,
    /// Granted roles.
    pub roles: Vec<String>,
    /// Free-form attributes.
    pub attrs: BTreeMap<String, String>,
}

/// A populated [`Session`].
#[must_use]
pub fn session() -> Session {
    Session {
        user_id: 42,
        name: "Ada Lovelace".to_string(),
        roles: vec!["admin".to_string(), "billing".to_string()],
        attrs: BTreeMap::from([
            ("tenant".to_string(), "acme".to_string()),
            ("locale".to_string(), "en-GB".to_string()),
        ]),
    }
}
