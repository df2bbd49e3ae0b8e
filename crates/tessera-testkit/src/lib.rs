//! Test support for tessera.
//!
//! - [`fixtures`] - fixed keys, a manual clock and sample payloads
//! - [`init_test_tracing`] - route `tracing` output to the test writer
//!
//! # Example
//!
//! ```rust
//! use tessera_testkit::fixtures;
//!
//! tessera_testkit::init_test_tracing();
//!
//! let (auth, clock) = fixtures::authenticator();
//! let token = auth.generate(&fixtures::session()).unwrap();
//!
//! clock.advance(30);
//! assert_eq!(auth.decode(&token, 30).unwrap(), fixtures::session());
//! assert!(auth.decode(&token, 29).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
mod tracing_config;

pub use tracing_config::*;
