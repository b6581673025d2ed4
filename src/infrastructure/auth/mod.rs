//! Authentication infrastructure module
//!
//! HMAC signing and verification for requests signed with the server secret.

mod signature;

pub use signature::{SignatureVerifier, DEFAULT_MAX_CLOCK_SKEW_SECS};
