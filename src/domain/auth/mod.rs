//! Authentication domain
//!
//! Rejection types for the signed bootstrap route and the API-key gate, and
//! the canonical form of a signed request.

mod error;
mod signed_request;

pub use error::{AuthenticationError, KeyIssueError, SignatureError};
pub use signed_request::{
    canonical_body, canonical_payload, parse_timestamp, SignedRequest, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
