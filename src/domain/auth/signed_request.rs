//! Canonical form of a signed request
//!
//! A signed request carries `x-timestamp` and `x-signature` headers. The
//! signature is an HMAC over `METHOD || PATH || BODY || TIMESTAMP` with no
//! delimiters, where `BODY` is the compact JSON serialization of the request
//! body (`{}` when there is none).

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Header carrying the hex HMAC signature
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Header carrying the signing timestamp
pub const TIMESTAMP_HEADER: &str = "x-timestamp";

/// Inputs of a signature check, borrowed from the inbound request
#[derive(Debug, Clone, Copy)]
pub struct SignedRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub body: &'a str,
    pub timestamp: Option<&'a str>,
    pub signature: Option<&'a str>,
}

impl<'a> SignedRequest<'a> {
    /// Payload the signature must cover, using the raw timestamp header
    pub fn payload(&self, timestamp: &str) -> String {
        canonical_payload(self.method, self.path, self.body, timestamp)
    }
}

/// Concatenate the signed fields in order
pub fn canonical_payload(method: &str, path: &str, body: &str, timestamp: &str) -> String {
    let mut payload =
        String::with_capacity(method.len() + path.len() + body.len() + timestamp.len());
    payload.push_str(method);
    payload.push_str(path);
    payload.push_str(body);
    payload.push_str(timestamp);
    payload
}

/// Re-serialize a raw request body into its canonical JSON form
///
/// Object keys keep their received order. An empty body or a JSON `null`
/// canonicalizes to `{}`.
pub fn canonical_body(raw: &[u8]) -> Result<(String, Value), serde_json::Error> {
    let value = if raw.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        match serde_json::from_slice::<Value>(raw)? {
            Value::Null => Value::Object(Default::default()),
            other => other,
        }
    };

    Ok((serde_json::to_string(&value)?, value))
}

/// Parse an `x-timestamp` header value
///
/// Accepts RFC 3339 (`2026-10-17T12:00:00Z`) and RFC 2822
/// (`Sat, 17 Oct 2026 12:00:00 +0000`). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_canonical_payload_has_no_delimiters() {
        let payload = canonical_payload(
            "POST",
            "/generate-api-key",
            r#"{"name":"app"}"#,
            "2026-10-17T12:00:00Z",
        );

        assert_eq!(
            payload,
            r#"POST/generate-api-key{"name":"app"}2026-10-17T12:00:00Z"#
        );
    }

    #[test]
    fn test_canonical_body_empty_is_empty_object() {
        let (body, value) = canonical_body(b"").unwrap();
        assert_eq!(body, "{}");
        assert!(value.as_object().unwrap().is_empty());

        let (body, _) = canonical_body(b"  \n").unwrap();
        assert_eq!(body, "{}");

        let (body, _) = canonical_body(b"null").unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn test_canonical_body_is_compact() {
        let (body, _) = canonical_body(br#"{ "name" : "app" }"#).unwrap();
        assert_eq!(body, r#"{"name":"app"}"#);
    }

    #[test]
    fn test_canonical_body_preserves_key_order() {
        let (body, _) = canonical_body(br#"{"zeta":1,"alpha":2}"#).unwrap();
        assert_eq!(body, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_canonical_body_rejects_malformed_json() {
        assert!(canonical_body(b"{name:").is_err());
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let parsed = parse_timestamp("2026-10-17T12:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap());

        let offset = parse_timestamp("2026-10-17T14:00:00+02:00").unwrap();
        assert_eq!(offset, parsed);
    }

    #[test]
    fn test_parse_timestamp_rfc2822() {
        let parsed = parse_timestamp("Sat, 17 Oct 2026 12:00:00 +0000").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_malformed() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("1760702400").is_none());
    }
}
