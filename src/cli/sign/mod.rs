//! Sign command - prints the headers an operator needs to call the
//! key bootstrap route

use chrono::{SecondsFormat, Utc};
use clap::Args;

use crate::config::AppConfig;
use crate::domain::auth::{canonical_body, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::infrastructure::auth::SignatureVerifier;

#[derive(Args, Debug, Clone)]
pub struct SignArgs {
    /// HTTP method, exactly as it will be sent
    #[arg(long, default_value = "POST")]
    pub method: String,

    /// Request path without query string
    #[arg(long)]
    pub path: String,

    /// JSON body
    #[arg(long, default_value = "{}")]
    pub body: String,

    /// Timestamp to sign; defaults to now in RFC 3339
    #[arg(long)]
    pub timestamp: Option<String>,
}

/// Header pair for a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub timestamp: String,
    pub signature: String,
}

/// Run the sign command with the configured secret
pub fn run(args: SignArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let verifier = SignatureVerifier::new(config.server_secret()?)?;
    let headers = sign_headers(&verifier, &args)?;

    println!("{}: {}", TIMESTAMP_HEADER, headers.timestamp);
    println!("{}: {}", SIGNATURE_HEADER, headers.signature);

    Ok(())
}

/// Sign `args`, canonicalizing the body the way the server does
pub fn sign_headers(
    verifier: &SignatureVerifier,
    args: &SignArgs,
) -> anyhow::Result<SignatureHeaders> {
    let (body, _) = canonical_body(args.body.as_bytes())?;
    let timestamp = args
        .timestamp
        .clone()
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    let signature = verifier.sign_request(&args.method, &args.path, &body, &timestamp);

    Ok(SignatureHeaders {
        timestamp,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::SignedRequest;

    fn args(body: &str, timestamp: Option<&str>) -> SignArgs {
        SignArgs {
            method: "POST".to_string(),
            path: "/generate-api-key".to_string(),
            body: body.to_string(),
            timestamp: timestamp.map(str::to_string),
        }
    }

    #[test]
    fn test_signed_headers_verify() {
        let verifier = SignatureVerifier::new("cli-secret").unwrap();
        let headers = sign_headers(&verifier, &args(r#"{ "name" : "ops" }"#, None)).unwrap();

        let request = SignedRequest {
            method: "POST",
            path: "/generate-api-key",
            body: r#"{"name":"ops"}"#,
            timestamp: Some(&headers.timestamp),
            signature: Some(&headers.signature),
        };

        assert!(verifier.verify(&request).is_ok());
    }

    #[test]
    fn test_explicit_timestamp_is_kept() {
        let verifier = SignatureVerifier::new("cli-secret").unwrap();
        let headers =
            sign_headers(&verifier, &args("{}", Some("2026-10-17T12:00:00Z"))).unwrap();

        assert_eq!(headers.timestamp, "2026-10-17T12:00:00Z");
        assert_eq!(
            headers.signature,
            verifier.sign_request("POST", "/generate-api-key", "{}", "2026-10-17T12:00:00Z")
        );
    }

    #[test]
    fn test_invalid_body_rejected() {
        let verifier = SignatureVerifier::new("cli-secret").unwrap();

        assert!(sign_headers(&verifier, &args("{name}", None)).is_err());
    }
}
