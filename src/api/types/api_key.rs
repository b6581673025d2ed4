//! API key issuance request and response bodies

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::infrastructure::api_key::IssuedApiKey;

/// Body of `POST /generate-api-key`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateApiKeyRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateApiKeyResponse {
    pub api_key: String,
    /// RFC 3339, UTC
    pub expires_at: String,
    pub message: String,
}

impl From<IssuedApiKey> for GenerateApiKeyResponse {
    fn from(issued: IssuedApiKey) -> Self {
        Self {
            message: format!("API key generated successfully for {}.", issued.name),
            api_key: issued.key.as_str().to_string(),
            expires_at: format_timestamp(issued.expires_at),
        }
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
