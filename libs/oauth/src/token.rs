//! Authorization-code token exchange

use crate::config::ProviderConfig;
use crate::error::{OAuthError, OAuthResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token endpoint response.
///
/// Only `access_token` is consumed by this adapter; `token_type` and
/// `expires_in` are passed through uninterpreted and any other fields the
/// installation returns survive in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token for API requests
    pub access_token: String,
    /// Token type, usually "Bearer"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Token lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// Remaining response fields, verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Capability: exchange an authorization code for tokens
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Exchange the authorization code returned to the redirect URI
    async fn exchange_code(&self, code: &str) -> OAuthResult<TokenResponse>;
}

/// [`TokenExchanger`] backed by the installation's token endpoint
pub struct HttpTokenExchanger {
    config: Arc<ProviderConfig>,
    client: reqwest::Client,
}

impl HttpTokenExchanger {
    /// Create an exchanger with the adapter's default HTTP client
    pub fn new(config: Arc<ProviderConfig>) -> OAuthResult<Self> {
        Ok(Self::with_client(config, crate::http::default_client()?))
    }

    /// Create an exchanger with a caller-supplied HTTP client.
    ///
    /// The client must not follow redirects; a 3xx answer from the token
    /// endpoint has to surface as an error.
    pub fn with_client(config: Arc<ProviderConfig>, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl TokenExchanger for HttpTokenExchanger {
    async fn exchange_code(&self, code: &str) -> OAuthResult<TokenResponse> {
        let endpoints = self.config.endpoints()?;
        tracing::debug!("exchanging authorization code at {}", endpoints.token_url);

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .client
            .post(&endpoints.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(OAuthError::token_exchange_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(OAuthError::token_exchange_transport)?;

        // Strict 200-only: a 3xx here means the deployment is redirecting the
        // exchange, which the adapter must never follow silently.
        if status.as_u16() != 200 {
            tracing::error!(
                "token exchange rejected with status {}: {}",
                status.as_u16(),
                body
            );
            return Err(OAuthError::token_exchange_failed(status.as_u16(), body));
        }

        serde_json::from_str(&body)
            .map_err(|source| OAuthError::TokenExchangeDecode { body, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_decodes_standard_fields() {
        let json = r#"{"access_token":"tok123","token_type":"Bearer","expires_in":3600}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.access_token, "tok123");
        assert_eq!(response.token_type.as_deref(), Some("Bearer"));
        assert_eq!(response.expires_in, Some(3600));
        assert!(response.extra.is_empty());
    }

    #[test]
    fn test_token_response_keeps_unknown_fields() {
        let json = r#"{"access_token":"tok","scope":"profile email","refresh_token":"r1"}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.extra["scope"], "profile email");
        assert_eq!(response.extra["refresh_token"], "r1");
        assert!(response.token_type.is_none());
    }

    #[test]
    fn test_token_response_roundtrips_unchanged() {
        let json = r#"{"access_token":"tok123","expires_in":3600,"scope":"profile"}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let reencoded: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();

        assert_eq!(reencoded, serde_json::from_str::<serde_json::Value>(json).unwrap());
    }

    #[test]
    fn test_missing_access_token_is_a_decode_error() {
        let result: Result<TokenResponse, _> =
            serde_json::from_str(r#"{"token_type":"Bearer"}"#);
        assert!(result.is_err());
    }
}
