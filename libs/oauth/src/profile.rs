//! Authenticated profile retrieval

use crate::config::ProviderConfig;
use crate::error::{OAuthError, OAuthResult};
use crate::user::CanonicalUser;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Capability: fetch and normalize the authenticated member's profile
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch the profile unlocked by `access_token`
    async fn fetch_user(&self, access_token: &str) -> OAuthResult<CanonicalUser>;
}

/// [`ProfileFetcher`] backed by the installation's member endpoint
pub struct HttpProfileFetcher {
    config: Arc<ProviderConfig>,
    client: reqwest::Client,
}

impl HttpProfileFetcher {
    /// Create a fetcher with the adapter's default HTTP client
    pub fn new(config: Arc<ProviderConfig>) -> OAuthResult<Self> {
        Ok(Self::with_client(config, crate::http::default_client()?))
    }

    /// Create a fetcher with a caller-supplied HTTP client
    pub fn with_client(config: Arc<ProviderConfig>, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch_user(&self, access_token: &str) -> OAuthResult<CanonicalUser> {
        let endpoints = self.config.endpoints()?;
        tracing::debug!("fetching member profile from {}", endpoints.profile_url);

        let response = self
            .client
            .get(&endpoints.profile_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(OAuthError::profile_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(OAuthError::profile_transport)?;

        let raw: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(source) if status.is_success() => {
                return Err(OAuthError::ProfileParse { source });
            }
            Err(_) => {
                return Err(OAuthError::profile_fetch_failed(status.as_u16(), body));
            }
        };

        // The endpoint reports some failures as an error object under
        // HTTP 200, so this check runs regardless of status.
        if let Some(code_value) = raw.get("errorCode") {
            let code = match code_value.as_str() {
                Some(code) => code.to_string(),
                None => code_value.to_string(),
            };
            let message = raw
                .get("errorMessage")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            tracing::error!("Invision Community API error: {} - {}", code, message);
            return Err(OAuthError::profile_api(code, message));
        }

        if !status.is_success() {
            tracing::error!(
                "profile fetch rejected with status {}: {}",
                status.as_u16(),
                body
            );
            return Err(OAuthError::profile_fetch_failed(status.as_u16(), body));
        }

        Ok(CanonicalUser::from_raw(raw))
    }
}
