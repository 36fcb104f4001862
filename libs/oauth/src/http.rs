//! HTTP client construction shared by the provider capabilities

use crate::error::{OAuthError, OAuthResult};

/// Build the adapter's HTTP client.
///
/// Redirects are disabled: a 3xx from the token endpoint indicates
/// misconfiguration and must surface as an error instead of being followed.
pub(crate) fn default_client() -> OAuthResult<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|source| OAuthError::Client { source })
}
