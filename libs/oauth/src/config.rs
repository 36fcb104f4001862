//! Provider configuration and resolution precedence

use crate::endpoints::Endpoints;
use crate::error::{OAuthError, OAuthResult};
use crate::settings::ProviderSettings;
use serde::{Deserialize, Serialize};

/// Scopes requested when none are configured anywhere
pub const DEFAULT_SCOPES: &[&str] = &["profile", "email"];

/// Resolved configuration for one Invision Community installation.
///
/// Values resolve highest-precedence first: explicit builder calls, then the
/// structured `[services.invision]` settings merged in with
/// [`merge_settings`](Self::merge_settings), then the scope defaults. The
/// base URL has no default; its presence is checked lazily when the first
/// URL is built, not at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OAuth client ID issued by the community installation
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI registered with the installation
    pub redirect_uri: String,
    base_url: Option<String>,
    scopes: Option<Vec<String>>,
}

impl ProviderConfig {
    /// Create a config with credentials only; base URL and scopes resolve later
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            base_url: None,
            scopes: None,
        }
    }

    /// Build a config entirely from structured settings
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self::new(
            settings.client_id.clone().unwrap_or_default(),
            settings.client_secret.clone().unwrap_or_default(),
            settings.redirect_uri.clone().unwrap_or_default(),
        )
        .merge_settings(settings)
    }

    /// Set the installation base URL explicitly; trailing slashes are stripped
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(strip_trailing_slashes(&base_url.into()));
        self
    }

    /// Set the requested scopes explicitly; an empty list keeps the defaults
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        if !scopes.is_empty() {
            self.scopes = Some(scopes);
        }
        self
    }

    /// Fill any values not yet set from structured settings.
    ///
    /// Explicit builder values win; settings only close the gaps, so calling
    /// this after the `with_*` methods yields the documented precedence.
    pub fn merge_settings(mut self, settings: &ProviderSettings) -> Self {
        if self.base_url.is_none()
            && let Some(base_url) = &settings.base_url
        {
            self.base_url = Some(strip_trailing_slashes(base_url));
        }
        if self.scopes.is_none()
            && let Some(scopes) = &settings.scopes
            && !scopes.is_empty()
        {
            self.scopes = Some(scopes.clone());
        }
        self
    }

    /// The resolved base URL.
    ///
    /// Fails with the configuration error when nothing in the resolution
    /// chain supplied a non-empty value. Deliberately lazy so a config can
    /// be constructed before the settings source is consulted.
    pub fn base_url(&self) -> OAuthResult<&str> {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(OAuthError::MissingBaseUrl),
        }
    }

    /// Derive the provider endpoint URLs from the resolved base URL
    pub fn endpoints(&self) -> OAuthResult<Endpoints> {
        Ok(Endpoints::from_base_url(self.base_url()?))
    }

    /// The scopes to request, falling back to [`DEFAULT_SCOPES`]
    pub fn scopes(&self) -> Vec<String> {
        match &self.scopes {
            Some(scopes) if !scopes.is_empty() => scopes.clone(),
            _ => DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The scopes as a space-separated string
    pub fn scopes_string(&self) -> String {
        self.scopes().join(" ")
    }
}

fn strip_trailing_slashes(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
