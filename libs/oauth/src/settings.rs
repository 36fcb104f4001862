//! Host-wide settings source for provider credentials

use crate::error::OAuthResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the configured client ID
pub const ENV_CLIENT_ID: &str = "INVISION_CLIENT_ID";
/// Environment variable overriding the configured client secret
pub const ENV_CLIENT_SECRET: &str = "INVISION_CLIENT_SECRET";
/// Environment variable overriding the configured redirect URI
pub const ENV_REDIRECT_URI: &str = "INVISION_REDIRECT_URI";
/// Environment variable overriding the configured base URL
pub const ENV_BASE_URL: &str = "INVISION_BASE_URL";

/// Host-wide settings file contents.
///
/// The adapter never reads these implicitly; the host loads them and passes
/// them to [`crate::ProviderConfig::merge_settings`] or
/// [`crate::ProviderConfig::from_settings`].
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Settings {
    /// Third-party service credentials, one table per provider
    #[serde(default)]
    pub services: Services,
}

/// The `[services]` table of the settings file
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Services {
    /// Credentials for the Invision Community provider
    pub invision: Option<ProviderSettings>,
}

/// Structured per-provider settings, all fields optional
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProviderSettings {
    /// OAuth client ID issued by the community installation
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// Redirect URI registered with the installation
    pub redirect_uri: Option<String>,
    /// Root address of the community installation
    pub base_url: Option<String>,
    /// Scopes to request instead of the defaults
    pub scopes: Option<Vec<String>>,
}

impl Settings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(raw: &str) -> OAuthResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load settings from a TOML file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> OAuthResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Apply `INVISION_*` environment variables on top of the file values
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides through an injectable variable lookup
    pub fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let invision = self.services.invision.get_or_insert_with(Default::default);

        if let Some(value) = lookup(ENV_CLIENT_ID) {
            invision.client_id = Some(value);
        }
        if let Some(value) = lookup(ENV_CLIENT_SECRET) {
            invision.client_secret = Some(value);
        }
        if let Some(value) = lookup(ENV_REDIRECT_URI) {
            invision.redirect_uri = Some(value);
        }
        if let Some(value) = lookup(ENV_BASE_URL) {
            invision.base_url = Some(value);
        }

        self
    }

    /// The Invision provider settings, if any were supplied
    pub fn invision(&self) -> Option<&ProviderSettings> {
        self.services.invision.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[services.invision]
client_id = "client-id"
client_secret = "secret"
redirect_uri = "https://app/callback"
base_url = "https://community.example.com"
scopes = ["profile", "email"]
"#;

    #[test]
    fn test_parse_full_settings() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap();
        let invision = settings.invision().unwrap();

        assert_eq!(invision.client_id.as_deref(), Some("client-id"));
        assert_eq!(invision.client_secret.as_deref(), Some("secret"));
        assert_eq!(invision.redirect_uri.as_deref(), Some("https://app/callback"));
        assert_eq!(
            invision.base_url.as_deref(),
            Some("https://community.example.com")
        );
        assert_eq!(
            invision.scopes.as_deref(),
            Some(["profile".to_string(), "email".to_string()].as_slice())
        );
    }

    #[test]
    fn test_empty_document_has_no_provider() {
        let settings = Settings::from_toml_str("").unwrap();
        assert!(settings.invision().is_none());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Settings::from_toml_str("services = 'nope").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(
            settings.invision().unwrap().base_url.as_deref(),
            Some("https://community.example.com")
        );
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let result = Settings::load("/nonexistent/invision.toml");
        assert!(matches!(result, Err(crate::OAuthError::Io(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let settings = Settings::from_toml_str(SAMPLE)
            .unwrap()
            .apply_env_with(|name| match name {
                ENV_BASE_URL => Some("https://other.example.com".to_string()),
                ENV_CLIENT_SECRET => Some("env-secret".to_string()),
                _ => None,
            });

        let invision = settings.invision().unwrap();
        assert_eq!(invision.base_url.as_deref(), Some("https://other.example.com"));
        assert_eq!(invision.client_secret.as_deref(), Some("env-secret"));
        // Untouched values survive
        assert_eq!(invision.client_id.as_deref(), Some("client-id"));
    }

    #[test]
    fn test_env_alone_builds_a_provider_table() {
        let settings = Settings::default().apply_env_with(|name| match name {
            ENV_CLIENT_ID => Some("env-id".to_string()),
            ENV_BASE_URL => Some("https://community.example.com".to_string()),
            _ => None,
        });

        let invision = settings.invision().unwrap();
        assert_eq!(invision.client_id.as_deref(), Some("env-id"));
        assert!(invision.client_secret.is_none());
    }
}
