//! Invision Community provider orchestration

use crate::config::ProviderConfig;
use crate::error::OAuthResult;
use crate::profile::{HttpProfileFetcher, ProfileFetcher};
use crate::token::{HttpTokenExchanger, TokenExchanger, TokenResponse};
use crate::user::CanonicalUser;
use async_trait::async_trait;
use std::sync::Arc;

/// Registry id of the Invision Community provider
pub const PROVIDER_ID: &str = "invision";

/// An identity provider the host can log users in against
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider identifier (e.g. "invision")
    fn id(&self) -> &'static str;

    /// Human-readable provider name
    fn name(&self) -> &'static str;

    /// The consent-screen URL to redirect the user to.
    ///
    /// `state` is generated and validated by the host's CSRF machinery;
    /// the adapter only threads it through.
    fn authorize_url(&self, state: &str) -> OAuthResult<String>;

    /// Exchange the authorization code returned to the redirect URI
    async fn exchange_code(&self, code: &str) -> OAuthResult<TokenResponse>;

    /// Fetch the member profile for a previously obtained access token
    async fn user_from_token(&self, access_token: &str) -> OAuthResult<CanonicalUser>;

    /// Complete login: exchange the code, then fetch the member it unlocks.
    /// The profile fetch strictly follows a successful exchange.
    async fn user_from_code(&self, code: &str) -> OAuthResult<CanonicalUser> {
        let tokens = self.exchange_code(code).await?;
        self.user_from_token(&tokens.access_token).await
    }
}

/// OAuth2 login adapter for one Invision Community installation.
///
/// A thin orchestrator over two capabilities: a [`TokenExchanger`] and a
/// [`ProfileFetcher`]. Pure function of (config, HTTP client); holds no
/// mutable state across calls.
pub struct InvisionProvider {
    config: Arc<ProviderConfig>,
    exchanger: Box<dyn TokenExchanger>,
    fetcher: Box<dyn ProfileFetcher>,
}

impl InvisionProvider {
    /// Create a provider with HTTP-backed capabilities.
    ///
    /// Succeeds even when the base URL is still unresolved; that error is
    /// raised by the first operation that needs a URL.
    pub fn new(config: ProviderConfig) -> OAuthResult<Self> {
        let config = Arc::new(config);
        let client = crate::http::default_client()?;

        Ok(Self {
            exchanger: Box::new(HttpTokenExchanger::with_client(
                Arc::clone(&config),
                client.clone(),
            )),
            fetcher: Box::new(HttpProfileFetcher::with_client(Arc::clone(&config), client)),
            config,
        })
    }

    /// Create a provider from caller-supplied capabilities
    pub fn with_capabilities(
        config: ProviderConfig,
        exchanger: Box<dyn TokenExchanger>,
        fetcher: Box<dyn ProfileFetcher>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            exchanger,
            fetcher,
        }
    }

    /// The resolved provider configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl IdentityProvider for InvisionProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &'static str {
        "Invision Community"
    }

    fn authorize_url(&self, state: &str) -> OAuthResult<String> {
        let endpoints = self.config.endpoints()?;

        Ok(format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            endpoints.authorize_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(&self.config.scopes_string()),
            urlencoding::encode(state),
        ))
    }

    async fn exchange_code(&self, code: &str) -> OAuthResult<TokenResponse> {
        self.exchanger.exchange_code(code).await
    }

    async fn user_from_token(&self, access_token: &str) -> OAuthResult<CanonicalUser> {
        self.fetcher.fetch_user(access_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OAuthError;
    use serde_json::json;
    use std::sync::Mutex;

    fn test_config() -> ProviderConfig {
        ProviderConfig::new("clientId", "secret", "https://app/callback")
            .with_base_url("https://community.example.com")
    }

    struct StubExchanger {
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl TokenExchanger for StubExchanger {
        async fn exchange_code(&self, code: &str) -> OAuthResult<TokenResponse> {
            self.log.lock().unwrap().push(format!("exchange:{code}"));
            Ok(TokenResponse {
                access_token: "tok123".to_string(),
                token_type: Some("Bearer".to_string()),
                expires_in: Some(3600),
                extra: serde_json::Map::new(),
            })
        }
    }

    struct StubFetcher {
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ProfileFetcher for StubFetcher {
        async fn fetch_user(&self, access_token: &str) -> OAuthResult<CanonicalUser> {
            self.log.lock().unwrap().push(format!("fetch:{access_token}"));
            Ok(CanonicalUser::from_raw(json!({ "id": 123, "name": "jdoe" })))
        }
    }

    fn stub_provider(log: Arc<Mutex<Vec<String>>>) -> InvisionProvider {
        InvisionProvider::with_capabilities(
            test_config(),
            Box::new(StubExchanger { log: Arc::clone(&log) }),
            Box::new(StubFetcher { log }),
        )
    }

    #[test]
    fn test_id_and_name() {
        let provider = InvisionProvider::new(test_config()).unwrap();
        assert_eq!(provider.id(), "invision");
        assert_eq!(provider.name(), "Invision Community");
    }

    #[test]
    fn test_authorize_url_shape() {
        let provider = InvisionProvider::new(test_config()).unwrap();
        let url = provider.authorize_url("state123").unwrap();

        assert!(url.starts_with("https://community.example.com/oauth/authorize?"));
        assert_eq!(url.matches("client_id=").count(), 1);
        assert_eq!(url.matches("redirect_uri=").count(), 1);
        assert_eq!(url.matches("response_type=code").count(), 1);
        assert_eq!(url.matches("scope=").count(), 1);
        assert!(url.contains("client_id=clientId"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp%2Fcallback"));
        assert!(url.contains("scope=profile%20email"));
        assert!(url.contains("state=state123"));
    }

    #[test]
    fn test_authorize_url_uses_configured_scopes() {
        let config = ProviderConfig::new("clientId", "secret", "https://app/callback")
            .with_base_url("https://community.example.com")
            .with_scopes(vec!["profile".to_string(), "calendar".to_string()]);
        let provider = InvisionProvider::new(config).unwrap();

        let url = provider.authorize_url("s").unwrap();
        assert!(url.contains("scope=profile%20calendar"));
    }

    #[test]
    fn test_authorize_url_without_base_url_fails() {
        let provider =
            InvisionProvider::new(ProviderConfig::new("id", "secret", "https://app/callback"))
                .unwrap();

        assert!(matches!(
            provider.authorize_url("state"),
            Err(OAuthError::MissingBaseUrl)
        ));
    }

    #[test]
    fn test_user_from_code_exchanges_then_fetches() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let provider = stub_provider(Arc::clone(&log));

        let user = tokio_test::block_on(provider.user_from_code("auth-code")).unwrap();

        assert_eq!(user.id.as_deref(), Some("123"));
        // The fetch must run after the exchange and carry its token.
        assert_eq!(
            *log.lock().unwrap(),
            vec!["exchange:auth-code".to_string(), "fetch:tok123".to_string()]
        );
    }

    #[test]
    fn test_user_from_token_skips_exchange() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let provider = stub_provider(Arc::clone(&log));

        tokio_test::block_on(provider.user_from_token("existing-token")).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["fetch:existing-token".to_string()]);
    }
}
