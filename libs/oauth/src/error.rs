//! Error types for the login adapter

use thiserror::Error;

/// Errors that can occur while driving the Invision Community login flow
#[derive(Error, Debug)]
pub enum OAuthError {
    /// No base URL was configured anywhere in the resolution chain
    #[error(
        "base URL is not configured. Set base_url under [services.invision] or on the provider config."
    )]
    MissingBaseUrl,

    /// Token endpoint answered with a status other than 200
    #[error("token exchange failed with status {status}: {body}")]
    TokenExchangeFailed {
        /// HTTP status code of the rejected exchange
        status: u16,
        /// Raw response body, verbatim
        body: String,
    },

    /// Token endpoint answered 200 but the body was not valid JSON
    #[error("failed to decode token response: {body}")]
    TokenExchangeDecode {
        /// Raw response body, verbatim
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Token exchange never reached the server (DNS, TLS, connect, timeout)
    #[error("token exchange request failed")]
    TokenExchangeTransport {
        #[source]
        source: reqwest::Error,
    },

    /// The provider reported a failure inside an otherwise well-formed profile response
    #[error("Invision Community API error: {code} - {message}")]
    ProfileApi {
        /// Provider error code, e.g. "NO_PERMISSION"
        code: String,
        /// Provider error message, empty when the provider omitted one
        message: String,
    },

    /// Profile response body was not valid JSON
    #[error("unable to parse user data from the Invision Community API")]
    ProfileParse {
        #[source]
        source: serde_json::Error,
    },

    /// Profile endpoint answered with a non-success status and no embedded error object
    #[error("profile request failed with status {status}: {body}")]
    ProfileFetchFailed {
        /// HTTP status code of the rejected fetch
        status: u16,
        /// Raw response body, verbatim
        body: String,
    },

    /// Profile fetch never reached the server
    #[error("profile request failed")]
    ProfileTransport {
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction failed
    #[error("failed to construct HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// Provider not found in the registry
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// File I/O error while loading settings
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file was not valid TOML
    #[error("settings parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

impl OAuthError {
    /// Create a token exchange failure from a rejected HTTP response
    pub fn token_exchange_failed(status: u16, body: impl Into<String>) -> Self {
        Self::TokenExchangeFailed {
            status,
            body: body.into(),
        }
    }

    /// Wrap a transport fault raised during token exchange
    pub fn token_exchange_transport(source: reqwest::Error) -> Self {
        Self::TokenExchangeTransport { source }
    }

    /// Create a provider-reported API error
    pub fn profile_api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProfileApi {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a profile fetch failure from a rejected HTTP response
    pub fn profile_fetch_failed(status: u16, body: impl Into<String>) -> Self {
        Self::ProfileFetchFailed {
            status,
            body: body.into(),
        }
    }

    /// Wrap a transport fault raised during profile fetch
    pub fn profile_transport(source: reqwest::Error) -> Self {
        Self::ProfileTransport { source }
    }

    /// Create a provider not found error
    pub fn provider_not_found(id: impl Into<String>) -> Self {
        Self::ProviderNotFound(id.into())
    }

    /// Whether this failure requires operator action on the configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingBaseUrl)
    }

    /// Whether this failure happened while exchanging the authorization code
    pub fn is_token_exchange(&self) -> bool {
        matches!(
            self,
            Self::TokenExchangeFailed { .. }
                | Self::TokenExchangeDecode { .. }
                | Self::TokenExchangeTransport { .. }
        )
    }

    /// Whether this failure happened while fetching or mapping the profile
    pub fn is_profile_fetch(&self) -> bool {
        matches!(
            self,
            Self::ProfileApi { .. }
                | Self::ProfileParse { .. }
                | Self::ProfileFetchFailed { .. }
                | Self::ProfileTransport { .. }
        )
    }
}

/// Result type alias for adapter operations
pub type OAuthResult<T> = Result<T, OAuthError>;
