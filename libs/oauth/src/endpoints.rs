//! Provider endpoint derivation

/// Path of the consent screen, relative to the base URL
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Path of the token endpoint, relative to the base URL.
///
/// The trailing slash is load-bearing: some deployments reject the exchange
/// without it. Keep bit-exact.
pub const TOKEN_PATH: &str = "/oauth/token/";

/// Path of the authenticated-member endpoint, relative to the base URL
pub const PROFILE_PATH: &str = "/api/core/me";

/// The three provider URLs derived from one installation's base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Consent screen the user is redirected to
    pub authorize_url: String,
    /// Authorization-code exchange endpoint
    pub token_url: String,
    /// Authenticated member profile endpoint
    pub profile_url: String,
}

impl Endpoints {
    /// Derive all endpoint URLs from a base URL with no trailing slash
    pub fn from_base_url(base_url: &str) -> Self {
        Self {
            authorize_url: format!("{base_url}{AUTHORIZE_PATH}"),
            token_url: format!("{base_url}{TOKEN_PATH}"),
            profile_url: format!("{base_url}{PROFILE_PATH}"),
        }
    }
}
