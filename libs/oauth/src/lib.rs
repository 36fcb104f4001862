//! OAuth2 login adapter for Invision Community installations
//!
//! This crate implements the OAuth2 Authorization Code flow against a
//! community installation's REST API: build the consent-screen URL, exchange
//! the returned code for an access token, fetch the authenticated member's
//! profile, and normalize it into a stable [`CanonicalUser`] record.
//!
//! # Architecture
//!
//! - `config`: provider configuration and resolution precedence
//! - `endpoints`: authorize/token/profile URL derivation
//! - `error`: error types for adapter operations
//! - `profile`: authenticated profile retrieval
//! - `provider`: the provider trait and the Invision orchestrator
//! - `registry`: provider registry for host frameworks
//! - `settings`: host-wide settings file and environment overrides
//! - `token`: authorization-code token exchange
//! - `user`: the canonical member record
//!
//! # Example
//!
//! ```rust,ignore
//! use invision_oauth::{InvisionProvider, ProviderConfig, Settings};
//!
//! // Host loads settings explicitly; nothing is read from process globals.
//! let settings = Settings::load("services.toml")?.apply_env();
//! let config = ProviderConfig::from_settings(
//!     settings.invision().ok_or("invision not configured")?,
//! );
//!
//! let provider = InvisionProvider::new(config)?;
//!
//! // 1. Redirect the user, with host-generated CSRF state:
//! let url = provider.authorize_url(&state)?;
//!
//! // 2. On callback, turn the code into a member profile:
//! // let user = provider.user_from_code(&code).await?;
//! ```

pub mod config;
pub mod endpoints;
pub mod error;
mod http;
pub mod profile;
pub mod provider;
pub mod registry;
pub mod settings;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use config::{DEFAULT_SCOPES, ProviderConfig};
pub use endpoints::Endpoints;
pub use error::{OAuthError, OAuthResult};
pub use profile::{HttpProfileFetcher, ProfileFetcher};
pub use provider::{IdentityProvider, InvisionProvider, PROVIDER_ID};
pub use registry::ProviderRegistry;
pub use settings::{ProviderSettings, Settings};
pub use token::{HttpTokenExchanger, TokenExchanger, TokenResponse};
pub use user::CanonicalUser;
