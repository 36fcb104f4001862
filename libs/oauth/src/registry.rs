//! Identity provider registry

use crate::error::{OAuthError, OAuthResult};
use crate::provider::IdentityProvider;
use std::collections::HashMap;

/// Registry of identity providers, keyed by provider id
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Box<dyn IdentityProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider under its own id
    pub fn register(&mut self, provider: Box<dyn IdentityProvider>) {
        self.providers.insert(provider.id(), provider);
    }

    /// Get a provider by id
    pub fn get(&self, id: &str) -> Option<&dyn IdentityProvider> {
        self.providers.get(id).map(|p| p.as_ref())
    }

    /// Get a provider by id, or fail with a lookup error
    pub fn require(&self, id: &str) -> OAuthResult<&dyn IdentityProvider> {
        self.get(id)
            .ok_or_else(|| OAuthError::provider_not_found(id))
    }

    /// List all registered providers
    pub fn list(&self) -> Vec<&dyn IdentityProvider> {
        self.providers.values().map(|p| p.as_ref()).collect()
    }

    /// All registered provider ids
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.providers.keys().copied().collect()
    }

    /// Check whether a provider is registered
    pub fn has_provider(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }
}
