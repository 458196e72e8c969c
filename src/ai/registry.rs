//! Provider registry - manages AI provider instances.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::{CasegenError, CasegenResult};

use super::anthropic::AnthropicProvider;
use super::openai::OpenAiProvider;
use super::provider::AiProvider;

/// Registry mapping provider names to provider instances.
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn AiProvider>>>,
}

impl ProviderRegistry {
    /// Create an empty provider registry.
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with both default providers registered from the
    /// environment. Providers without credentials are still registered but
    /// report themselves as unconfigured.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(OpenAiProvider::from_env()));
        registry.register(Arc::new(AnthropicProvider::from_env()));
        registry
    }

    /// Register a provider.
    pub fn register(&self, provider: Arc<dyn AiProvider>) {
        let mut providers = self.providers.write().unwrap();
        providers.insert(provider.name().to_string(), provider);
    }

    /// Get a provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn AiProvider>> {
        let providers = self.providers.read().unwrap();
        providers.get(name).cloned()
    }

    /// Get a *configured* provider by name.
    ///
    /// Fails fast before any network activity when the provider is unknown
    /// or has no credential.
    pub fn require(&self, name: &str) -> CasegenResult<Arc<dyn AiProvider>> {
        let provider = self.get(name).ok_or_else(|| CasegenError::UnknownProvider {
            provider: name.to_string(),
        })?;
        if !provider.is_configured() {
            return Err(CasegenError::ProviderNotConfigured {
                provider: name.to_string(),
            });
        }
        Ok(provider)
    }

    /// All registered provider names, sorted for stable output.
    pub fn provider_names(&self) -> Vec<String> {
        let providers = self.providers.read().unwrap();
        let mut names: Vec<String> = providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// All providers that have a credential.
    pub fn configured_providers(&self) -> Vec<Arc<dyn AiProvider>> {
        let providers = self.providers.read().unwrap();
        providers
            .values()
            .filter(|p| p.is_configured())
            .cloned()
            .collect()
    }

    /// Whether at least one provider has a credential.
    pub fn is_any_configured(&self) -> bool {
        !self.configured_providers().is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
