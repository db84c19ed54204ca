//! Provider selection — turns configuration into a live client.
//!
//! The selector owns the settings store and a cached client instance.
//! The cache is plain injectable state: empty at startup, populated on
//! the first implicit selection, cleared explicitly when persisted
//! configuration changes. Population is idempotent, so a duplicate
//! concurrent construction wastes one object and nothing else.

use std::sync::{Arc, Mutex};

use tracing::debug;

use lumo_core::config::{load_config, Provider, ProviderConfig};
use lumo_core::{ServiceError, SettingsStore};

use crate::client::{AiProvider, GoogleAiClient, VertexClient};

/// Construct the client matching a config's provider.
pub fn build_client(config: ProviderConfig) -> Arc<dyn AiProvider> {
    match config.provider {
        Provider::GoogleAi => Arc::new(GoogleAiClient::new(config)),
        Provider::VertexAi => Arc::new(VertexClient::new(config)),
    }
}

/// Chooses and caches the active provider client.
pub struct ServiceSelector {
    settings: SettingsStore,
    cached: Mutex<Option<Arc<dyn AiProvider>>>,
}

impl ServiceSelector {
    /// Create a selector backed by the given settings store.
    pub fn new(settings: SettingsStore) -> Self {
        ServiceSelector {
            settings,
            cached: Mutex::new(None),
        }
    }

    /// Return the active client.
    ///
    /// An explicit config always produces a fresh client and leaves the
    /// cache untouched — an explicit request must never silently reuse a
    /// stale instance. With no config, the cached client is returned if
    /// present; otherwise configuration is resolved from the fallback
    /// chain (persisted settings, then environment defaults) and the
    /// constructed client is cached.
    pub fn select(&self, config: Option<ProviderConfig>) -> Arc<dyn AiProvider> {
        if let Some(explicit) = config {
            debug!(provider = explicit.provider.label(), "constructing client from explicit config");
            return build_client(explicit);
        }

        if let Some(client) = self.cached.lock().unwrap().clone() {
            return client;
        }

        let resolved = self
            .settings
            .get()
            .unwrap_or_else(|| load_config(None).provider);
        debug!(provider = resolved.provider.label(), "constructing client from resolved config");

        let client = build_client(resolved);
        *self.cached.lock().unwrap() = Some(client.clone());
        client
    }

    /// As [`select`](Self::select), then run the configuration probe.
    /// A failed probe surfaces as a generic error naming the provider.
    pub async fn select_and_validate(
        &self,
        config: Option<ProviderConfig>,
    ) -> Result<Arc<dyn AiProvider>, ServiceError> {
        let client = self.select(config);
        if client.validate_configuration().await {
            Ok(client)
        } else {
            Err(ServiceError::generic(format!(
                "{} failed the configuration probe",
                client.name()
            )))
        }
    }

    /// Drop the cached client. Must be called whenever persisted
    /// configuration changes so the next implicit `select` re-resolves.
    pub fn invalidate_cache(&self) {
        *self.cached.lock().unwrap() = None;
    }

    /// The settings store backing the fallback chain.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::config::AuthMode;

    fn selector_with_store(dir: &tempfile::TempDir) -> ServiceSelector {
        ServiceSelector::new(SettingsStore::new(Some(dir.path().join("provider.json"))))
    }

    fn explicit_config() -> ProviderConfig {
        ProviderConfig {
            api_key: "AIza-explicit".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_implicit_selects_share_one_instance() {
        let dir = tempfile::tempdir().unwrap();
        let selector = selector_with_store(&dir);

        let first = selector.select(None);
        let second = selector.select(None);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_explicit_config_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let selector = selector_with_store(&dir);

        let cached = selector.select(None);
        let explicit = selector.select(Some(explicit_config()));
        assert!(!Arc::ptr_eq(&cached, &explicit));

        // The cached instance survives the explicit selection.
        let again = selector.select(None);
        assert!(Arc::ptr_eq(&cached, &again));
    }

    #[test]
    fn test_invalidate_cache_forces_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let selector = selector_with_store(&dir);

        let first = selector.select(None);
        selector.invalidate_cache();
        let second = selector.select(None);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_persisted_settings_win_over_env_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let selector = selector_with_store(&dir);

        let persisted = ProviderConfig {
            provider: Provider::VertexAi,
            auth_mode: AuthMode::ApiKey,
            api_key: "AIza-persisted".to_string(),
            project_id: "acme-prod".to_string(),
            ..Default::default()
        };
        selector.settings().set(&persisted).unwrap();

        let client = selector.select(None);
        assert_eq!(client.name(), "Vertex AI");
    }

    #[test]
    fn test_build_client_dispatch() {
        let google = build_client(ProviderConfig::default());
        assert_eq!(google.name(), "Google AI");

        let vertex = build_client(ProviderConfig {
            provider: Provider::VertexAi,
            ..Default::default()
        });
        assert_eq!(vertex.name(), "Vertex AI");
    }
}
