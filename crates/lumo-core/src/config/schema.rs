//! Configuration schema — the provider selection value and the root config.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! `#[serde(rename_all = "camelCase")]` handles the conversion. Empty
//! strings stand for absent credential fields, so a partially-filled file
//! still deserializes.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Provider / auth mode
// ─────────────────────────────────────────────

/// Which upstream generative-AI service handles prompts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provider {
    /// The Generative Language API (`generativelanguage.googleapis.com`),
    /// authenticated with a static API key.
    #[default]
    GoogleAi,
    /// The regional Vertex AI endpoint
    /// (`{location}-aiplatform.googleapis.com`).
    VertexAi,
}

impl Provider {
    /// Human-readable label for logs and status output.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::GoogleAi => "Google AI",
            Provider::VertexAi => "Vertex AI",
        }
    }

    /// Parse a user-supplied name (CLI flag or env var value).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "googleai" | "google-ai" | "google" | "gemini" => Some(Provider::GoogleAi),
            "vertexai" | "vertex-ai" | "vertex" => Some(Provider::VertexAi),
            _ => None,
        }
    }
}

/// How to authenticate to the selected provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthMode {
    /// Static API key, sent as a `?key=` query parameter.
    #[default]
    ApiKey,
    /// OAuth bearer token obtained from a service-account key file
    /// (Vertex AI only).
    ServiceAccount,
}

impl AuthMode {
    /// Parse a user-supplied name (CLI flag or env var value).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "apikey" | "api-key" | "key" => Some(AuthMode::ApiKey),
            "serviceaccount" | "service-account" => Some(AuthMode::ServiceAccount),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// ProviderConfig
// ─────────────────────────────────────────────

/// Immutable description of which provider, credentials, model, and
/// generation parameters to use.
///
/// Switching providers means constructing a new value — nothing mutates a
/// config that a client already holds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub auth_mode: AuthMode,
    /// API key for `AuthMode::ApiKey`. Empty = not set.
    pub api_key: String,
    /// Path to a service-account JSON key file for
    /// `AuthMode::ServiceAccount`. Empty = not set.
    pub service_account_path: String,
    /// Cloud project identifier (Vertex AI only). Empty = not set.
    pub project_id: String,
    /// Vertex AI region.
    pub location: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature (0.0 – 1.0 by convention, unchecked).
    pub temperature: f64,
    /// Maximum tokens to generate per response.
    pub max_output_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            auth_mode: AuthMode::default(),
            api_key: String::new(),
            service_account_path: String::new(),
            project_id: String::new(),
            location: "us-central1".to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

impl ProviderConfig {
    /// Whether the provider/auth combination has its required credential
    /// fields populated. Callers must check this before issuing requests.
    pub fn is_valid(&self) -> bool {
        match self.provider {
            Provider::GoogleAi => !self.api_key.is_empty(),
            Provider::VertexAi => {
                if self.project_id.is_empty() {
                    return false;
                }
                match self.auth_mode {
                    AuthMode::ApiKey => !self.api_key.is_empty(),
                    AuthMode::ServiceAccount => !self.service_account_path.is_empty(),
                }
            }
        }
    }
}

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.lumo/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub provider: ProviderConfig,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn base(provider: Provider, auth_mode: AuthMode) -> ProviderConfig {
        ProviderConfig {
            provider,
            auth_mode,
            ..Default::default()
        }
    }

    // ── is_valid truth table ──

    #[test]
    fn test_google_ai_requires_api_key() {
        let mut cfg = base(Provider::GoogleAi, AuthMode::ApiKey);
        assert!(!cfg.is_valid());

        cfg.api_key = "AIza-test".to_string();
        assert!(cfg.is_valid());
    }

    #[test]
    fn test_google_ai_ignores_vertex_fields() {
        // Project/service-account fields are irrelevant for Google AI.
        let mut cfg = base(Provider::GoogleAi, AuthMode::ServiceAccount);
        cfg.project_id = "my-project".to_string();
        cfg.service_account_path = "/tmp/key.json".to_string();
        assert!(!cfg.is_valid());

        cfg.api_key = "AIza-test".to_string();
        assert!(cfg.is_valid());
    }

    #[test]
    fn test_vertex_api_key_requires_key_and_project() {
        let mut cfg = base(Provider::VertexAi, AuthMode::ApiKey);
        assert!(!cfg.is_valid());

        cfg.api_key = "AIza-test".to_string();
        assert!(!cfg.is_valid(), "project id still missing");

        cfg.project_id = "my-project".to_string();
        assert!(cfg.is_valid());
    }

    #[test]
    fn test_vertex_service_account_requires_path_and_project() {
        let mut cfg = base(Provider::VertexAi, AuthMode::ServiceAccount);
        assert!(!cfg.is_valid());

        cfg.service_account_path = "/tmp/key.json".to_string();
        assert!(!cfg.is_valid(), "project id still missing");

        cfg.project_id = "my-project".to_string();
        assert!(cfg.is_valid());

        // An API key alone does not satisfy service-account mode.
        cfg.service_account_path = String::new();
        cfg.api_key = "AIza-test".to_string();
        assert!(!cfg.is_valid());
    }

    // ── serde ──

    #[test]
    fn test_json_uses_camel_case() {
        let cfg = ProviderConfig::default();
        let json = serde_json::to_value(&cfg).unwrap();

        assert_eq!(json["provider"], "googleAi");
        assert_eq!(json["authMode"], "apiKey");
        assert!(json.get("maxOutputTokens").is_some());
        assert!(json.get("max_output_tokens").is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = serde_json::json!({
            "provider": "vertexAi",
            "authMode": "serviceAccount",
            "serviceAccountPath": "/keys/sa.json",
            "projectId": "acme-prod"
        });

        let cfg: ProviderConfig = serde_json::from_value(json).unwrap();
        assert_eq!(cfg.provider, Provider::VertexAi);
        assert_eq!(cfg.auth_mode, AuthMode::ServiceAccount);
        assert_eq!(cfg.location, "us-central1");
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.max_output_tokens, 1024);
        assert!(cfg.is_valid());
    }

    #[test]
    fn test_round_trip() {
        let mut cfg = ProviderConfig::default();
        cfg.api_key = "AIza-round-trip".to_string();
        cfg.temperature = 0.3;

        let json = serde_json::to_string(&cfg).unwrap();
        let back: ProviderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    // ── parsing helpers ──

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("googleAi"), Some(Provider::GoogleAi));
        assert_eq!(Provider::parse("gemini"), Some(Provider::GoogleAi));
        assert_eq!(Provider::parse("vertex"), Some(Provider::VertexAi));
        assert_eq!(Provider::parse("VERTEX-AI"), Some(Provider::VertexAi));
        assert_eq!(Provider::parse("openai"), None);
    }

    #[test]
    fn test_auth_mode_parse() {
        assert_eq!(AuthMode::parse("apiKey"), Some(AuthMode::ApiKey));
        assert_eq!(AuthMode::parse("service-account"), Some(AuthMode::ServiceAccount));
        assert_eq!(AuthMode::parse("oauth"), None);
    }

    #[test]
    fn test_provider_labels() {
        assert_eq!(Provider::GoogleAi.label(), "Google AI");
        assert_eq!(Provider::VertexAi.label(), "Vertex AI");
    }
}
