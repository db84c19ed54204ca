//! Provider clients — one per upstream endpoint, same contract.
//!
//! Each `generate` call is a single HTTP round trip: validate config,
//! resolve credentials (Vertex service-account mode only), build the
//! request, send, classify. No retries, no timeout beyond the transport
//! default; cancellation and backoff are the caller's policy.

use async_trait::async_trait;
use tracing::{debug, warn};

use lumo_core::config::{AuthMode, ProviderConfig};
use lumo_core::ServiceError;

use crate::auth::{CredentialManager, GOOGLE_TOKEN_URI};
use crate::{request, response};

/// Prompt used by the configuration probe.
const PROBE_PROMPT: &str = "Hello";
/// Token cap used by the configuration probe.
const PROBE_MAX_OUTPUT_TOKENS: u32 = 10;

/// Common contract for both provider clients.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;

    /// Coarse health check: fire a minimal probe and report whether it
    /// came back HTTP 200. All errors collapse to `false`.
    async fn validate_configuration(&self) -> bool;

    /// Human-readable provider label for display.
    fn name(&self) -> &'static str;
}

/// Shrink a config down to the probe parameters.
fn probe_config(config: &ProviderConfig) -> ProviderConfig {
    ProviderConfig {
        max_output_tokens: PROBE_MAX_OUTPUT_TOKENS,
        ..config.clone()
    }
}

fn network_error(provider: &str, e: reqwest::Error) -> ServiceError {
    ServiceError::network(format!("request to {provider} failed: {e}")).with_source(Box::new(e))
}

// ─────────────────────────────────────────────
// GoogleAiClient
// ─────────────────────────────────────────────

/// Client for the Generative Language API. Auth is always a static API
/// key in the query string.
pub struct GoogleAiClient {
    http: reqwest::Client,
    config: ProviderConfig,
    base_url: String,
}

impl std::fmt::Debug for GoogleAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAiClient")
            .field("model", &self.config.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GoogleAiClient {
    /// Create a client against the production host.
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_base_url(config, request::GOOGLE_AI_BASE_URL)
    }

    /// Create a client against a specific host (tests point this at a
    /// mock server).
    pub fn with_base_url(config: ProviderConfig, base_url: impl Into<String>) -> Self {
        GoogleAiClient {
            http: reqwest::Client::new(),
            config,
            base_url: base_url.into(),
        }
    }

    async fn send(&self, prompt: &str, config: &ProviderConfig) -> Result<(u16, String), ServiceError> {
        let url = request::google_ai_url(&self.base_url, config);
        let body = request::request_body(prompt, config);

        debug!(provider = self.name(), model = %config.model, "sending generateContent request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| network_error("Google AI", e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| network_error("Google AI", e))?;
        Ok((status, text))
    }
}

#[async_trait]
impl AiProvider for GoogleAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        if !self.config.is_valid() {
            return Err(ServiceError::authentication(
                "Google AI configuration is incomplete: an API key is required",
            ));
        }

        let (status, body) = self.send(prompt, &self.config).await?;
        response::classify(status, &body)
    }

    async fn validate_configuration(&self) -> bool {
        match self.send(PROBE_PROMPT, &probe_config(&self.config)).await {
            Ok((status, _)) => status == 200,
            Err(e) => {
                debug!(provider = self.name(), error = %e, "configuration probe failed");
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "Google AI"
    }
}

// ─────────────────────────────────────────────
// VertexClient
// ─────────────────────────────────────────────

/// Client for the regional Vertex AI endpoint. Auth is either a bearer
/// token from the credential manager (service-account mode) or a static
/// API key in the query string.
pub struct VertexClient {
    http: reqwest::Client,
    config: ProviderConfig,
    base_url: String,
    credentials: CredentialManager,
}

impl std::fmt::Debug for VertexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexClient")
            .field("model", &self.config.model)
            .field("project_id", &self.config.project_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl VertexClient {
    /// Create a client against the production endpoints for the config's
    /// region.
    pub fn new(config: ProviderConfig) -> Self {
        let base_url = request::vertex_base_url(&config.location);
        Self::with_endpoints(config, base_url, GOOGLE_TOKEN_URI)
    }

    /// Create a client against specific endpoints (tests point these at
    /// mock servers).
    pub fn with_endpoints(
        config: ProviderConfig,
        base_url: impl Into<String>,
        token_uri: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::new();
        VertexClient {
            credentials: CredentialManager::with_token_uri(http.clone(), token_uri),
            http,
            config,
            base_url: base_url.into(),
        }
    }

    async fn send(&self, prompt: &str, config: &ProviderConfig) -> Result<(u16, String), ServiceError> {
        let bearer = match config.auth_mode {
            AuthMode::ServiceAccount => Some(self.credentials.bearer_token(config).await?),
            AuthMode::ApiKey => None,
        };

        let url = request::vertex_url(&self.base_url, config);
        let body = request::request_body(prompt, config);

        debug!(
            provider = self.name(),
            model = %config.model,
            project = %config.project_id,
            "sending generateContent request"
        );

        let mut builder = self.http.post(&url).json(&body);
        if let Some(token) = &bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| network_error("Vertex AI", e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| network_error("Vertex AI", e))?;
        Ok((status, text))
    }
}

#[async_trait]
impl AiProvider for VertexClient {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        if !self.config.is_valid() {
            return Err(ServiceError::authentication(
                "Vertex AI configuration is incomplete: project id and credentials are required",
            ));
        }

        let (status, body) = self.send(prompt, &self.config).await?;
        response::classify(status, &body)
    }

    async fn validate_configuration(&self) -> bool {
        match self.send(PROBE_PROMPT, &probe_config(&self.config)).await {
            Ok((status, _)) => status == 200,
            Err(e) => {
                warn!(provider = self.name(), error = %e, "configuration probe failed");
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "Vertex AI"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
