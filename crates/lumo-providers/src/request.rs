//! Request construction for the `generateContent` endpoints.
//!
//! Everything here is a pure function of `(prompt, config)` — no I/O, no
//! clock, no randomness — so identical inputs always produce
//! byte-identical URLs and body JSON. Bearer headers are applied by the
//! client after credential resolution, not here.

use serde::Serialize;

use lumo_core::config::{AuthMode, ProviderConfig};

/// Production host for the Generative Language API.
pub const GOOGLE_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Fixed content-filtering threshold sent with every request.
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// The four harm categories blocked at [`SAFETY_THRESHOLD`].
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

// ─────────────────────────────────────────────
// Wire types (request side)
// ─────────────────────────────────────────────

/// Request body for a `generateContent` call. Shared by both providers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

/// Generation parameters. `top_k` and `top_p` are pinned — only
/// temperature and the token cap come from configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

// ─────────────────────────────────────────────
// Builders
// ─────────────────────────────────────────────

/// Build the request body for a single prompt.
pub fn request_body(prompt: &str, config: &ProviderConfig) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: config.temperature,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: config.max_output_tokens,
        },
        safety_settings: SAFETY_CATEGORIES
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold: SAFETY_THRESHOLD,
            })
            .collect(),
    }
}

/// Default base URL for the regional Vertex AI endpoint.
pub fn vertex_base_url(location: &str) -> String {
    format!("https://{location}-aiplatform.googleapis.com")
}

/// Endpoint URL for the Generative Language API. The key rides as a
/// query parameter.
pub fn google_ai_url(base_url: &str, config: &ProviderConfig) -> String {
    let base = base_url.trim_end_matches('/');
    format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        base, config.model, config.api_key
    )
}

/// Endpoint URL for Vertex AI. In API-key mode the key rides as a query
/// parameter; in service-account mode the client attaches a bearer
/// header instead.
pub fn vertex_url(base_url: &str, config: &ProviderConfig) -> String {
    let base = base_url.trim_end_matches('/');
    let mut url = format!(
        "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
        base, config.project_id, config.location, config.model
    );
    if config.auth_mode == AuthMode::ApiKey {
        url.push_str("?key=");
        url.push_str(&config.api_key);
    }
    url
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
