//! Response classification — HTTP status + raw body in, text or a typed
//! [`ServiceError`] out.
//!
//! The classifier only sees completed responses; transport failures that
//! never produced a status are mapped to `ServiceError::Network` by the
//! client before this code runs.

use serde::Deserialize;
use tracing::debug;

use lumo_core::ServiceError;

// ─────────────────────────────────────────────
// Wire types (response side)
// ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

/// Error envelope returned by both providers on non-200 statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    /// Google sends a JSON number here; some gateways send a string.
    code: Option<serde_json::Value>,
}

// ─────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────

/// Turn a completed HTTP exchange into generated text or a typed error.
pub fn classify(status: u16, body: &str) -> Result<String, ServiceError> {
    if status == 200 {
        return extract_text(body);
    }

    let (message, provider_code) = parse_error_body(body);
    let code = provider_code.unwrap_or_else(|| status.to_string());
    debug!(status, code = %code, "provider returned an error response");

    let err = match status {
        400 => ServiceError::invalid_request(message),
        401 | 403 => ServiceError::authentication(message),
        429 => ServiceError::rate_limit(message),
        500..=599 => ServiceError::generic(if message.is_empty() {
            "server error".to_string()
        } else {
            message
        }),
        _ => ServiceError::generic(if message.is_empty() {
            format!("unexpected status {status}")
        } else {
            message
        }),
    };
    Err(err.with_code(code))
}

/// Pull `candidates[0].content.parts[0].text` out of a 200 body.
///
/// A missing path or empty arrays mean the provider broke its response
/// contract, which is an invalid-request failure rather than a user
/// error.
fn extract_text(body: &str) -> Result<String, ServiceError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        ServiceError::invalid_request("unexpected response shape").with_source(Box::new(e))
    })?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ServiceError::invalid_request("unexpected response shape"));
    }
    Ok(text)
}

/// Best-effort parse of the `{error: {message, code}}` envelope.
///
/// Falls back to the raw body as the message when the envelope is absent
/// or unparseable. The code is normalized to a string.
fn parse_error_body(body: &str) -> (String, Option<String>) {
    if let Ok(ErrorEnvelope { error: Some(detail) }) = serde_json::from_str(body) {
        let message = detail
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());
        let code = detail.code.and_then(|c| match c {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        return (message, code);
    }
    (body.trim().to_string(), None)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
