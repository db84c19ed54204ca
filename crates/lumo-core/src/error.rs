//! Typed failure taxonomy for provider calls.
//!
//! Every failure a provider surfaces is one of five kinds. Each variant
//! carries a human-readable message, an optional provider error code, and
//! an optional wrapped low-level cause. Nothing in the provider layer
//! swallows an error — callers always receive a classified value.

use thiserror::Error;

/// Boxed low-level cause attached to a [`ServiceError`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A classified provider failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing, invalid, or upstream-rejected credentials.
    #[error("authentication failed: {message}")]
    Authentication {
        message: String,
        code: Option<String>,
        #[source]
        source: Option<BoxedCause>,
    },

    /// The provider is throttling us (HTTP 429).
    #[error("rate limited: {message}")]
    RateLimit {
        message: String,
        code: Option<String>,
        #[source]
        source: Option<BoxedCause>,
    },

    /// The request was malformed, or the provider broke its own response
    /// contract.
    #[error("invalid request: {message}")]
    InvalidRequest {
        message: String,
        code: Option<String>,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Transport-level failure before any HTTP status was obtained.
    #[error("network failure: {message}")]
    Network {
        message: String,
        code: Option<String>,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Server errors and anything unclassified.
    #[error("service error: {message}")]
    Generic {
        message: String,
        code: Option<String>,
        #[source]
        source: Option<BoxedCause>,
    },
}

impl ServiceError {
    /// Create an [`ServiceError::Authentication`] with just a message.
    pub fn authentication(message: impl Into<String>) -> Self {
        ServiceError::Authentication {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Create a [`ServiceError::RateLimit`] with just a message.
    pub fn rate_limit(message: impl Into<String>) -> Self {
        ServiceError::RateLimit {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Create an [`ServiceError::InvalidRequest`] with just a message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ServiceError::InvalidRequest {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Create a [`ServiceError::Network`] with just a message.
    pub fn network(message: impl Into<String>) -> Self {
        ServiceError::Network {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Create a [`ServiceError::Generic`] with just a message.
    pub fn generic(message: impl Into<String>) -> Self {
        ServiceError::Generic {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Attach a provider error code.
    pub fn with_code(mut self, new_code: impl Into<String>) -> Self {
        match &mut self {
            ServiceError::Authentication { code, .. }
            | ServiceError::RateLimit { code, .. }
            | ServiceError::InvalidRequest { code, .. }
            | ServiceError::Network { code, .. }
            | ServiceError::Generic { code, .. } => *code = Some(new_code.into()),
        }
        self
    }

    /// Attach a wrapped low-level cause.
    pub fn with_source(mut self, cause: BoxedCause) -> Self {
        match &mut self {
            ServiceError::Authentication { source, .. }
            | ServiceError::RateLimit { source, .. }
            | ServiceError::InvalidRequest { source, .. }
            | ServiceError::Network { source, .. }
            | ServiceError::Generic { source, .. } => *source = Some(cause),
        }
        self
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Authentication { message, .. }
            | ServiceError::RateLimit { message, .. }
            | ServiceError::InvalidRequest { message, .. }
            | ServiceError::Network { message, .. }
            | ServiceError::Generic { message, .. } => message,
        }
    }

    /// The provider error code, if one was carried.
    pub fn code(&self) -> Option<&str> {
        match self {
            ServiceError::Authentication { code, .. }
            | ServiceError::RateLimit { code, .. }
            | ServiceError::InvalidRequest { code, .. }
            | ServiceError::Network { code, .. }
            | ServiceError::Generic { code, .. } => code.as_deref(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
