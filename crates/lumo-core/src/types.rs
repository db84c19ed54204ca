//! Core types for Lumo.
//!
//! The chat transcript lives entirely on the client side: each turn sends
//! one opaque prompt string, so a message carries no provider state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the chat transcript.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message authored by the user.
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            content: content.into(),
            is_user: true,
            timestamp: Utc::now(),
        }
    }

    /// Create a message authored by the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            content: content.into(),
            is_user: false,
            timestamp: Utc::now(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.content, "Hello");
        assert!(msg.is_user);
    }

    #[test]
    fn test_assistant_message() {
        let msg = ChatMessage::assistant("Hi there");
        assert_eq!(msg.content, "Hi there");
        assert!(!msg.is_user);
    }

    #[test]
    fn test_serialization_round_trip() {
        let msg = ChatMessage::user("round trip");
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
