//! chatbox-engine: Conversation engine for the chatbox support widget
//!
//! This crate provides the parts of the widget with real contracts:
//! - The append-only conversation log and its message model
//! - The conversation controller with its minimum typing delay
//! - The HTTP client for the answering service
//! - Intents loading and floating-text selection
//! - An offline answerer matching intent patterns
//! - Configuration

pub mod answering;
pub mod config;
pub mod controller;
pub mod intents;
pub mod matching;
pub mod message;

// Re-export commonly used types
pub use answering::{answerer_from_config, AnswerError, Answerer, HttpAnswerer, DEFAULT_ENDPOINT};
pub use config::{Config, ConfigError, CHATBOX_DIR};
pub use controller::{ConversationController, PresentationAdapter, Submission, MIN_REPLY_DELAY};
pub use intents::{floating_text, Intent, IntentsDocument, IntentsError, DEFAULT_FLOATING_TEXT};
pub use matching::{IntentAnswerer, EMPTY_MESSAGE_REPLY, NO_MATCH_REPLY};
pub use message::{ConversationLog, Message, Role, DEFAULT_GREETING, FALLBACK_REPLY};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
