//! Message model for the chat widget.
//!
//! A [`Message`] is immutable once created, and a [`ConversationLog`] only
//! ever grows. Identity is positional: the n-th message is whatever was
//! appended n-th.

use serde::{Deserialize, Serialize};

/// Greeting seeded into every new conversation.
pub const DEFAULT_GREETING: &str = "Hello! How can I be of Assistance today?";

/// Reply shown when the answering service fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the widget.
    User,
    /// The support desk answering.
    Assistant,
}

impl Role {
    /// Label shown next to messages from this role.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Support Desk",
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Role,
    text: String,
}

impl Message {
    /// Create a message from the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Role::User,
            text: text.into(),
        }
    }

    /// Create a message from the assistant.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Role::Assistant,
            text: text.into(),
        }
    }

    pub fn sender(&self) -> Role {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, append-only record of exchanged messages.
///
/// Only the engine can append; everything else gets a read-only view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a ConversationLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
