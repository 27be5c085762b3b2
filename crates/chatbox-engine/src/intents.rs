//! Intents document and floating-text selection.
//!
//! The intents document is shared with the answering service. The widget
//! reads it to pick the teaser text shown next to the launcher button, and
//! the offline answerer matches messages against its patterns.

use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Floating text used when the intents document has nothing better.
pub const DEFAULT_FLOATING_TEXT: &str = "Hello! How may I assist you today?";

/// Intent tags that can supply the floating text.
const FLOATING_TAGS: [&str; 2] = ["floating_text", "greeting"];

/// One named intent with its candidate responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// Top-level intents document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentsDocument {
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub floating_text: Option<String>,
    #[serde(default)]
    pub default_greeting: Option<String>,
}

impl IntentsDocument {
    /// Parse a document from JSON text.
    pub fn from_json(content: &str) -> Result<Self, IntentsError> {
        serde_json::from_str(content).map_err(IntentsError::Parse)
    }

    /// Load a document from a local file.
    pub fn load(path: &Path) -> Result<Self, IntentsError> {
        let content = std::fs::read_to_string(path).map_err(IntentsError::Io)?;
        Self::from_json(&content)
    }

    /// Load a document from a local file without blocking the runtime.
    pub async fn read(path: &Path) -> Result<Self, IntentsError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    /// Fetch a document over HTTP.
    pub async fn fetch(url: &str) -> Result<Self, IntentsError> {
        let response = reqwest::get(url).await?.error_for_status()?;
        let content = response.text().await?;
        Self::from_json(&content)
    }

    /// Load from a path or an `http(s)://` URL.
    ///
    /// Failures are logged and reported as `None`, so a missing document
    /// never stops the widget from starting.
    pub async fn load_from(source: &str) -> Option<Self> {
        let result = if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch(source).await
        } else {
            Self::read(Path::new(source)).await
        };

        match result {
            Ok(doc) => {
                info!(source, intents = doc.intents.len(), "Intents loaded");
                Some(doc)
            }
            Err(e) => {
                warn!(source, error = %e, "Error loading intents");
                None
            }
        }
    }

    /// First response of the intent tagged `tag`, if it has any.
    pub fn response_for_tag(&self, tag: &str) -> Option<&str> {
        self.intents
            .iter()
            .find(|intent| intent.tag == tag)
            .and_then(|intent| intent.responses.first())
            .map(String::as_str)
    }

    /// Pick the floating text.
    ///
    /// Priority: the first response of the first intent tagged
    /// `floating_text` or `greeting`, then the top-level `floating_text`,
    /// then `default_greeting`, then [`DEFAULT_FLOATING_TEXT`].
    pub fn floating_text(&self) -> &str {
        self.intents
            .iter()
            .find(|intent| FLOATING_TAGS.contains(&intent.tag.as_str()))
            .and_then(|intent| intent.responses.first())
            .or(self.floating_text.as_ref())
            .or(self.default_greeting.as_ref())
            .map_or(DEFAULT_FLOATING_TEXT, String::as_str)
    }
}

/// Floating text for an optional document.
pub fn floating_text(doc: Option<&IntentsDocument>) -> &str {
    doc.map_or(DEFAULT_FLOATING_TEXT, IntentsDocument::floating_text)
}

/// Errors that can occur when loading intents.
#[derive(Debug, thiserror::Error)]
pub enum IntentsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
