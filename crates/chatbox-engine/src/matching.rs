//! Offline answering from the intents document.
//!
//! Each intent pattern is compared with the user message in two ways:
//! - a whole-phrase hit (the pattern's words appear in order in the message)
//!   scores 1.0
//! - otherwise keyword overlap scores `shared / max(message, pattern)`, where
//!   keywords are words longer than two characters that are not stop words
//!
//! The best intent scoring above [`MATCH_THRESHOLD`] answers with its first
//! response.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

use crate::answering::{AnswerError, Answerer};
use crate::intents::IntentsDocument;

/// Reply to a blank message.
pub const EMPTY_MESSAGE_REPLY: &str = "Please enter a message.";

/// Reply when no intent matches well enough.
pub const NO_MATCH_REPLY: &str =
    "I'm sorry, I couldn't find a specific answer to your question. Please try rephrasing.";

/// Minimum score for an intent to answer.
pub const MATCH_THRESHOLD: f64 = 0.5;

const STOP_WORDS: [&str; 27] = [
    "what", "how", "where", "when", "why", "who", "is", "are", "can", "do", "does", "the", "a",
    "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "i", "my",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("Invalid word pattern"));

fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

fn keywords(words: &[String]) -> HashSet<&str> {
    words
        .iter()
        .map(String::as_str)
        .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        .collect()
}

/// Score how well `pattern` describes `message`, from 0.0 to 1.0.
#[allow(clippy::cast_precision_loss)]
pub fn score(message: &str, pattern: &str) -> f64 {
    let message_words = words(message);
    let pattern_words = words(pattern);
    if message_words.is_empty() || pattern_words.is_empty() {
        return 0.0;
    }

    if message_words
        .windows(pattern_words.len())
        .any(|window| window == pattern_words.as_slice())
    {
        return 1.0;
    }

    let message_keys = keywords(&message_words);
    let pattern_keys = keywords(&pattern_words);
    let longest = message_keys.len().max(pattern_keys.len());
    if longest == 0 {
        return 0.0;
    }

    message_keys.intersection(&pattern_keys).count() as f64 / longest as f64
}

/// Answers from intent patterns without any network access.
#[derive(Debug, Clone, Default)]
pub struct IntentAnswerer {
    document: IntentsDocument,
}

impl IntentAnswerer {
    pub fn new(document: IntentsDocument) -> Self {
        Self { document }
    }

    /// Reply for `message`: the best intent's first response, or a canned
    /// reply for blank or unmatched text.
    pub fn reply(&self, message: &str) -> &str {
        let message = message.trim();
        if message.is_empty() {
            return EMPTY_MESSAGE_REPLY;
        }

        let mut best: Option<(f64, &str, &str)> = None;
        for intent in &self.document.intents {
            let Some(response) = intent.responses.first() else {
                continue;
            };
            for pattern in &intent.patterns {
                let s = score(message, pattern);
                if s > MATCH_THRESHOLD && best.is_none_or(|(top, _, _)| s > top) {
                    best = Some((s, intent.tag.as_str(), response.as_str()));
                }
            }
        }

        match best {
            Some((s, tag, response)) => {
                debug!(tag, score = s, "Intent matched");
                response
            }
            None => {
                debug!("No intent matched");
                NO_MATCH_REPLY
            }
        }
    }
}

#[async_trait]
impl Answerer for IntentAnswerer {
    async fn answer(&self, message: &str) -> Result<String, AnswerError> {
        Ok(self.reply(message).to_string())
    }
}
