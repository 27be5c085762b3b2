//! Conversation controller.
//!
//! Owns the conversation log, talks to the answering service and tells the
//! presentation layer what to show. One submission cycle looks like:
//!
//! ```text
//! submit(text)
//!   ├─ append User message, render, disable input, show typing indicator
//!   ├─ join( request reply , sleep(min_reply_delay) )   <- resumes on the later
//!   ├─ append reply, or the fallback message on any failure
//!   └─ hide typing indicator, render, enable input       <- every path
//! ```
//!
//! The minimum delay keeps the typing indicator from flickering when the
//! service answers instantly; it never shortens a slow answer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::answering::{AnswerError, Answerer};
use crate::config::Config;
use crate::message::{ConversationLog, Message, DEFAULT_GREETING, FALLBACK_REPLY};

/// Default minimum time between a submission and its reply.
pub const MIN_REPLY_DELAY: Duration = Duration::from_millis(3000);

/// Rendering side of the widget, as seen by the controller.
///
/// All methods are notifications; the controller never looks at what the
/// adapter does with them.
pub trait PresentationAdapter: Send {
    /// Redraw the conversation, oldest message first.
    fn render(&mut self, log: &[Message]);

    /// Show the "assistant is typing" affordance.
    fn show_pending_indicator(&mut self);

    /// Remove the "assistant is typing" affordance.
    fn hide_pending_indicator(&mut self);

    /// Allow or block further submissions.
    fn set_input_enabled(&mut self, enabled: bool);
}

/// What happened to a submission.
#[derive(Debug)]
pub enum Submission {
    /// The text was blank; nothing was appended or sent.
    Ignored,
    /// The service replied and the reply was appended.
    Answered,
    /// The service failed and the fallback message was appended.
    Failed(AnswerError),
}

impl Submission {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Submission::Ignored)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Submission::Failed(_))
    }
}

/// Drives one conversation: the log, the pending-reply flag, and the
/// collaborators that render it and answer it.
pub struct ConversationController<P> {
    log: ConversationLog,
    awaiting_reply: bool,
    presenter: P,
    answerer: Arc<dyn Answerer>,
    min_reply_delay: Duration,
    greeting: String,
}

impl<P: PresentationAdapter> ConversationController<P> {
    /// Create a controller with the default greeting and minimum delay.
    pub fn new(presenter: P, answerer: Arc<dyn Answerer>) -> Self {
        Self {
            log: ConversationLog::new(),
            awaiting_reply: false,
            presenter,
            answerer,
            min_reply_delay: MIN_REPLY_DELAY,
            greeting: DEFAULT_GREETING.into(),
        }
    }

    /// Create a controller using the greeting and delay from `config`.
    pub fn from_config(config: &Config, presenter: P, answerer: Arc<dyn Answerer>) -> Self {
        Self::new(presenter, answerer)
            .with_min_reply_delay(config.min_reply_delay())
            .with_greeting(config.greeting.clone())
    }

    #[must_use]
    pub fn with_min_reply_delay(mut self, delay: Duration) -> Self {
        self.min_reply_delay = delay;
        self
    }

    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Seed the log with the greeting and render it.
    ///
    /// Does nothing once the log has any message.
    pub fn initialize(&mut self) {
        if !self.log.is_empty() {
            return;
        }
        self.log.push(Message::assistant(self.greeting.clone()));
        self.presenter.render(self.log.messages());
    }

    /// Run one submission cycle for `text`.
    ///
    /// Blank text is ignored outright. Otherwise the user message is shown
    /// before the request starts, and the reply (or the fallback) is appended
    /// no sooner than the minimum reply delay after submission.
    pub async fn submit(&mut self, text: &str) -> Submission {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return Submission::Ignored;
        }

        self.awaiting_reply = true;
        self.log.push(Message::user(text));
        self.presenter.render(self.log.messages());
        self.presenter.set_input_enabled(false);
        self.presenter.show_pending_indicator();
        info!(chars = text.chars().count(), "Message submitted");

        let started = Instant::now();
        let reply = request_reply(Arc::clone(&self.answerer), text, self.min_reply_delay).await;
        let outcome = match reply {
            Ok(answer) => {
                debug!(elapsed_ms = elapsed_ms(started), "Reply received");
                self.log.push(Message::assistant(answer));
                Submission::Answered
            }
            Err(e) => {
                warn!(
                    code = e.code(),
                    error = %e,
                    elapsed_ms = elapsed_ms(started),
                    "Answering service failed"
                );
                self.log.push(Message::assistant(FALLBACK_REPLY));
                Submission::Failed(e)
            }
        };

        self.finish_cycle();
        outcome
    }

    /// Process submissions one at a time until the sender goes away.
    ///
    /// Returns the controller so callers can inspect the final log.
    pub async fn run(mut self, mut submissions: mpsc::UnboundedReceiver<String>) -> Self {
        while let Some(text) = submissions.recv().await {
            self.submit(&text).await;
        }
        debug!(messages = self.log.len(), "Submission channel closed");
        self
    }

    fn finish_cycle(&mut self) {
        self.awaiting_reply = false;
        self.presenter.hide_pending_indicator();
        self.presenter.render(self.log.messages());
        self.presenter.set_input_enabled(true);
    }
}

/// Request a reply and wait out `min_delay`, whichever finishes later.
///
/// The request runs as its own task so a panicking answerer surfaces as an
/// error here instead of unwinding through the cycle.
async fn request_reply(
    answerer: Arc<dyn Answerer>,
    text: &str,
    min_delay: Duration,
) -> Result<String, AnswerError> {
    let message = text.to_owned();
    let request = tokio::spawn(async move { answerer.answer(&message).await });

    let (joined, ()) = tokio::join!(request, tokio::time::sleep(min_delay));
    joined.unwrap_or_else(|e| Err(AnswerError::Aborted(e.to_string())))
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
