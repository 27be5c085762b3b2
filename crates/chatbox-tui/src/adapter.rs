//! Bridge from the conversation controller to the UI loop.
//!
//! The controller runs on its own task; its notifications are turned into
//! [`UiUpdate`]s and applied by the UI loop between frames.

use chatbox_engine::{Message, PresentationAdapter};
use tokio::sync::mpsc;
use tracing::debug;

/// A controller notification, ready to be applied to the app state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Replace the displayed conversation.
    Render(Vec<Message>),
    ShowPending,
    HidePending,
    InputEnabled(bool),
}

/// Presentation adapter that forwards notifications over a channel.
pub struct ChannelAdapter {
    tx: mpsc::UnboundedSender<UiUpdate>,
}

impl ChannelAdapter {
    pub fn new(tx: mpsc::UnboundedSender<UiUpdate>) -> Self {
        Self { tx }
    }

    /// Create an adapter together with the receiving end for the UI loop.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, update: UiUpdate) {
        if self.tx.send(update).is_err() {
            debug!("UI loop gone, dropping update");
        }
    }
}

impl PresentationAdapter for ChannelAdapter {
    fn render(&mut self, log: &[Message]) {
        self.send(UiUpdate::Render(log.to_vec()));
    }

    fn show_pending_indicator(&mut self) {
        self.send(UiUpdate::ShowPending);
    }

    fn hide_pending_indicator(&mut self) {
        self.send(UiUpdate::HidePending);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.send(UiUpdate::InputEnabled(enabled));
    }
}
