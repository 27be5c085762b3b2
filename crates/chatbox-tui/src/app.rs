//! Application state and update logic for the chat TUI.

use chatbox_engine::Message;
use tokio::sync::mpsc;
use tracing::warn;

use crate::adapter::UiUpdate;
use crate::event::Action;
use crate::widgets::TextInputState;

/// State of the chat widget as drawn on screen.
///
/// The conversation itself belongs to the controller; `messages`, `pending`
/// and `input_enabled` are only ever changed by applying its updates, apart
/// from the input being locked as soon as a message is sent.
#[derive(Debug)]
pub struct App {
    /// Whether the chat panel is open.
    pub open: bool,
    /// Teaser text shown next to the launcher.
    pub floating_text: String,
    /// Cleared for good once the launcher is used.
    pub floating_visible: bool,
    /// Last conversation rendered by the controller.
    pub messages: Vec<Message>,
    /// Whether the typing indicator is showing.
    pub pending: bool,
    pub input_enabled: bool,
    pub input: TextInputState,
    pub should_quit: bool,
    /// Animation counter, advanced on every tick.
    pub tick: usize,
    submissions: mpsc::UnboundedSender<String>,
}

impl App {
    /// Create the app, sending submitted text to `submissions`.
    pub fn new(floating_text: impl Into<String>, submissions: mpsc::UnboundedSender<String>) -> Self {
        Self {
            open: false,
            floating_text: floating_text.into(),
            floating_visible: true,
            messages: Vec::new(),
            pending: false,
            input_enabled: true,
            input: TextInputState::new(),
            should_quit: false,
            tick: 0,
            submissions,
        }
    }

    /// Handle a user action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Toggle => self.toggle(),
            Action::Submit => self.submit_input(),
            Action::None => {}
            edit => self.edit_input(edit),
        }
    }

    /// Apply a notification from the controller.
    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::Render(messages) => self.messages = messages,
            UiUpdate::ShowPending => self.pending = true,
            UiUpdate::HidePending => self.pending = false,
            UiUpdate::InputEnabled(enabled) => self.input_enabled = enabled,
        }
    }

    /// Advance the typing animation.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Switch the floating text, e.g. to another intent's response.
    pub fn set_floating_text(&mut self, text: impl Into<String>) {
        self.floating_text = text.into();
    }

    fn toggle(&mut self) {
        self.open = !self.open;
        self.floating_visible = false;
    }

    fn edit_input(&mut self, action: Action) {
        if !self.open || !self.input_enabled {
            return;
        }

        match action {
            Action::Insert(c) => self.input.insert(c),
            Action::Backspace => self.input.backspace(),
            Action::Delete => self.input.delete(),
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            _ => {}
        }
    }

    fn submit_input(&mut self) {
        if !self.open || !self.input_enabled || self.input.is_blank() {
            return;
        }

        let text = self.input.take();
        // Lock until the controller re-enables input after the reply.
        self.input_enabled = false;
        if self.submissions.send(text).is_err() {
            warn!("Conversation controller is gone; message dropped");
            self.input_enabled = true;
        }
    }
}
