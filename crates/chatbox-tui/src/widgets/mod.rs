//! Widgets for the chat TUI.

mod chat_panel;
mod launcher;
pub mod text_input;

pub use chat_panel::ChatPanel;
pub use launcher::{FloatingText, Launcher};
pub use text_input::TextInputState;
