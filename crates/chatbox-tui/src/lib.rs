//! chatbox-tui: Terminal front end for the chatbox support widget
//!
//! This crate provides the TUI layer for chatbox, including:
//! - The launcher button and floating text bubble
//! - The chat panel with its typing indicator and input line
//! - A presentation adapter that feeds controller updates to the UI loop

mod adapter;
mod app;
mod event;
#[cfg(test)]
pub mod test_utils;
mod ui;
mod widgets;

pub use adapter::{ChannelAdapter, UiUpdate};
pub use app::App;
pub use chatbox_engine;
pub use event::{key_to_action, Action, Event, EventHandler};

use chatbox_engine::{
    answerer_from_config, floating_text, Config, ConversationController, IntentsDocument,
};
use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Tick rate for the typing animation (4 Hz).
const TICK_RATE_MS: u64 = 250;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the chat widget in the terminal until the user quits.
///
/// The conversation controller runs on its own task; the UI loop keeps
/// drawing and animating while a reply is outstanding.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let answerer = answerer_from_config(config).await?;
    let (presenter, mut updates) = ChannelAdapter::channel();
    let (submissions_tx, submissions_rx) = mpsc::unbounded_channel();

    let mut controller = ConversationController::from_config(config, presenter, answerer);
    controller.initialize();
    let controller_task = tokio::spawn(controller.run(submissions_rx));

    // Intents may come over the network; the default text shows until then.
    let intents_source = config.intents.clone();
    let intents_task: JoinHandle<Option<String>> = tokio::spawn(async move {
        let source = intents_source?;
        let doc = IntentsDocument::load_from(&source).await;
        Some(floating_text(doc.as_ref()).to_string())
    });

    let mut app = App::new(floating_text(None), submissions_tx);

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(TICK_RATE_MS);
    info!(endpoint = %config.endpoint, offline = config.offline, "Chat widget started");

    let result = run_loop(&mut terminal, &mut app, &mut events, &mut updates, intents_task).await;

    controller_task.abort();
    terminal.show_cursor()?;
    info!("Chat widget closed");

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    updates: &mut mpsc::UnboundedReceiver<UiUpdate>,
    mut intents_task: JoinHandle<Option<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut intents_pending = true;

    while !app.should_quit {
        terminal.draw(|frame| {
            let area = frame.area();
            ui::draw(app, area, frame.buffer_mut());
        })?;

        tokio::select! {
            event = events.next() => match event {
                Some(Event::Key(key)) => {
                    let action = key_to_action(key, app.open);
                    app.handle_action(action);
                }
                Some(Event::Tick) => app.tick(),
                // Terminal will handle resize automatically
                Some(Event::Resize(_, _)) => {}
                None => break,
            },
            Some(update) = updates.recv() => app.apply(update),
            loaded = &mut intents_task, if intents_pending => {
                intents_pending = false;
                match loaded {
                    Ok(Some(text)) => app.set_floating_text(text),
                    Ok(None) => debug!("No intents source configured"),
                    Err(e) => debug!(error = %e, "Intents task failed"),
                }
            }
        }
    }

    Ok(())
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
    }
}
