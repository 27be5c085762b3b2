//! Drawing the chat widget.

pub mod layout;
pub mod theme;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::app::App;
use crate::widgets::{ChatPanel, FloatingText, Launcher};

/// Draw the launcher, the floating text while visible, and the panel while open.
pub fn draw(app: &App, area: Rect, buf: &mut Buffer) {
    Launcher::new(app.open).render(layout::launcher_area(area), buf);

    if app.floating_visible && !app.open {
        FloatingText::new(&app.floating_text)
            .render(layout::bubble_area(area, &app.floating_text), buf);
    }

    if app.open {
        ChatPanel::new(&app.messages, &app.input)
            .pending(app.pending)
            .input_enabled(app.input_enabled)
            .tick(app.tick)
            .render(layout::panel_area(area), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::UiUpdate;
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_app_to_string};
    use chatbox_engine::{Message, DEFAULT_FLOATING_TEXT, DEFAULT_GREETING};

    #[test]
    fn test_closed_widget_shows_launcher_and_floating_text() {
        let (app, _rx) = create_test_app();

        let screen = render_app_to_string(&app);

        assert!(screen.contains("Chat"));
        assert!(screen.contains(DEFAULT_FLOATING_TEXT));
        assert!(!screen.contains("Support Desk"));
    }

    #[test]
    fn test_open_widget_shows_panel_without_floating_text() {
        let (mut app, _rx) = create_test_app();
        app.apply(UiUpdate::Render(vec![Message::assistant(DEFAULT_GREETING)]));
        app.handle_action(Action::Toggle);

        let screen = render_app_to_string(&app);

        assert!(screen.contains("Close"));
        assert!(screen.contains("Support Desk"));
        assert!(screen.contains(DEFAULT_GREETING));
        assert!(!screen.contains(DEFAULT_FLOATING_TEXT));
    }

    #[test]
    fn test_floating_text_gone_after_closing_again() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::Toggle);
        app.handle_action(Action::Toggle);

        let screen = render_app_to_string(&app);

        assert!(screen.contains("Chat"));
        assert!(!screen.contains(DEFAULT_FLOATING_TEXT));
    }

    #[test]
    fn test_pending_reply_shows_typing_and_locked_input() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::Toggle);
        app.apply(UiUpdate::Render(vec![
            Message::assistant(DEFAULT_GREETING),
            Message::user("Where is my order?"),
        ]));
        app.apply(UiUpdate::InputEnabled(false));
        app.apply(UiUpdate::ShowPending);

        let screen = render_app_to_string(&app);

        assert!(screen.contains("Where is my order?"));
        assert!(screen.contains("Support Desk is typing."));
        assert!(screen.contains("Waiting for reply..."));
    }

    #[test]
    fn test_draw_in_tiny_terminal() {
        let (mut app, _rx) = create_test_app();
        app.handle_action(Action::Toggle);
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        // Should complete without panic
        draw(&app, area, &mut buf);
    }
}
