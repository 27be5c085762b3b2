//! Launcher button and floating text bubble.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::ui::theme::Styles;

/// Button that opens and closes the chat panel.
pub struct Launcher {
    open: bool,
}

impl Launcher {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    fn label(&self) -> &'static str {
        if self.open {
            "Close"
        } else {
            "Chat"
        }
    }
}

impl Widget for Launcher {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.open {
            Styles::border_active()
        } else {
            Styles::border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());

        Clear.render(area, buf);
        Paragraph::new(self.label())
            .style(Styles::active())
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

/// Teaser bubble shown next to the launcher until it is first used.
pub struct FloatingText<'a> {
    text: &'a str,
}

impl<'a> FloatingText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Widget for FloatingText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border())
            .style(Styles::bubble());

        Clear.render(area, buf);
        Paragraph::new(self.text)
            .style(Styles::bubble())
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_widget_to_string;

    #[test]
    fn test_launcher_label_follows_state() {
        assert!(render_widget_to_string(Launcher::new(false), 12, 3).contains("Chat"));
        assert!(render_widget_to_string(Launcher::new(true), 12, 3).contains("Close"));
    }

    #[test]
    fn test_floating_text_renders_text() {
        let screen = render_widget_to_string(FloatingText::new("Need help?"), 14, 3);
        assert!(screen.contains("Need help?"));
        assert!(screen.contains('╭'));
    }

    #[test]
    fn test_floating_text_skips_tiny_area() {
        let screen = render_widget_to_string(FloatingText::new("Need help?"), 2, 3);
        assert!(!screen.contains("Need"));
    }
}
