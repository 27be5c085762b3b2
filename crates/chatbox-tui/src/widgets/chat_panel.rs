//! Chat panel widget.
//!
//! Shows the conversation with the newest message at the bottom, the typing
//! indicator while a reply is pending, and the input line.
//!
//! ```text
//! ┌ Support Desk ─────────────────────────┐
//! │Support Desk                           │
//! │Hello! How can I be of Assistance      │
//! │today?                                 │
//! │                                    You│
//! │                            I need help│
//! │                                       │
//! │Support Desk is typing...              │
//! │───────────────────────────────────────│
//! │> Waiting for reply...                 │
//! └───────────────────────────────────────┘
//! ```

use chatbox_engine::{Message, Role};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    symbols::line,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::ui::theme::{Styles, Symbols};
use crate::widgets::TextInputState;

/// Height of the input area (in lines).
const INPUT_HEIGHT: u16 = 1;

/// Height for the divider line.
const DIVIDER_HEIGHT: u16 = 1;

/// Conversation view plus input line.
pub struct ChatPanel<'a> {
    messages: &'a [Message],
    input: &'a TextInputState,
    pending: bool,
    input_enabled: bool,
    tick: usize,
}

impl<'a> ChatPanel<'a> {
    pub fn new(messages: &'a [Message], input: &'a TextInputState) -> Self {
        Self {
            messages,
            input,
            pending: false,
            input_enabled: true,
            tick: 0,
        }
    }

    /// Show the typing indicator.
    #[must_use]
    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    #[must_use]
    pub fn input_enabled(mut self, enabled: bool) -> Self {
        self.input_enabled = enabled;
        self
    }

    /// Animation frame for the typing indicator.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Lay out every message as wrapped lines, oldest first.
    fn message_lines(&self, width: u16) -> Vec<Line<'static>> {
        let wrap_width = usize::from(width.saturating_sub(2)).max(1);
        let mut lines = Vec::new();

        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }

            let (label_style, alignment) = match message.sender() {
                Role::Assistant => (Styles::visitor(), Alignment::Left),
                Role::User => (Styles::operator(), Alignment::Right),
            };

            lines.push(
                Line::from(Span::styled(message.sender().display_name(), label_style))
                    .alignment(alignment),
            );
            for row in textwrap::wrap(message.text(), wrap_width) {
                lines.push(
                    Line::from(Span::styled(row.into_owned(), Styles::default()))
                        .alignment(alignment),
                );
            }
        }

        if self.pending {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            let dots = Symbols::TYPING[self.tick % Symbols::TYPING.len()];
            lines.push(Line::from(Span::styled(
                format!("{} is typing{dots}", Role::Assistant.display_name()),
                Styles::typing(),
            )));
        }

        lines
    }

    /// Render messages anchored to the bottom of `area`.
    fn render_messages(&self, area: Rect, buf: &mut Buffer) {
        let lines = self.message_lines(area.width);
        let skip = lines.len().saturating_sub(usize::from(area.height));
        let visible: Vec<Line<'static>> = lines.into_iter().skip(skip).collect();

        Paragraph::new(visible)
            .style(Styles::default())
            .render(area, buf);
    }

    fn render_divider(area: Rect, buf: &mut Buffer) {
        if area.width == 0 {
            return;
        }

        let divider = line::HORIZONTAL.repeat(usize::from(area.width));
        Paragraph::new(Line::from(Span::styled(divider, Styles::border()))).render(area, buf);
    }

    /// Render the input line, keeping the cursor in view.
    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(Symbols::PROMPT, Styles::active())];

        if !self.input_enabled {
            spans.push(Span::styled("Waiting for reply...", Styles::dim()));
        } else if self.input.is_empty() {
            spans.push(Span::styled("_", Styles::active()));
            spans.push(Span::styled(" Write a message...", Styles::dim()));
        } else {
            let chars: Vec<char> = self.input.content().chars().collect();
            let room = usize::from(area.width)
                .saturating_sub(Symbols::PROMPT.len() + 1)
                .max(1);
            let cursor = self.input.cursor();
            let start = cursor.saturating_sub(room);
            let end = (start + room).min(chars.len());

            let before: String = chars[start..cursor].iter().collect();
            spans.push(Span::styled(before, Styles::default()));
            if cursor < chars.len() {
                let after: String = chars[cursor..end].iter().collect();
                spans.push(Span::styled("|", Styles::active()));
                spans.push(Span::styled(after, Styles::default()));
            } else {
                spans.push(Span::styled("_", Styles::active()));
            }
        }

        Paragraph::new(Line::from(spans))
            .style(Styles::default())
            .render(area, buf);
    }
}

impl Widget for ChatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.input_enabled {
            Styles::border_active()
        } else {
            Styles::border()
        };

        let block = Block::default()
            .title(format!(" {} ", Role::Assistant.display_name()))
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());

        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if inner.height < INPUT_HEIGHT + DIVIDER_HEIGHT + 1 {
            // Not enough space - just show input
            self.render_input(inner, buf);
            return;
        }

        let messages_height = inner.height - INPUT_HEIGHT - DIVIDER_HEIGHT;
        let divider_y = inner.y + messages_height;
        let input_y = divider_y + DIVIDER_HEIGHT;

        self.render_messages(
            Rect::new(inner.x, inner.y, inner.width, messages_height),
            buf,
        );
        Self::render_divider(Rect::new(inner.x, divider_y, inner.width, DIVIDER_HEIGHT), buf);
        self.render_input(Rect::new(inner.x, input_y, inner.width, INPUT_HEIGHT), buf);
    }
}
