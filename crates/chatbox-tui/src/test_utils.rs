//! Test utilities for rendering widgets and screens to plain text.

use crate::app::App;
use chatbox_engine::DEFAULT_FLOATING_TEXT;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tokio::sync::mpsc;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test app with the default floating text, plus the receiving end
/// of its submissions.
pub fn create_test_app() -> (App, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (App::new(DEFAULT_FLOATING_TEXT, tx), rx)
}

/// Convert a buffer to a string, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut rows = Vec::with_capacity(usize::from(area.height));

    for y in area.y..area.y + area.height {
        let mut row = String::new();
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                row.push_str(cell.symbol());
            }
        }
        rows.push(row.trim_end_matches(' ').to_string());
    }

    rows.join("\n")
}

/// Render a widget into a fresh buffer and return it as a string.
pub fn render_widget_to_string<W: Widget>(widget: W, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    widget.render(area, &mut buffer);
    buffer_to_string(&buffer)
}

/// Draw the whole app at the default test size.
pub fn render_app_to_string(app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    crate::ui::draw(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_buffer_to_string_trims_rows() {
        let screen = render_widget_to_string(Paragraph::new("hi\nthere"), 10, 3);
        assert_eq!(screen, "hi\nthere\n");
    }

    #[test]
    fn test_render_app_has_default_size() {
        let (app, _rx) = create_test_app();
        let screen = render_app_to_string(&app);
        assert_eq!(screen.lines().count(), usize::from(TEST_HEIGHT));
    }
}
