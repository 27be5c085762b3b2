//! Placement of the launcher, floating text and chat panel.
//!
//! Everything hangs off the bottom-right corner of the screen:
//!
//! ```text
//!                        ┌─ Support Desk ─────────┐
//!                        │ ...                    │
//!                        │ > _                    │
//!                        └────────────────────────┘
//!   ╭──────────────────╮ ┌──────────┐
//!   │ floating text    │ │   Chat   │
//!   ╰──────────────────╯ └──────────┘
//! ```

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Launcher button size.
pub const LAUNCHER_WIDTH: u16 = 12;
pub const LAUNCHER_HEIGHT: u16 = 3;

/// Preferred chat panel size.
pub const PANEL_WIDTH: u16 = 52;
pub const PANEL_HEIGHT: u16 = 20;

/// Gap kept between widgets and the screen edge.
const MARGIN: u16 = 1;

/// Launcher button in the bottom-right corner.
pub fn launcher_area(area: Rect) -> Rect {
    let width = LAUNCHER_WIDTH.min(area.width);
    let height = LAUNCHER_HEIGHT.min(area.height);
    let x = area.x + area.width.saturating_sub(width + MARGIN);
    let y = area.y + area.height.saturating_sub(height);
    Rect::new(x, y, width, height)
}

/// Chat panel, stacked above the launcher and right-aligned with it.
pub fn panel_area(area: Rect) -> Rect {
    let launcher = launcher_area(area);
    let available_height = launcher.y.saturating_sub(area.y);
    let width = PANEL_WIDTH.min(area.width.saturating_sub(2 * MARGIN));
    let height = PANEL_HEIGHT.min(available_height);
    let x = (launcher.x + launcher.width).saturating_sub(width);
    let y = launcher.y.saturating_sub(height);
    Rect::new(x, y, width, height)
}

/// Floating text bubble to the left of the launcher, sized to its text.
pub fn bubble_area(area: Rect, text: &str) -> Rect {
    let launcher = launcher_area(area);
    let room = launcher.x.saturating_sub(area.x + 2 * MARGIN);
    #[allow(clippy::cast_possible_truncation)]
    let text_width = text.width().min(usize::from(u16::MAX)) as u16;
    let width = (text_width + 4).min(room);
    let x = launcher.x.saturating_sub(width + MARGIN);
    Rect::new(x, launcher.y, width, launcher.height)
}
