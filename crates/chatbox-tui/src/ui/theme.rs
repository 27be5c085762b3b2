//! Colors and styles for the chat widget.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(30, 30, 40);
    pub const FG: Color = Color::Rgb(220, 220, 230);
    pub const DIM: Color = Color::Rgb(140, 140, 160);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(130, 170, 255);

    // Message colors
    pub const VISITOR: Color = Color::Rgb(148, 226, 213);
    pub const OPERATOR: Color = Color::Rgb(250, 179, 135);

    // Floating text bubble
    pub const BUBBLE_BG: Color = Color::Rgb(45, 45, 60);

    // Border colors
    pub const BORDER: Color = Color::Rgb(80, 80, 100);
    pub const BORDER_ACTIVE: Color = Color::Rgb(130, 170, 255);
}

/// Indicator symbols.
pub struct Symbols;

impl Symbols {
    pub const PROMPT: &'static str = "> ";
    pub const TYPING: [&'static str; 3] = [".", "..", "..."];
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for placeholders and hints.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Label over support desk messages.
    pub fn visitor() -> Style {
        Style::default()
            .fg(Palette::VISITOR)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Label over the user's own messages.
    pub fn operator() -> Style {
        Style::default()
            .fg(Palette::OPERATOR)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Typing indicator.
    pub fn typing() -> Style {
        Style::default()
            .fg(Palette::VISITOR)
            .bg(Palette::BG)
            .add_modifier(Modifier::ITALIC)
    }

    /// Floating text bubble.
    pub fn bubble() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BUBBLE_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}
