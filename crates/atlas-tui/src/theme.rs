//! Atlas palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const OCEAN_BLUE: Color = Color::Rgb(97, 175, 239); // #61afef
pub const LAGOON_TEAL: Color = Color::Rgb(86, 214, 194); // #56d6c2
pub const SAND: Color = Color::Rgb(229, 200, 144); // #e5c890
pub const CORAL: Color = Color::Rgb(255, 121, 121); // #ff7979
pub const MOSS_GREEN: Color = Color::Rgb(152, 195, 121); // #98c379

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(198, 202, 214); // #c6cad6
pub const BORDER_GRAY: Color = Color::Rgb(92, 99, 112); // #5c6370
pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 50, 60); // #2c323c
pub const BG_DARK: Color = Color::Rgb(30, 33, 39); // #1e2127

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(LAGOON_TEAL).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(OCEAN_BLUE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Field label in the detail panel.
pub fn field_label() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Field value in the detail panel.
pub fn field_value() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Country name heading.
pub fn heading() -> Style {
    Style::default().fg(SAND).add_modifier(Modifier::BOLD)
}

/// Grid cell text.
pub fn grid_cell() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Grid cell under the cursor.
pub fn grid_cursor() -> Style {
    Style::default()
        .fg(OCEAN_BLUE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Grid cell of the currently selected country.
pub fn grid_selected() -> Style {
    Style::default().fg(SAND)
}

/// Border chip.
pub fn chip() -> Style {
    Style::default().fg(LAGOON_TEAL).bg(BG_HIGHLIGHT)
}

/// Border chip under the cursor.
pub fn chip_active() -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(LAGOON_TEAL)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in a tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(OCEAN_BLUE).add_modifier(Modifier::BOLD)
}

/// Inactive tab in a tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Error heading.
pub fn error_title() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::BOLD)
}

/// Push button.
pub fn button() -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(OCEAN_BLUE)
        .add_modifier(Modifier::BOLD)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(LAGOON_TEAL).add_modifier(Modifier::BOLD)
}
