//! TUI color semantics and style constants.
//!
//! Two families of styles live here:
//! - Chrome: title bar, help line, cursors, status. Fixed, independent of
//!   the presentation.
//! - Slide: derived from a rendered composition's palette, so the preview
//!   follows whatever theme the presentation carries.
//!
//! Color semantics for chrome:
//! - Green: success (generation done, file saved)
//! - Yellow: warning, attention (failed requests, refused edits)
//! - Cyan: interactive elements (keybinding hints, focused field)
//! - Dim: de-emphasized (layout names, placeholders)
//! - Bold: important (titles, counts)

use ratatui::style::{Color, Modifier, Style};

use crate::render::Palette;

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Success — green.
pub const STYLE_SAFE: Style = Style::new().fg(Color::Green);

/// Warning / attention needed — yellow.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Interactive element / keybinding hint — cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata — dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text — bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Active slide in the slide list.
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Cursor row in a list (focused, not active).
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Text being typed.
pub const STYLE_INPUT: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);

/// Progress / busy indicator.
pub const STYLE_PROGRESS: Style = Style::new().fg(Color::Cyan);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// SLIDE STYLES
// ============================================================================

/// Parse a `#rrggbb` theme color. Anything ratatui can't parse falls
/// back to the terminal default.
pub fn hex_color(hex: &str) -> Color {
    hex.trim().parse().unwrap_or(Color::Reset)
}

/// Slide surface: theme text on theme background.
pub fn slide_base(palette: &Palette) -> Style {
    Style::new()
        .fg(hex_color(&palette.text))
        .bg(hex_color(&palette.background))
}

/// Titles, headings and quote text.
pub fn slide_heading(palette: &Palette) -> Style {
    slide_base(palette)
        .fg(hex_color(&palette.heading))
        .add_modifier(Modifier::BOLD)
}

/// Bullets, attribution and image placeholders.
pub fn slide_accent(palette: &Palette) -> Style {
    slide_base(palette).fg(hex_color(&palette.accent))
}

/// Swatch block for one theme color in the picker.
pub fn swatch(hex: &str) -> Style {
    Style::new().bg(hex_color(hex))
}

// ============================================================================
// TESTS
// ============================================================================
