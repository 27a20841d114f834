//! Built-in slide themes and generation styles.
//!
//! Two separate vocabularies:
//! - [`Theme`]: colors and font the editor applies to slides.
//! - [`GenerationStyle`]: the style name the generation backend accepts.

use crate::types::Theme;

// ============================================================================
// SLIDE THEMES
// ============================================================================

fn theme(
    id: &str,
    name: &str,
    primary: &str,
    secondary: &str,
    background: &str,
    text: &str,
    font: &str,
) -> Theme {
    Theme {
        id: id.to_string(),
        name: name.to_string(),
        primary_color: primary.to_string(),
        secondary_color: secondary.to_string(),
        background_color: background.to_string(),
        text_color: text.to_string(),
        font_family: font.to_string(),
    }
}

/// Every theme the editor offers, in picker order. The first is the default.
pub fn catalog() -> Vec<Theme> {
    vec![
        theme("default", "Default Theme", "#3f51b5", "#f50057", "#ffffff", "#212121", "Roboto, sans-serif"),
        theme("dark", "Dark Theme", "#bb86fc", "#03dac6", "#121212", "#ffffff", "Roboto, sans-serif"),
        theme("nature", "Nature Theme", "#4caf50", "#ff9800", "#f5f5f5", "#2e7d32", "Georgia, serif"),
        theme("tech", "Tech Theme", "#00bcd4", "#ff4081", "#eceff1", "#263238", "Courier New, monospace"),
        theme("elegant", "Elegant Theme", "#9c27b0", "#ffc107", "#ffffff", "#424242", "Playfair Display, serif"),
        theme("corporate", "Corporate Theme", "#1976d2", "#f57c00", "#f8f9fa", "#37474f", "Arial, sans-serif"),
    ]
}

/// The theme new presentations start with.
pub fn default_theme() -> Theme {
    theme("default", "Default Theme", "#3f51b5", "#f50057", "#ffffff", "#212121", "Roboto, sans-serif")
}

/// Look up a catalog theme by id.
pub fn find(id: &str) -> Option<Theme> {
    catalog().into_iter().find(|t| t.id == id)
}

/// Index of the theme with this id in [`catalog`].
pub fn position(id: &str) -> Option<usize> {
    catalog().iter().position(|t| t.id == id)
}

// ============================================================================
// GENERATION STYLES
// ============================================================================

/// Style names understood by the generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStyle {
    #[default]
    Professional,
    Creative,
    Minimal,
    Vibrant,
    Academic,
    Tech,
}

impl GenerationStyle {
    pub const ALL: [GenerationStyle; 6] = [
        GenerationStyle::Professional,
        GenerationStyle::Creative,
        GenerationStyle::Minimal,
        GenerationStyle::Vibrant,
        GenerationStyle::Academic,
        GenerationStyle::Tech,
    ];

    /// Name sent as `theme` in the generation request.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationStyle::Professional => "professional",
            GenerationStyle::Creative => "creative",
            GenerationStyle::Minimal => "minimal",
            GenerationStyle::Vibrant => "vibrant",
            GenerationStyle::Academic => "academic",
            GenerationStyle::Tech => "tech",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GenerationStyle::Professional => "Professional",
            GenerationStyle::Creative => "Creative",
            GenerationStyle::Minimal => "Minimal",
            GenerationStyle::Vibrant => "Vibrant",
            GenerationStyle::Academic => "Academic",
            GenerationStyle::Tech => "Tech",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GenerationStyle::Professional => {
                "Clean and corporate look suitable for business presentations"
            }
            GenerationStyle::Creative => "Modern and artistic style for creative topics",
            GenerationStyle::Minimal => "Simple, clean design focusing on content",
            GenerationStyle::Vibrant => "Bold and energetic with high contrast colors",
            GenerationStyle::Academic => "Traditional style suitable for educational content",
            GenerationStyle::Tech => "Futuristic look ideal for technology topics",
        }
    }

    pub fn next(self) -> Self {
        let i = self.index();
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = self.index();
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
