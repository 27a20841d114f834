//! Slide renderer: (Slide, Theme) → Composition.
//!
//! Pure and deterministic. The composition is a small view tree that any
//! frontend can draw; the terminal UI turns it into ratatui widgets and the
//! outline report turns it into text.
//!
//! Dispatch is on [`Layout`]. `chart` and unrecognized layouts use the
//! fallback composition. Content shorter than a layout expects just leaves
//! the missing piece out.

use serde::Serialize;

use crate::types::{Layout, Slide, Theme};

// ============================================================================
// COMPOSITION
// ============================================================================

/// Colors and font a composition is drawn with, all from one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Headings, titles and quote text.
    pub heading: String,
    pub accent: String,
    pub text: String,
    pub background: String,
    pub font_family: String,
}

impl From<&Theme> for Palette {
    fn from(theme: &Theme) -> Self {
        Palette {
            heading: theme.primary_color.clone(),
            accent: theme.secondary_color.clone(),
            text: theme.text_color.clone(),
            background: theme.background_color.clone(),
            font_family: theme.font_family.clone(),
        }
    }
}

/// One side of a two-region split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "paragraphs", rename_all = "kebab-case")]
pub enum Region {
    Paragraphs(Vec<String>),
    ImagePlaceholder,
}

/// The arrangement of a rendered slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Body {
    /// Centered title in the heading color, optional subtitle below.
    TitleCard {
        title: String,
        subtitle: Option<String>,
    },
    /// Heading plus bullets in content order.
    BulletList { heading: String, items: Vec<String> },
    /// Heading over a left/right split.
    Split {
        heading: String,
        left: Region,
        right: Region,
    },
    /// Centered quote, optional attribution.
    QuoteCard {
        quote: Option<String>,
        attribution: Option<String>,
    },
    /// Heading plus paragraphs in content order.
    Paragraphs {
        heading: String,
        paragraphs: Vec<String>,
    },
}

/// A slide ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub palette: Palette,
    pub body: Body,
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Compose `slide` under `theme`. Never fails.
pub fn render(slide: &Slide, theme: &Theme) -> Composition {
    let body = match &slide.layout {
        Layout::Title => Body::TitleCard {
            title: slide.title.clone(),
            subtitle: nth_present(&slide.content, 0),
        },
        Layout::Bullets => Body::BulletList {
            heading: slide.title.clone(),
            items: slide.content.clone(),
        },
        Layout::TextImage => Body::Split {
            heading: slide.title.clone(),
            left: Region::Paragraphs(slide.content.clone()),
            right: Region::ImagePlaceholder,
        },
        Layout::ImageText => Body::Split {
            heading: slide.title.clone(),
            left: Region::ImagePlaceholder,
            right: Region::Paragraphs(slide.content.clone()),
        },
        Layout::Quote => Body::QuoteCard {
            quote: nth_present(&slide.content, 0),
            attribution: nth_present(&slide.content, 1),
        },
        Layout::Chart | Layout::Other(_) => fallback_body(slide),
    };

    Composition {
        palette: Palette::from(theme),
        body,
    }
}

/// The composition used for `chart` and any unrecognized layout.
pub fn fallback(slide: &Slide, theme: &Theme) -> Composition {
    Composition {
        palette: Palette::from(theme),
        body: fallback_body(slide),
    }
}

fn fallback_body(slide: &Slide) -> Body {
    Body::Paragraphs {
        heading: slide.title.clone(),
        paragraphs: slide.content.clone(),
    }
}

/// `content[n]` if it exists and isn't empty.
fn nth_present(content: &[String], n: usize) -> Option<String> {
    content.get(n).filter(|s| !s.is_empty()).cloned()
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

/// Plain-text lines for a composition, used by the outline report.
pub fn text_lines(composition: &Composition) -> Vec<String> {
    let mut lines = Vec::new();
    match &composition.body {
        Body::TitleCard { title, subtitle } => {
            lines.push(format!("# {}", title));
            if let Some(subtitle) = subtitle {
                lines.push(format!("  {}", subtitle));
            }
        }
        Body::BulletList { heading, items } => {
            lines.push(format!("## {}", heading));
            lines.extend(items.iter().map(|item| format!("  • {}", item)));
        }
        Body::Split { heading, left, right } => {
            lines.push(format!("## {}", heading));
            lines.extend(region_lines("left", left));
            lines.extend(region_lines("right", right));
        }
        Body::QuoteCard { quote, attribution } => {
            if let Some(quote) = quote {
                lines.push(format!("  “{}”", quote));
            }
            if let Some(attribution) = attribution {
                lines.push(format!("    — {}", attribution));
            }
        }
        Body::Paragraphs { heading, paragraphs } => {
            lines.push(format!("## {}", heading));
            lines.extend(paragraphs.iter().map(|p| format!("  {}", p)));
        }
    }
    lines
}

fn region_lines(side: &str, region: &Region) -> Vec<String> {
    match region {
        Region::ImagePlaceholder => vec![format!("  [{}] [image]", side)],
        Region::Paragraphs(paragraphs) => paragraphs
            .iter()
            .map(|p| format!("  [{}] {}", side, p))
            .collect(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
