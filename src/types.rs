//! Domain types for slidedeck.
//!
//! Field names serialize in camelCase so deck files match the data model
//! the generation frontend has always used (`primaryColor`, `lastEdited`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// LAYOUT
// ============================================================================

/// Visual arrangement of a slide.
///
/// Unknown layout strings are kept verbatim in [`Layout::Other`] and render
/// with the fallback composition. They are never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layout {
    /// Centered title with optional subtitle.
    Title,
    /// Heading plus bullet list.
    Bullets,
    /// Paragraphs left, image right.
    TextImage,
    /// Image left, paragraphs right.
    ImageText,
    /// Centered quote with optional attribution.
    Quote,
    /// Chart or diagram. No dedicated composition yet.
    Chart,
    /// Any layout string we don't recognize.
    Other(String),
}

impl Layout {
    /// The six layouts the editor offers, in menu order.
    pub const KNOWN: [Layout; 6] = [
        Layout::Title,
        Layout::Bullets,
        Layout::TextImage,
        Layout::ImageText,
        Layout::Quote,
        Layout::Chart,
    ];

    /// Wire name of the layout.
    pub fn as_str(&self) -> &str {
        match self {
            Layout::Title => "title",
            Layout::Bullets => "bullets",
            Layout::TextImage => "text-image",
            Layout::ImageText => "image-text",
            Layout::Quote => "quote",
            Layout::Chart => "chart",
            Layout::Other(name) => name,
        }
    }

    /// Human label shown in the layout picker.
    pub fn label(&self) -> &str {
        match self {
            Layout::Title => "Title Slide",
            Layout::Bullets => "Bullet Points",
            Layout::TextImage => "Text with Image (Right)",
            Layout::ImageText => "Image with Text (Left)",
            Layout::Quote => "Quote",
            Layout::Chart => "Chart or Diagram",
            Layout::Other(name) => name,
        }
    }

    /// Next known layout in menu order. Unknown layouts cycle to `Title`.
    pub fn next(&self) -> Layout {
        let position = Self::KNOWN.iter().position(|l| l == self);
        match position {
            Some(i) => Self::KNOWN[(i + 1) % Self::KNOWN.len()].clone(),
            None => Layout::Title,
        }
    }
}

impl From<&str> for Layout {
    fn from(value: &str) -> Self {
        match value {
            "title" => Layout::Title,
            "bullets" => Layout::Bullets,
            "text-image" => Layout::TextImage,
            "image-text" => Layout::ImageText,
            "quote" => Layout::Quote,
            "chart" => Layout::Chart,
            other => Layout::Other(other.to_string()),
        }
    }
}

impl From<String> for Layout {
    fn from(value: String) -> Self {
        Layout::from(value.as_str())
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// THEME
// ============================================================================

/// Named set of display colors and a font family, applied to every slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    /// Heading color, `#rrggbb`.
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
}

// ============================================================================
// SLIDES
// ============================================================================

/// One ordered content unit of a presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Stable for the slide's lifetime.
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub layout: Layout,
    /// Single text for title/quote, bullets for bullets, paragraphs otherwise.
    #[serde(default)]
    pub content: Vec<String>,
    /// Speaker notes. Never shown in the preview.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields for a slide that doesn't exist yet. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDraft {
    #[serde(default)]
    pub title: String,
    pub layout: Layout,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SlideDraft {
    pub fn new(title: impl Into<String>, layout: Layout, content: Vec<String>) -> Self {
        SlideDraft {
            title: title.into(),
            layout,
            content,
            notes: None,
        }
    }

    /// The slide the editor inserts when the user asks for a new one.
    pub fn placeholder() -> Self {
        SlideDraft::new(
            "New Slide",
            Layout::TextImage,
            vec!["Add your content here".to_string()],
        )
    }

    pub(crate) fn into_slide(self, id: String) -> Slide {
        Slide {
            id,
            title: self.title,
            layout: self.layout,
            content: self.content,
            notes: self.notes,
        }
    }
}

/// Partial slide update. `None` fields keep the slide's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlidePatch {
    pub title: Option<String>,
    pub layout: Option<Layout>,
    pub content: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl SlidePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn content(mut self, content: Vec<String>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Shallow merge onto `slide`. The id never changes.
    pub fn apply_to(&self, slide: &Slide) -> Slide {
        Slide {
            id: slide.id.clone(),
            title: self.title.clone().unwrap_or_else(|| slide.title.clone()),
            layout: self.layout.clone().unwrap_or_else(|| slide.layout.clone()),
            content: self.content.clone().unwrap_or_else(|| slide.content.clone()),
            notes: self.notes.clone().or_else(|| slide.notes.clone()),
        }
    }
}

// ============================================================================
// PRESENTATION
// ============================================================================

/// A titled, themed, ordered list of slides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub title: String,
    #[serde(default)]
    pub slides: Vec<Slide>,
    pub theme: Theme,
    #[serde(default = "Utc::now")]
    pub last_edited: DateTime<Utc>,
}

impl Presentation {
    pub fn new(title: impl Into<String>, slides: Vec<Slide>, theme: Theme) -> Self {
        Presentation {
            title: title.into(),
            slides,
            theme,
            last_edited: Utc::now(),
        }
    }

    /// Position of the first slide with this id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Handles to a generated presentation file, issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub download_url: String,
    pub file_path: String,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub description: String,
    /// Backend style name, e.g. `professional`.
    pub theme: String,
}

impl GenerateRequest {
    pub fn new(
        topic: impl Into<String>,
        description: impl Into<String>,
        theme: impl Into<String>,
    ) -> Self {
        GenerateRequest {
            topic: topic.into(),
            description: description.into(),
            theme: theme.into(),
        }
    }
}

/// Full response payload from the generation endpoint.
///
/// Unknown fields are kept in `extra` so callers get the payload as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GenerateResponse {
    /// A successful payload carrying both handles.
    pub fn succeeded(download_url: impl Into<String>, file_path: impl Into<String>) -> Self {
        GenerateResponse {
            success: true,
            download_url: Some(download_url.into()),
            file_path: Some(file_path.into()),
            error: None,
            extra: serde_json::Map::new(),
        }
    }

    /// The handles, if the payload reports success and carries both.
    pub fn result(&self) -> Option<GenerationResult> {
        if !self.success {
            return None;
        }
        Some(GenerationResult {
            download_url: self.download_url.clone()?,
            file_path: self.file_path.clone()?,
        })
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Where the generation backend lives.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://127.0.0.1:5000`. Download URLs are
    /// resolved against it.
    pub base_url: String,
}

/// Default backend origin.
pub const DEFAULT_BACKEND: &str = "http://127.0.0.1:5000";

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND.to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_slide() -> Slide {
        Slide {
            id: "1".into(),
            title: "Revenue".into(),
            layout: Layout::Bullets,
            content: vec!["A".into(), "B".into()],
            notes: Some("mention Q4".into()),
        }
    }

    #[test]
    fn layout_parses_known_names() {
        assert_eq!(Layout::from("text-image"), Layout::TextImage);
        assert_eq!(Layout::from("image-text"), Layout::ImageText);
        assert_eq!(Layout::from("chart"), Layout::Chart);
    }

    #[test]
    fn unknown_layout_is_preserved_verbatim() {
        let layout = Layout::from("unknown-value");
        assert_eq!(layout, Layout::Other("unknown-value".into()));
        assert_eq!(String::from(layout), "unknown-value");
    }

    #[test]
    fn layout_serializes_as_plain_string() {
        let json = serde_json::to_string(&Layout::TextImage).unwrap();
        assert_eq!(json, "\"text-image\"");
        let back: Layout = serde_json::from_str("\"spiral\"").unwrap();
        assert_eq!(back, Layout::Other("spiral".into()));
    }

    #[test]
    fn layout_next_cycles_known_layouts() {
        assert_eq!(Layout::Title.next(), Layout::Bullets);
        assert_eq!(Layout::Chart.next(), Layout::Title);
        assert_eq!(Layout::Other("x".into()).next(), Layout::Title);
    }

    #[test]
    fn patch_changes_only_given_fields() {
        let slide = sample_slide();
        let patched = SlidePatch::default().title("X").apply_to(&slide);
        assert_eq!(patched.title, "X");
        assert_eq!(patched.id, slide.id);
        assert_eq!(patched.layout, slide.layout);
        assert_eq!(patched.content, slide.content);
        assert_eq!(patched.notes, slide.notes);
    }

    #[test]
    fn slide_uses_camel_case_and_omits_empty_notes() {
        let mut slide = sample_slide();
        slide.notes = None;
        let value = serde_json::to_value(&slide).unwrap();
        assert_eq!(value["layout"], "bullets");
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn theme_keys_are_camel_case() {
        let theme = Theme {
            id: "t".into(),
            name: "T".into(),
            primary_color: "#000000".into(),
            secondary_color: "#111111".into(),
            background_color: "#ffffff".into(),
            text_color: "#222222".into(),
            font_family: "Arial".into(),
        };
        let value = serde_json::to_value(&theme).unwrap();
        assert_eq!(value["primaryColor"], "#000000");
        assert_eq!(value["fontFamily"], "Arial");
    }

    #[test]
    fn response_result_requires_success_and_both_handles() {
        let ok: GenerateResponse = serde_json::from_str(
            r#"{"success": true, "download_url": "/files/abc.pptx", "file_path": "abc.pptx"}"#,
        )
        .unwrap();
        assert_eq!(
            ok.result(),
            Some(GenerationResult {
                download_url: "/files/abc.pptx".into(),
                file_path: "abc.pptx".into(),
            })
        );

        let failed: GenerateResponse =
            serde_json::from_str(r#"{"success": false, "error": "Topic is required"}"#).unwrap();
        assert_eq!(failed.result(), None);
        assert_eq!(failed.error.as_deref(), Some("Topic is required"));
    }

    #[test]
    fn response_keeps_unknown_fields() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"success": true, "download_url": "/d", "file_path": "f", "slides": 7}"#,
        )
        .unwrap();
        assert_eq!(response.extra["slides"], 7);
    }

    #[test]
    fn default_backend_is_local() {
        assert_eq!(ClientConfig::default().base_url, "http://127.0.0.1:5000");
    }
}
