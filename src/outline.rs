//! Outline report for a presentation.
//!
//! Pure functions: (Presentation, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::render::{render, text_lines, Composition};
use crate::types::{OutputFormat, Presentation};

/// Format every slide's composition for output.
pub fn format_outline(presentation: &Presentation, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(presentation),
        OutputFormat::Json => format_json(presentation),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(presentation: &Presentation) -> String {
    let mut out = String::new();
    let total = presentation.slides.len();

    out.push_str(&format!("=== {} ===\n", presentation.title));
    out.push_str(&format!(
        "Theme: {} ({})\n",
        presentation.theme.name, presentation.theme.font_family
    ));
    out.push_str(&format!(
        "Last edited: {}\n\n",
        presentation.last_edited.format("%Y-%m-%d %H:%M UTC")
    ));

    for (i, slide) in presentation.slides.iter().enumerate() {
        out.push_str(&format!("--- Slide {} of {} [{}] ---\n", i + 1, total, slide.layout));
        let composition = render(slide, &presentation.theme);
        for line in text_lines(&composition) {
            out.push_str(&line);
            out.push('\n');
        }
        if let Some(notes) = slide.notes.as_deref().filter(|n| !n.is_empty()) {
            out.push_str(&format!("  Notes: {}\n", notes));
        }
        out.push('\n');
    }

    if total == 0 {
        out.push_str("(no slides)\n");
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct OutlineJson<'a> {
    title: &'a str,
    theme: &'a str,
    slides: Vec<SlideJson<'a>>,
}

#[derive(Serialize)]
struct SlideJson<'a> {
    id: &'a str,
    layout: &'a str,
    composition: Composition,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

fn format_json(presentation: &Presentation) -> String {
    let outline = OutlineJson {
        title: &presentation.title,
        theme: &presentation.theme.id,
        slides: presentation
            .slides
            .iter()
            .map(|slide| SlideJson {
                id: &slide.id,
                layout: slide.layout.as_str(),
                composition: render(slide, &presentation.theme),
                notes: slide.notes.as_deref(),
            })
            .collect(),
    };
    // Only strings, vectors and derived structs: serialization can't fail.
    serde_json::to_string_pretty(&outline).unwrap_or_else(|e| {
        panic!("Failed to serialize outline to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes;
    use crate::types::{Layout, Slide};

    fn slide(id: &str, title: &str, layout: Layout, content: &[&str]) -> Slide {
        Slide {
            id: id.into(),
            title: title.into(),
            layout,
            content: content.iter().map(|s| s.to_string()).collect(),
            notes: None,
        }
    }

    fn sample() -> Presentation {
        let mut quote = slide("3", "", Layout::Quote, &["Stay hungry", "Jobs"]);
        quote.notes = Some("pause here".into());
        Presentation::new(
            "Q1 Review",
            vec![
                slide("1", "Q1 Review", Layout::Title, &["Numbers and next steps"]),
                slide("2", "Revenue", Layout::Bullets, &["Up 12%", "New region"]),
                quote,
                slide("4", "Pipeline", Layout::Chart, &["See appendix"]),
            ],
            themes::default_theme(),
        )
    }

    #[test]
    fn human_format_lists_every_slide() {
        let output = format_outline(&sample(), OutputFormat::Human);

        assert!(output.contains("=== Q1 Review ==="));
        assert!(output.contains("Theme: Default Theme"));
        assert!(output.contains("--- Slide 1 of 4 [title] ---"));
        assert!(output.contains("--- Slide 4 of 4 [chart] ---"));
        assert!(output.contains("• Up 12%"));
        assert!(output.contains("— Jobs"));
        assert!(output.contains("Notes: pause here"));
    }

    #[test]
    fn human_format_empty_presentation() {
        let deck = Presentation::new("Empty", vec![], themes::default_theme());
        let output = format_outline(&deck, OutputFormat::Human);
        assert!(output.contains("(no slides)"));
    }

    #[test]
    fn json_format_is_valid_json() {
        let output = format_outline(&sample(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");

        assert_eq!(parsed["title"], "Q1 Review");
        assert_eq!(parsed["theme"], "default");
        assert_eq!(parsed["slides"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn json_format_tags_composition_kind() {
        let output = format_outline(&sample(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        let slides = &parsed["slides"];
        assert_eq!(slides[0]["composition"]["body"]["kind"], "title-card");
        assert_eq!(slides[1]["composition"]["body"]["kind"], "bullet-list");
        assert_eq!(slides[2]["composition"]["body"]["kind"], "quote-card");
        assert_eq!(slides[3]["composition"]["body"]["kind"], "paragraphs");
        assert_eq!(slides[2]["notes"], "pause here");
        assert!(slides[0].get("notes").is_none());
    }
}
