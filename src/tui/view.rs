//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.
//!
//! Slides themselves are drawn from a [`Composition`], never from the
//! raw slide, so the preview shows exactly what the renderer produced.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::render::{render as compose_slide, Body, Composition, Region};
use crate::store::PresentationStore;
use crate::themes;
use crate::types::Presentation;

use super::state::{
    App, ComposeField, ComposeForm, EditTarget, EditorFocus, EditorState, Screen, TextInput,
};
use super::theme;

/// Shown after the focused text field.
const CARET: &str = "▏";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar, content, status line, help
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // status
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(app), chunks[0]);
    frame.render_widget(render_status(app.status.as_deref()), chunks[2]);
    frame.render_widget(render_help(&app.screen), chunks[3]);

    let content_area = chunks[1];

    match &app.screen {
        Screen::Compose(form) => render_compose(form, frame, content_area),
        Screen::Generating(form) => render_generating(form, frame, content_area),
        Screen::Generated => render_generated(&app.store, frame, content_area),
        Screen::Editor(editor) => match app.store.presentation() {
            Some(presentation) => render_editor(
                presentation,
                app.store.current_slide_index(),
                editor,
                frame,
                content_area,
            ),
            None => render_empty(frame, content_area),
        },
        Screen::ThemePicker { cursor } => {
            let current = app.store.presentation().map(|p| p.theme.id.as_str());
            render_theme_picker(*cursor, current, frame, content_area);
        }
        Screen::Preview { index } => match app.store.presentation() {
            Some(presentation) => render_preview(presentation, *index, frame, content_area),
            None => render_empty(frame, content_area),
        },
        Screen::Empty => render_empty(frame, content_area),
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar showing the app name and screen-specific context.
fn render_title(app: &App) -> Paragraph<'static> {
    let title_text = match &app.screen {
        Screen::Compose(_) => "New Presentation".to_string(),
        Screen::Generating(_) => "Generating...".to_string(),
        Screen::Generated => "Generated".to_string(),
        Screen::Editor(_) => app
            .store
            .presentation()
            .map(|p| p.title.clone())
            .unwrap_or_else(|| "slidedeck".to_string()),
        Screen::ThemePicker { .. } => "Themes".to_string(),
        Screen::Preview { .. } => "Preview".to_string(),
        Screen::Empty => "slidedeck".to_string(),
    };

    Paragraph::new(Line::from(vec![Span::styled(title_text, theme::STYLE_TITLE)]))
}

/// One-line status message, blank when there is none.
fn render_status(status: Option<&str>) -> Paragraph<'static> {
    let text = status.map(|s| format!("  {}", s)).unwrap_or_default();
    Paragraph::new(Span::styled(text, theme::STYLE_IMPORTANT))
}

/// Help line showing available keybindings for the current screen.
fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Compose(_) => "[Tab] next field  [←/→] style  [Enter] generate  [Esc] back  ^C quit",
        Screen::Generating(_) => "^C quit",
        Screen::Generated => "[d] download  [Enter] editor  [g] new  [q] quit",
        Screen::Editor(EditorState { input: Some(_), .. }) => "[Enter] save  [Esc] cancel",
        Screen::Editor(_) => {
            "[j/k] move  [Tab] pane  [Enter] edit  [t] title  [n] notes  [+/-] item  [a] add  [D] delete  [c] layout  [T] themes  [p] preview  [s] save  [q] quit"
        }
        Screen::ThemePicker { .. } => "[j/k] move  [Enter] apply  [Esc] back",
        Screen::Preview { .. } => "[←/→] slide  [Esc] back",
        Screen::Empty => "[g] generate  [q] quit",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Text of a field, with the input caret when it has focus.
fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let value_span = if focused {
        Span::styled(format!("{}{}", value, CARET), theme::STYLE_INPUT)
    } else {
        Span::raw(value.to_string())
    };
    Line::from(vec![
        Span::styled(format!("  {:<13}", label), theme::STYLE_DIM),
        value_span,
    ])
}

// ============================================================================
// SCREEN: COMPOSE
// ============================================================================

fn render_compose(form: &ComposeForm, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Create a presentation", theme::STYLE_TITLE)),
        Line::from(""),
        field_line("Topic:", &form.topic, form.field == ComposeField::Topic),
        field_line(
            "Description:",
            &form.description,
            form.field == ComposeField::Description,
        ),
    ];

    let style_focused = form.field == ComposeField::Style;
    let style_span = if style_focused {
        Span::styled(format!("◂ {} ▸", form.style.label()), theme::STYLE_INTERACTIVE)
    } else {
        Span::raw(form.style.label())
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<13}", "Style:"), theme::STYLE_DIM),
        style_span,
    ]));
    lines.push(Line::from(Span::styled(
        format!("  {:<13}{}", "", form.style.description()),
        theme::STYLE_DIM,
    )));

    lines.push(Line::from(""));
    if !form.is_ready() {
        lines.push(Line::from(Span::styled(
            "  Topic and description are required",
            theme::STYLE_DIM,
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: GENERATING
// ============================================================================

fn render_generating(form: &ComposeForm, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Generating presentation...",
            theme::STYLE_PROGRESS,
        )),
        Line::from(""),
        Line::from(format!("    Topic: {}", form.topic.trim())),
        Line::from(format!("    Style: {}", form.style.label())),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: GENERATED
// ============================================================================

fn render_generated(store: &PresentationStore, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];

    match store.generation() {
        Some(result) => {
            lines.push(Line::from(Span::styled(
                "  ✓ Presentation generated",
                theme::STYLE_SAFE,
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("    File:     ", theme::STYLE_DIM),
                Span::styled(result.file_path.clone(), theme::STYLE_IMPORTANT),
            ]));
            lines.push(Line::from(vec![
                Span::styled("    Download: ", theme::STYLE_DIM),
                Span::raw(result.download_url.clone()),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  [d] ", theme::STYLE_INTERACTIVE),
                Span::raw("Download the file"),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "  No generation result",
            theme::STYLE_WARNING,
        ))),
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: EDITOR
// ============================================================================

fn render_editor(
    presentation: &Presentation,
    index: usize,
    editor: &EditorState,
    frame: &mut Frame,
    area: Rect,
) {
    let chunks = Layout::horizontal([
        Constraint::Length(24),     // slide list
        Constraint::Percentage(40), // slide fields
        Constraint::Min(0),         // live preview
    ])
    .split(area);

    render_slide_list(presentation, index, editor.focus, frame, chunks[0]);
    render_slide_fields(presentation, index, editor, frame, chunks[1]);

    let preview_block = Block::bordered().title(" Preview ");
    let preview_area = preview_block.inner(chunks[2]);
    frame.render_widget(preview_block, chunks[2]);
    if let Some(slide) = presentation.slides.get(index) {
        render_composition(&compose_slide(slide, &presentation.theme), frame, preview_area);
    }
}

fn render_slide_list(
    presentation: &Presentation,
    index: usize,
    focus: EditorFocus,
    frame: &mut Frame,
    area: Rect,
) {
    let title_style = if focus == EditorFocus::Slides {
        theme::STYLE_INTERACTIVE
    } else {
        Style::new()
    };
    let block = Block::bordered().title(Span::styled(
        format!(" Slides ({}) ", presentation.slides.len()),
        title_style,
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, slide) in presentation.slides.iter().enumerate() {
        let title = if slide.title.is_empty() {
            format!("Slide {}", i + 1)
        } else {
            slide.title.clone()
        };
        let line = Line::from(vec![
            Span::raw(format!("{:>2} ", i + 1)),
            Span::raw(title),
            Span::styled(format!("  {}", slide.layout), theme::STYLE_DIM),
        ]);
        lines.push(if i == index {
            line.style(theme::STYLE_SELECTED)
        } else {
            line
        });
    }

    if presentation.slides.is_empty() {
        lines.push(Line::from(Span::styled("(no slides)", theme::STYLE_DIM)));
    }

    let visible_height = inner.height as usize;
    let scroll_offset = if index >= visible_height {
        index - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, inner);
}

fn render_slide_fields(
    presentation: &Presentation,
    index: usize,
    editor: &EditorState,
    frame: &mut Frame,
    area: Rect,
) {
    let title_style = if editor.focus == EditorFocus::Content {
        theme::STYLE_INTERACTIVE
    } else {
        Style::new()
    };
    let block = Block::bordered().title(Span::styled(" Slide ", title_style));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(slide) = presentation.slides.get(index) else {
        let empty = Paragraph::new(Span::styled("No slide selected", theme::STYLE_DIM));
        frame.render_widget(empty, inner);
        return;
    };

    let input = editor.input.as_ref();
    let editing = |target: EditTarget| input.filter(|i| i.target == target);

    let mut lines = vec![
        match editing(EditTarget::Title) {
            Some(input) => input_line("Title: ", input),
            None => Line::from(vec![
                Span::styled("Title: ", theme::STYLE_DIM),
                Span::styled(slide.title.clone(), theme::STYLE_IMPORTANT),
            ]),
        },
        Line::from(vec![
            Span::styled("Layout: ", theme::STYLE_DIM),
            Span::raw(slide.layout.label().to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Content:", theme::STYLE_DIM)),
    ];

    for (i, item) in slide.content.iter().enumerate() {
        let line = match editing(EditTarget::Item(i)) {
            Some(input) => input_line("• ", input),
            None => Line::from(format!("• {}", item)),
        };
        let focused = editor.focus == EditorFocus::Content && i == editor.item_cursor;
        lines.push(if focused && input.is_none() {
            line.style(theme::STYLE_CURSOR)
        } else {
            line
        });
    }

    lines.push(Line::from(""));
    lines.push(match editing(EditTarget::Notes) {
        Some(input) => input_line("Notes: ", input),
        None => Line::from(vec![
            Span::styled("Notes: ", theme::STYLE_DIM),
            match slide.notes.as_deref().filter(|n| !n.is_empty()) {
                Some(notes) => Span::raw(notes.to_string()),
                None => Span::styled("(none)", theme::STYLE_DIM),
            },
        ]),
    });

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn input_line(label: &'static str, input: &TextInput) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, theme::STYLE_DIM),
        Span::styled(format!("{}{}", input.buffer, CARET), theme::STYLE_INPUT),
    ])
}

// ============================================================================
// SCREEN: THEME PICKER
// ============================================================================

fn render_theme_picker(cursor: usize, current: Option<&str>, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];

    for (i, t) in themes::catalog().iter().enumerate() {
        let marker = if current == Some(t.id.as_str()) {
            Span::styled("✓ ", theme::STYLE_SAFE)
        } else {
            Span::raw("  ")
        };
        let mut spans = vec![
            Span::raw("  "),
            marker,
            Span::styled(format!("{:<18}", t.name), theme::STYLE_IMPORTANT),
        ];
        for color in [
            &t.primary_color,
            &t.secondary_color,
            &t.background_color,
            &t.text_color,
        ] {
            spans.push(Span::styled("  ", theme::swatch(color)));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {}", t.font_family), theme::STYLE_DIM));

        let line = Line::from(spans);
        lines.push(if i == cursor {
            line.style(theme::STYLE_CURSOR)
        } else {
            line
        });
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: PREVIEW
// ============================================================================

fn render_preview(presentation: &Presentation, index: usize, frame: &mut Frame, area: Rect) {
    let total = presentation.slides.len();
    let Some(slide) = presentation.slides.get(index.min(total.saturating_sub(1))) else {
        let empty = Paragraph::new(Span::styled("  (no slides)", theme::STYLE_DIM));
        frame.render_widget(empty, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // position
        Constraint::Min(0),    // slide
    ])
    .split(area);

    let position = Paragraph::new(Span::styled(
        format!("  Slide {} of {}", index.min(total - 1) + 1, total),
        theme::STYLE_DIM,
    ));
    frame.render_widget(position, chunks[0]);

    render_composition(&compose_slide(slide, &presentation.theme), frame, chunks[1]);
}

// ============================================================================
// SCREEN: EMPTY
// ============================================================================

fn render_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  No presentation loaded", theme::STYLE_WARNING)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [g] ", theme::STYLE_INTERACTIVE),
            Span::raw("Generate a new presentation"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// COMPOSITIONS
// ============================================================================

/// Draw a rendered slide with its theme's colors.
pub fn render_composition(composition: &Composition, frame: &mut Frame, area: Rect) {
    let palette = &composition.palette;
    let base = theme::slide_base(palette);
    let heading = theme::slide_heading(palette);
    let accent = theme::slide_accent(palette);

    frame.render_widget(Block::new().style(base), area);

    match &composition.body {
        Body::TitleCard { title, subtitle } => {
            let top = area.height.saturating_sub(3) / 2;
            let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
            lines.push(Line::from(Span::styled(title.clone(), heading)).centered());
            if let Some(subtitle) = subtitle {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(subtitle.clone(), accent)).centered());
            }
            frame.render_widget(paragraph(lines, base), area);
        }
        Body::BulletList { heading: title, items } => {
            let mut lines = vec![Line::from(Span::styled(title.clone(), heading)), Line::from("")];
            for item in items {
                lines.push(Line::from(vec![
                    Span::styled(" • ", accent),
                    Span::raw(item.clone()),
                ]));
            }
            frame.render_widget(paragraph(lines, base), area);
        }
        Body::Split {
            heading: title,
            left,
            right,
        } => {
            let rows = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(area);
            let title_line = Line::from(Span::styled(title.clone(), heading));
            frame.render_widget(paragraph(vec![title_line], base), rows[0]);

            let columns =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[1]);
            frame.render_widget(paragraph(region_lines(left, accent), base), columns[0]);
            frame.render_widget(paragraph(region_lines(right, accent), base), columns[1]);
        }
        Body::QuoteCard { quote, attribution } => {
            let top = area.height.saturating_sub(3) / 2;
            let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
            if let Some(quote) = quote {
                let style = heading.add_modifier(Modifier::ITALIC);
                lines.push(Line::from(Span::styled(format!("“{}”", quote), style)).centered());
            }
            if let Some(attribution) = attribution {
                lines.push(Line::from(""));
                lines.push(
                    Line::from(Span::styled(format!("— {}", attribution), accent)).centered(),
                );
            }
            frame.render_widget(paragraph(lines, base), area);
        }
        Body::Paragraphs {
            heading: title,
            paragraphs,
        } => {
            let mut lines = vec![Line::from(Span::styled(title.clone(), heading))];
            for text in paragraphs {
                lines.push(Line::from(""));
                lines.push(Line::from(text.clone()));
            }
            frame.render_widget(paragraph(lines, base), area);
        }
    }
}

fn paragraph(lines: Vec<Line<'static>>, style: Style) -> Paragraph<'static> {
    Paragraph::new(lines).style(style).wrap(Wrap { trim: false })
}

fn region_lines(region: &Region, accent: Style) -> Vec<Line<'static>> {
    match region {
        Region::ImagePlaceholder => vec![
            Line::from(""),
            Line::from(Span::styled("[ image ]", accent)).centered(),
        ],
        Region::Paragraphs(paragraphs) => paragraphs
            .iter()
            .flat_map(|p| [Line::from(p.clone()), Line::from("")])
            .collect(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
