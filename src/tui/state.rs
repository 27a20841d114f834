//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire TUI state space. The transition function
//! (`update`) and rendering layer (`view`) both program against them.
//!
//! Design principle: Screen variants carry only per-screen transient state
//! (cursors, form fields, text being typed). The presentation itself lives
//! in the [`PresentationStore`] owned by [`App`], and only changes through
//! [`StoreCommand`]s the event loop applies.

use std::path::PathBuf;

use crossterm::event::KeyEvent;

use crate::generation::GenerationFailed;
use crate::store::{PresentationStore, StoreCommand};
use crate::themes::GenerationStyle;
use crate::types::{GenerateRequest, GenerateResponse, Presentation};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two kinds of producer feed a single mpsc channel:
/// - A key reader thread sends `Key` variants
/// - Background tasks (generation, download) send their results
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// A generation round trip finished.
    GenerationComplete(Result<GenerateResponse, GenerationFailed>),
    /// A download finished: the written path, or an error message.
    DownloadComplete(Result<PathBuf, String>),
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Current screen with its per-screen state.
    pub screen: Screen,

    /// Single source of truth for presentation state.
    pub store: PresentationStore,

    /// Deck file the presentation was loaded from; save writes here.
    pub deck_path: Option<PathBuf>,

    /// One-line message for the status bar.
    pub status: Option<String>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    /// Topic/description form that starts a generation.
    Compose(ComposeForm),

    /// Generation in flight. Keeps the form so a failure can return to it.
    Generating(ComposeForm),

    /// Generation finished; shows the download handles.
    Generated,

    /// Slide list, slide editor panel and live preview.
    Editor(EditorState),

    /// Theme catalog.
    ThemePicker { cursor: usize },

    /// Slide-by-slide preview with its own cursor.
    Preview { index: usize },

    /// Nothing loaded.
    #[default]
    Empty,
}

/// Which field of the compose form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    #[default]
    Topic,
    Description,
    Style,
}

impl ComposeField {
    pub fn next(self) -> Self {
        match self {
            ComposeField::Topic => ComposeField::Description,
            ComposeField::Description => ComposeField::Style,
            ComposeField::Style => ComposeField::Topic,
        }
    }
}

/// The generation request being composed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposeForm {
    pub topic: String,
    pub description: String,
    pub style: GenerationStyle,
    pub field: ComposeField,
}

impl ComposeForm {
    /// Both text fields must have non-blank content.
    pub fn is_ready(&self) -> bool {
        !self.topic.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest::new(
            self.topic.trim(),
            self.description.trim(),
            self.style.as_str(),
        )
    }
}

/// Which editor pane arrow keys drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorFocus {
    /// Up/down changes the active slide.
    #[default]
    Slides,
    /// Up/down moves between content items of the active slide.
    Content,
}

/// What a text input will overwrite when committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Title,
    Item(usize),
    Notes,
}

/// In-progress text edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub target: EditTarget,
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    pub focus: EditorFocus,
    /// Focused content item of the active slide.
    pub item_cursor: usize,
    /// Some while the user is typing.
    pub input: Option<TextInput>,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Confirm / drill in / commit text.
    Enter,
    /// Cancel / go back.
    Back,
    /// Cycle focus.
    Tab,
    /// A typed character (text mode only).
    Input(char),
    Backspace,
    AddSlide,
    /// Delete the active slide (capital D — deliberate).
    DeleteSlide,
    CycleLayout,
    EditTitle,
    EditNotes,
    AddItem,
    RemoveItem,
    OpenThemes,
    OpenPreview,
    OpenEditor,
    /// Start a new generation.
    Compose,
    Download,
    Save,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// Follows the Elm/TEA pattern: pure code describes WHAT should happen,
/// the effects layer decides HOW.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Apply these store commands in order, then render `screen`.
    Dispatch {
        screen: Screen,
        commands: Vec<StoreCommand>,
    },
    /// Quit the application.
    Quit,
    /// Execute a side effect.
    Effect(Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Send the form to the generation backend.
    Generate(ComposeForm),
    /// Fetch the file behind the stored generation result.
    Download,
    /// Write the presentation back to its deck file.
    Save,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Start on the compose form with an empty store.
    pub fn compose() -> Self {
        App {
            screen: Screen::Compose(ComposeForm::default()),
            store: PresentationStore::new(),
            deck_path: None,
            status: None,
            should_quit: false,
        }
    }

    /// Start in the editor with a loaded presentation.
    pub fn with_presentation(presentation: Presentation, deck_path: Option<PathBuf>) -> Self {
        App {
            screen: Screen::editor(),
            store: PresentationStore::with_presentation(presentation),
            deck_path,
            status: None,
            should_quit: false,
        }
    }

    /// Whether key presses should be read as typed text.
    pub fn is_typing(&self) -> bool {
        match &self.screen {
            Screen::Compose(form) => form.field != ComposeField::Style,
            Screen::Editor(editor) => editor.input.is_some(),
            _ => false,
        }
    }
}

impl Screen {
    pub fn editor() -> Self {
        Screen::Editor(EditorState::default())
    }

    pub fn compose() -> Self {
        Screen::Compose(ComposeForm::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes;

    #[test]
    fn app_compose_starts_without_presentation() {
        let app = App::compose();
        assert_eq!(app.screen, Screen::compose());
        assert!(app.store.presentation().is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn app_with_presentation_lands_in_editor() {
        let deck = Presentation::new("Deck", vec![], themes::default_theme());
        let app = App::with_presentation(deck, None);
        assert_eq!(app.screen, Screen::editor());
        assert!(app.store.presentation().is_some());
    }

    #[test]
    fn screen_default_is_empty() {
        assert_eq!(Screen::default(), Screen::Empty);
    }

    #[test]
    fn compose_form_needs_topic_and_description() {
        let mut form = ComposeForm::default();
        assert!(!form.is_ready());
        form.topic = "Q1 Review".into();
        form.description = "   ".into();
        assert!(!form.is_ready());
        form.description = "revenue".into();
        assert!(form.is_ready());
    }

    #[test]
    fn compose_form_builds_request_with_style_name() {
        let form = ComposeForm {
            topic: " Q1 Review ".into(),
            description: "three bullet points about revenue".into(),
            style: GenerationStyle::Academic,
            field: ComposeField::Topic,
        };
        let request = form.to_request();
        assert_eq!(request.topic, "Q1 Review");
        assert_eq!(request.theme, "academic");
    }

    #[test]
    fn typing_mode_follows_focus() {
        let mut app = App::compose();
        assert!(app.is_typing());
        app.screen = Screen::Compose(ComposeForm {
            field: ComposeField::Style,
            ..ComposeForm::default()
        });
        assert!(!app.is_typing());
        app.screen = Screen::editor();
        assert!(!app.is_typing());
    }

    #[test]
    fn compose_field_cycles() {
        assert_eq!(ComposeField::Topic.next(), ComposeField::Description);
        assert_eq!(ComposeField::Style.next(), ComposeField::Topic);
    }
}
