//! Pure state transitions: (Screen, Action, &Store) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each screen defines which actions it accepts. Unhandled actions
//! return the current screen unchanged (no-op). Presentation changes are
//! described as [`StoreCommand`]s, never performed here.

use crate::store::{PresentationStore, StoreCommand};
use crate::themes;
use crate::types::{Presentation, Slide, SlideDraft, SlidePatch};

use super::state::{
    Action, App, AppEvent, ComposeField, ComposeForm, EditTarget, EditorFocus, EditorState,
    Effect, Screen, TextInput, Transition,
};

/// Text of a content item added from the editor.
const NEW_ITEM_TEXT: &str = "New point";

/// Pure state transition function.
///
/// Given the current screen, an action, and a read-only view of the
/// store, produces the next transition.
pub fn update(screen: Screen, action: &Action, store: &PresentationStore) -> Transition {
    match screen {
        Screen::Compose(form) => update_compose(form, action, store),
        Screen::Generating(form) => noop(Screen::Generating(form), action),
        Screen::Generated => update_generated(action, store),
        Screen::Editor(editor) => match store.presentation() {
            Some(presentation) => update_editor(editor, action, store, presentation),
            None => update_empty(action),
        },
        Screen::ThemePicker { cursor } => update_theme_picker(cursor, action),
        Screen::Preview { index } => update_preview(index, action, store),
        Screen::Empty => update_empty(action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Compose: type into topic/description, pick a style, submit.
fn update_compose(mut form: ComposeForm, action: &Action, store: &PresentationStore) -> Transition {
    match action {
        Action::Input(c) => {
            match form.field {
                ComposeField::Topic => form.topic.push(*c),
                ComposeField::Description => form.description.push(*c),
                ComposeField::Style => {}
            }
            Transition::Screen(Screen::Compose(form))
        }
        Action::Backspace => {
            match form.field {
                ComposeField::Topic => {
                    form.topic.pop();
                }
                ComposeField::Description => {
                    form.description.pop();
                }
                ComposeField::Style => {}
            }
            Transition::Screen(Screen::Compose(form))
        }
        Action::Tab => {
            form.field = form.field.next();
            Transition::Screen(Screen::Compose(form))
        }
        Action::MoveLeft if form.field == ComposeField::Style => {
            form.style = form.style.prev();
            Transition::Screen(Screen::Compose(form))
        }
        Action::MoveRight if form.field == ComposeField::Style => {
            form.style = form.style.next();
            Transition::Screen(Screen::Compose(form))
        }
        Action::Enter => {
            if form.is_ready() {
                Transition::Effect(Effect::Generate(form))
            } else {
                Transition::Screen(Screen::Compose(form))
            }
        }
        Action::Back => {
            if store.presentation().is_some() {
                Transition::Screen(Screen::editor())
            } else {
                Transition::Screen(Screen::Compose(form))
            }
        }
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Compose(form)),
    }
}

/// Generated: download the file, open the editor, or start over.
fn update_generated(action: &Action, store: &PresentationStore) -> Transition {
    match action {
        Action::Download if store.generation().is_some() => Transition::Effect(Effect::Download),
        Action::Enter | Action::OpenEditor if store.presentation().is_some() => {
            Transition::Screen(Screen::editor())
        }
        Action::Compose | Action::Back => Transition::Screen(Screen::compose()),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Generated),
    }
}

/// Editor: slide list navigation, slide edits, and the way out to
/// themes, preview, save and compose.
fn update_editor(
    editor: EditorState,
    action: &Action,
    store: &PresentationStore,
    presentation: &Presentation,
) -> Transition {
    let index = store.current_slide_index();
    let slide = presentation.slides.get(index);

    if let Some(input) = editor.input.clone() {
        return update_text_input(editor, input, action, slide);
    }

    let len = presentation.slides.len();
    let last = len.saturating_sub(1);

    match action {
        Action::MoveUp => match editor.focus {
            EditorFocus::Slides => select_slide(editor, index.saturating_sub(1).min(last)),
            EditorFocus::Content => Transition::Screen(Screen::Editor(EditorState {
                item_cursor: editor.item_cursor.saturating_sub(1),
                ..editor
            })),
        },
        Action::MoveDown => match editor.focus {
            EditorFocus::Slides => {
                if len == 0 {
                    Transition::Screen(Screen::Editor(editor))
                } else {
                    select_slide(editor, (index + 1).min(last))
                }
            }
            EditorFocus::Content => {
                let items = slide.map(|s| s.content.len()).unwrap_or(0);
                let cursor = if items == 0 {
                    0
                } else {
                    (editor.item_cursor + 1).min(items - 1)
                };
                Transition::Screen(Screen::Editor(EditorState {
                    item_cursor: cursor,
                    ..editor
                }))
            }
        },
        Action::Tab => {
            let focus = match editor.focus {
                EditorFocus::Slides => EditorFocus::Content,
                EditorFocus::Content => EditorFocus::Slides,
            };
            Transition::Screen(Screen::Editor(EditorState { focus, ..editor }))
        }
        Action::AddSlide => Transition::Dispatch {
            screen: Screen::editor(),
            commands: vec![
                StoreCommand::AddSlide(SlideDraft::placeholder()),
                StoreCommand::SetCurrentSlide(len),
            ],
        },
        Action::DeleteSlide => match slide {
            // The editor never deletes the last remaining slide.
            Some(slide) if len > 1 => Transition::Dispatch {
                screen: Screen::editor(),
                commands: vec![
                    StoreCommand::DeleteSlide {
                        id: slide.id.clone(),
                    },
                    StoreCommand::SetCurrentSlide(index.saturating_sub(1)),
                ],
            },
            _ => Transition::Screen(Screen::Editor(editor)),
        },
        Action::CycleLayout => match slide {
            Some(slide) => Transition::Dispatch {
                screen: Screen::Editor(editor),
                commands: vec![patch_slide(slide, SlidePatch::default().layout(slide.layout.next()))],
            },
            None => Transition::Screen(Screen::Editor(editor)),
        },
        Action::EditTitle => match slide {
            Some(slide) => start_input(editor, EditTarget::Title, slide.title.clone()),
            None => Transition::Screen(Screen::Editor(editor)),
        },
        Action::EditNotes => match slide {
            Some(slide) => start_input(
                editor,
                EditTarget::Notes,
                slide.notes.clone().unwrap_or_default(),
            ),
            None => Transition::Screen(Screen::Editor(editor)),
        },
        Action::Enter => match (editor.focus, slide) {
            (EditorFocus::Slides, Some(_)) => Transition::Screen(Screen::Editor(EditorState {
                focus: EditorFocus::Content,
                item_cursor: 0,
                ..editor
            })),
            (EditorFocus::Content, Some(slide)) => match slide.content.get(editor.item_cursor) {
                Some(item) => {
                    let cursor = editor.item_cursor;
                    start_input(editor, EditTarget::Item(cursor), item.clone())
                }
                None => Transition::Screen(Screen::Editor(editor)),
            },
            _ => Transition::Screen(Screen::Editor(editor)),
        },
        Action::AddItem => match slide {
            Some(slide) => {
                let mut content = slide.content.clone();
                content.push(NEW_ITEM_TEXT.to_string());
                let cursor = content.len() - 1;
                Transition::Dispatch {
                    screen: Screen::Editor(EditorState {
                        focus: EditorFocus::Content,
                        item_cursor: cursor,
                        input: None,
                    }),
                    commands: vec![patch_slide(slide, SlidePatch::default().content(content))],
                }
            }
            None => Transition::Screen(Screen::Editor(editor)),
        },
        Action::RemoveItem => match slide {
            // At least one content item always remains.
            Some(slide) if slide.content.len() > 1 => {
                let target = editor.item_cursor.min(slide.content.len() - 1);
                let mut content = slide.content.clone();
                content.remove(target);
                let cursor = target.min(content.len() - 1);
                Transition::Dispatch {
                    screen: Screen::Editor(EditorState {
                        item_cursor: cursor,
                        ..editor
                    }),
                    commands: vec![patch_slide(slide, SlidePatch::default().content(content))],
                }
            }
            _ => Transition::Screen(Screen::Editor(editor)),
        },
        Action::OpenThemes => Transition::Screen(Screen::ThemePicker {
            cursor: themes::position(&presentation.theme.id).unwrap_or(0),
        }),
        Action::OpenPreview => Transition::Screen(Screen::Preview {
            index: index.min(last),
        }),
        Action::Compose => Transition::Screen(Screen::compose()),
        Action::Save => Transition::Effect(Effect::Save),
        Action::Download if store.generation().is_some() => Transition::Effect(Effect::Download),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Editor(editor)),
    }
}

/// Typing into a title, content item, or notes field.
fn update_text_input(
    editor: EditorState,
    mut input: TextInput,
    action: &Action,
    slide: Option<&Slide>,
) -> Transition {
    match action {
        Action::Input(c) => {
            input.buffer.push(*c);
            Transition::Screen(Screen::Editor(EditorState {
                input: Some(input),
                ..editor
            }))
        }
        Action::Backspace => {
            input.buffer.pop();
            Transition::Screen(Screen::Editor(EditorState {
                input: Some(input),
                ..editor
            }))
        }
        Action::Enter => {
            let closed = EditorState {
                input: None,
                ..editor
            };
            match slide.and_then(|s| commit_input(s, input)) {
                Some(command) => Transition::Dispatch {
                    screen: Screen::Editor(closed),
                    commands: vec![command],
                },
                None => Transition::Screen(Screen::Editor(closed)),
            }
        }
        Action::Back => Transition::Screen(Screen::Editor(EditorState {
            input: None,
            ..editor
        })),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Editor(EditorState {
            input: Some(input),
            ..editor
        })),
    }
}

/// ThemePicker: move through the catalog, Enter applies.
fn update_theme_picker(cursor: usize, action: &Action) -> Transition {
    let catalog = themes::catalog();
    let last = catalog.len().saturating_sub(1);

    match action {
        Action::MoveUp => Transition::Screen(Screen::ThemePicker {
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveDown => Transition::Screen(Screen::ThemePicker {
            cursor: (cursor + 1).min(last),
        }),
        Action::Enter => match catalog.into_iter().nth(cursor) {
            Some(theme) => Transition::Dispatch {
                screen: Screen::editor(),
                commands: vec![StoreCommand::ChangeTheme(theme)],
            },
            None => Transition::Screen(Screen::ThemePicker { cursor }),
        },
        Action::Back | Action::OpenEditor => Transition::Screen(Screen::editor()),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::ThemePicker { cursor }),
    }
}

/// Preview: step through slides, clamped to the deck.
fn update_preview(index: usize, action: &Action, store: &PresentationStore) -> Transition {
    let Some(presentation) = store.presentation() else {
        return update_empty(action);
    };
    let last = presentation.slides.len().saturating_sub(1);

    match action {
        Action::MoveLeft | Action::MoveUp => Transition::Screen(Screen::Preview {
            index: index.saturating_sub(1).min(last),
        }),
        Action::MoveRight | Action::MoveDown | Action::Enter => {
            Transition::Screen(Screen::Preview {
                index: (index + 1).min(last),
            })
        }
        Action::Back | Action::OpenEditor => Transition::Screen(Screen::editor()),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Preview { index }),
    }
}

/// Empty: the only way forward is a new generation.
fn update_empty(action: &Action) -> Transition {
    match action {
        Action::Compose | Action::Enter => Transition::Screen(Screen::compose()),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Empty),
    }
}

/// No-op handler: only Quit is accepted.
fn noop(screen: Screen, action: &Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(screen),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn select_slide(editor: EditorState, index: usize) -> Transition {
    Transition::Dispatch {
        screen: Screen::Editor(EditorState {
            item_cursor: 0,
            ..editor
        }),
        commands: vec![StoreCommand::SetCurrentSlide(index)],
    }
}

fn start_input(editor: EditorState, target: EditTarget, buffer: String) -> Transition {
    Transition::Screen(Screen::Editor(EditorState {
        input: Some(TextInput { target, buffer }),
        ..editor
    }))
}

fn patch_slide(slide: &Slide, patch: SlidePatch) -> StoreCommand {
    StoreCommand::UpdateSlide {
        id: slide.id.clone(),
        patch,
    }
}

/// Turn a finished text input into an update for `slide`.
fn commit_input(slide: &Slide, input: TextInput) -> Option<StoreCommand> {
    let patch = match input.target {
        EditTarget::Title => SlidePatch::default().title(input.buffer),
        EditTarget::Notes => SlidePatch::default().notes(input.buffer),
        EditTarget::Item(i) => {
            if i >= slide.content.len() {
                return None;
            }
            let mut content = slide.content.clone();
            content[i] = input.buffer;
            SlidePatch::default().content(content)
        }
    };
    Some(patch_slide(slide, patch))
}

// ============================================================================
// APPLYING TRANSITIONS
// ============================================================================

/// Apply a transition to the app. Returns the effect, if any, for the
/// effects layer to execute.
pub fn apply_transition(app: &mut App, transition: Transition) -> Option<Effect> {
    match transition {
        Transition::Screen(screen) => {
            app.screen = screen;
            None
        }
        Transition::Dispatch { screen, commands } => {
            for command in commands {
                app.store.apply(command);
            }
            app.screen = screen;
            None
        }
        Transition::Quit => {
            app.should_quit = true;
            None
        }
        Transition::Effect(effect) => Some(effect),
    }
}

/// Fold a background result into the app.
pub fn handle_background_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(_) => {}
        AppEvent::GenerationComplete(outcome) => {
            let form = match std::mem::take(&mut app.screen) {
                Screen::Generating(form) => Some(form),
                other => {
                    app.screen = other;
                    None
                }
            };
            match app.store.accept_generation(outcome) {
                Ok(_) => {
                    // The store dropped the old presentation; its file goes too.
                    app.deck_path = None;
                    app.status = Some("Presentation generated".to_string());
                    if form.is_some() {
                        app.screen = Screen::Generated;
                    }
                }
                Err(err) => {
                    app.status = Some(err.to_string());
                    if let Some(form) = form {
                        app.screen = Screen::Compose(form);
                    }
                }
            }
        }
        AppEvent::DownloadComplete(Ok(path)) => {
            app.status = Some(format!("Saved {}", path.display()));
        }
        AppEvent::DownloadComplete(Err(message)) => {
            app.status = Some(format!("Download failed: {}", message));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
