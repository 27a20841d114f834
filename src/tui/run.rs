//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and to the generation backend via a tokio runtime.
//! Kept minimal — all intelligence lives in the pure layers.
//!
//! Architecture: several producers feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Generation and download tasks on the runtime: send their results
//! The event loop consumes from the channel, dispatching to pure handlers.
//! The store is only ever touched from the event loop.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;

use crate::deck::save_deck;
use crate::generation::{GenerationBackend, HttpBackend};
use crate::types::{ClientConfig, GenerationResult};

use super::state::{Action, App, AppEvent, ComposeForm, Effect, Screen};
use super::update::{apply_transition, handle_background_event, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// While `typing`, printable keys become text input and only the editing
/// keys keep their meaning. Returns None for keys that don't map to any
/// action.
pub fn map_key(key: KeyEvent, typing: bool) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if typing {
        return match key.code {
            KeyCode::Char(c) => Some(Action::Input(c)),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Enter => Some(Action::Enter),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Tab => Some(Action::Tab),
            _ => None,
        };
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab => Some(Action::Tab),

        // Slide editing
        KeyCode::Char('a') => Some(Action::AddSlide),
        KeyCode::Char('D') => Some(Action::DeleteSlide),
        KeyCode::Char('c') => Some(Action::CycleLayout),
        KeyCode::Char('t') => Some(Action::EditTitle),
        KeyCode::Char('n') => Some(Action::EditNotes),
        KeyCode::Char('+') => Some(Action::AddItem),
        KeyCode::Char('-') => Some(Action::RemoveItem),

        // Screens
        KeyCode::Char('T') => Some(Action::OpenThemes),
        KeyCode::Char('p') => Some(Action::OpenPreview),
        KeyCode::Char('e') => Some(Action::OpenEditor),
        KeyCode::Char('g') => Some(Action::Compose),

        // Effects
        KeyCode::Char('d') => Some(Action::Download),
        KeyCode::Char('s') => Some(Action::Save),
        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND PRODUCERS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore releases, mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

/// Everything the effect handlers need to reach the outside world.
struct Effects {
    runtime: Runtime,
    backend: HttpBackend,
    download_dir: PathBuf,
    tx: mpsc::Sender<AppEvent>,
}

impl Effects {
    /// Run one generation round trip on the runtime.
    fn spawn_generation(&self, form: &ComposeForm) {
        let backend = self.backend.clone();
        let request = form.to_request();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = backend.generate(&request).await;
            // Best-effort: the loop may already be gone
            let _ = tx.send(AppEvent::GenerationComplete(outcome));
        });
    }

    /// Fetch the generated file into the download directory.
    fn spawn_download(&self, result: GenerationResult) {
        let backend = self.backend.clone();
        let dir = self.download_dir.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = backend
                .download(&result, &dir)
                .await
                .map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::DownloadComplete(outcome));
        });
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI event loop until the user quits.
///
/// Generation requests go to the backend described by `config`;
/// downloads land in `download_dir`.
pub fn run(mut app: App, config: &ClientConfig, download_dir: PathBuf) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let effects = Effects {
        runtime: Runtime::new()?,
        backend: HttpBackend::new(config),
        download_dir,
        tx: tx.clone(),
    };

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    spawn_key_reader(tx);

    loop {
        // Render
        terminal.draw(|frame| render(&app, frame))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key, app.is_typing()) {
                    let transition = update(app.screen.clone(), &action, &app.store);
                    if let Some(effect) = apply_transition(&mut app, transition) {
                        handle_effect(effect, &mut app, &effects);
                    }
                }
            }
            background_event => {
                handle_background_event(&mut app, background_event);
            }
        }
    }

    restore_terminal()?;
    // Don't wait on in-flight requests
    effects.runtime.shutdown_background();
    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a pure transition.
fn handle_effect(effect: Effect, app: &mut App, effects: &Effects) {
    match effect {
        Effect::Generate(form) => {
            effects.spawn_generation(&form);
            app.status = None;
            app.screen = Screen::Generating(form);
        }
        Effect::Download => match app.store.generation().cloned() {
            Some(result) => {
                app.status = Some(format!("Downloading {}...", result.file_path));
                effects.spawn_download(result);
            }
            None => app.status = Some("Nothing to download yet".to_string()),
        },
        Effect::Save => {
            app.status = Some(save_message(app));
        }
    }
}

/// Write the presentation to its deck file and describe what happened.
fn save_message(app: &App) -> String {
    let Some(presentation) = app.store.presentation() else {
        return "Nothing to save".to_string();
    };
    let Some(path) = &app.deck_path else {
        return "No deck file: open one with `slidedeck edit <deck.json>`".to_string();
    };
    match save_deck(presentation, path) {
        Ok(()) => format!("Saved {}", path.display()),
        Err(err) => err.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes;
    use crate::types::Presentation;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key, false), Some(Action::Quit));
        assert_eq!(map_key(key, true), Some(Action::Quit));
    }

    #[test]
    fn vim_keys_map_to_movement() {
        assert_eq!(map_key(press(KeyCode::Char('j')), false), Some(Action::MoveDown));
        assert_eq!(map_key(press(KeyCode::Char('k')), false), Some(Action::MoveUp));
        assert_eq!(map_key(press(KeyCode::Char('h')), false), Some(Action::MoveLeft));
        assert_eq!(map_key(press(KeyCode::Char('l')), false), Some(Action::MoveRight));
    }

    #[test]
    fn arrow_keys_map_to_movement() {
        assert_eq!(map_key(press(KeyCode::Up), false), Some(Action::MoveUp));
        assert_eq!(map_key(press(KeyCode::Down), false), Some(Action::MoveDown));
    }

    #[test]
    fn capital_d_deletes_slide() {
        let key = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(map_key(key, false), Some(Action::DeleteSlide));
        assert_eq!(map_key(press(KeyCode::Char('d')), false), Some(Action::Download));
    }

    #[test]
    fn typing_turns_letters_into_input() {
        assert_eq!(map_key(press(KeyCode::Char('q')), true), Some(Action::Input('q')));
        assert_eq!(map_key(press(KeyCode::Char('j')), true), Some(Action::Input('j')));
        assert_eq!(map_key(press(KeyCode::Backspace), true), Some(Action::Backspace));
    }

    #[test]
    fn typing_keeps_enter_and_esc() {
        assert_eq!(map_key(press(KeyCode::Enter), true), Some(Action::Enter));
        assert_eq!(map_key(press(KeyCode::Esc), true), Some(Action::Back));
        assert_eq!(map_key(press(KeyCode::Up), true), None);
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(press(KeyCode::Char('z')), false), None);
    }

    #[test]
    fn enter_maps_to_enter_action() {
        assert_eq!(map_key(press(KeyCode::Enter), false), Some(Action::Enter));
    }

    #[test]
    fn esc_maps_to_back() {
        assert_eq!(map_key(press(KeyCode::Esc), false), Some(Action::Back));
    }

    #[test]
    fn save_without_deck_path_explains() {
        let app = App::with_presentation(
            Presentation::new("D", vec![], themes::default_theme()),
            None,
        );
        assert!(save_message(&app).starts_with("No deck file"));
    }

    #[test]
    fn save_writes_deck_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.json");
        let app = App::with_presentation(
            Presentation::new("D", vec![], themes::default_theme()),
            Some(path.clone()),
        );

        let message = save_message(&app);

        assert!(message.starts_with("Saved"));
        let saved = crate::deck::load_deck(&path).unwrap();
        assert_eq!(saved.title, "D");
    }

    #[test]
    fn save_without_presentation_is_refused() {
        let app = App::compose();
        assert_eq!(save_message(&app), "Nothing to save");
    }
}
