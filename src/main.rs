//! slidedeck CLI
//!
//! Generate presentations from a topic, then browse, edit and preview
//! them in the terminal.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::runtime::Runtime;

use slidedeck::deck::load_deck;
use slidedeck::generation::HttpBackend;
use slidedeck::outline::format_outline;
use slidedeck::store::PresentationStore;
use slidedeck::themes::{self, GenerationStyle};
use slidedeck::tui::{self, state::App};
use slidedeck::types::{ClientConfig, OutputFormat, DEFAULT_BACKEND};

#[derive(Parser)]
#[command(name = "slidedeck")]
#[command(about = "Generate, edit and preview slide decks in the terminal")]
#[command(version)]
struct Cli {
    /// Generation backend origin
    #[arg(long, global = true, env = "SLIDEDECK_BACKEND", default_value = DEFAULT_BACKEND)]
    backend: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the backend to generate a presentation
    Generate {
        /// What the presentation is about
        #[arg(long)]
        topic: String,

        /// What the slides should cover
        #[arg(long)]
        description: String,

        /// Visual style of the generated deck
        #[arg(long, value_enum, default_value = "professional")]
        style: StyleArg,

        /// Download the generated file (default: your downloads folder)
        #[arg(long, value_name = "DIR")]
        download: Option<Option<PathBuf>>,
    },

    /// Open the interactive editor
    Edit {
        /// Deck file to open (starts on the generation form without one)
        deck: Option<PathBuf>,
    },

    /// Print a deck's slides as rendered text
    Render {
        /// Deck file
        deck: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// List available themes and generation styles
    Themes,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StyleArg {
    Professional,
    Creative,
    Minimal,
    Vibrant,
    Academic,
    Tech,
}

impl From<StyleArg> for GenerationStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Professional => GenerationStyle::Professional,
            StyleArg::Creative => GenerationStyle::Creative,
            StyleArg::Minimal => GenerationStyle::Minimal,
            StyleArg::Vibrant => GenerationStyle::Vibrant,
            StyleArg::Academic => GenerationStyle::Academic,
            StyleArg::Tech => GenerationStyle::Tech,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = ClientConfig {
        base_url: cli.backend,
    };

    let result = match cli.command {
        Commands::Generate {
            topic,
            description,
            style,
            download,
        } => cmd_generate(&config, &topic, &description, style.into(), download),
        Commands::Edit { deck } => cmd_edit(&config, deck),
        Commands::Render { deck, format } => cmd_render(&deck, format.into()),
        Commands::Themes => cmd_themes(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Where downloads go when no directory is given.
fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn runtime() -> Result<Runtime, String> {
    Runtime::new().map_err(|e| format!("failed to start async runtime: {}", e))
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_generate(
    config: &ClientConfig,
    topic: &str,
    description: &str,
    style: GenerationStyle,
    download: Option<Option<PathBuf>>,
) -> Result<(), String> {
    let (topic, description) = (topic.trim(), description.trim());
    if topic.is_empty() || description.is_empty() {
        return Err("topic and description are required".to_string());
    }

    let runtime = runtime()?;
    let backend = HttpBackend::new(config);
    let mut store = PresentationStore::new();

    eprintln!("Backend: {}", backend.base_url());

    let sp = spinner(&format!("Generating \"{}\" ({})...", topic, style.label()));
    let response = match runtime.block_on(store.request_generation(
        &backend,
        topic,
        description,
        style.as_str(),
    )) {
        Ok(r) => {
            sp.finish_with_message("Presentation generated");
            r
        }
        Err(e) => {
            sp.finish_and_clear();
            return Err(e.to_string());
        }
    };

    let result = response
        .result()
        .ok_or_else(|| "backend reported success without file handles".to_string())?;

    println!("File:     {}", result.file_path);
    println!("Download: {}", backend.absolute_url(&result.download_url));

    if let Some(dir) = download {
        let dir = dir.unwrap_or_else(default_download_dir);
        let sp = spinner(&format!("Downloading to {}...", dir.display()));
        match runtime.block_on(backend.download(&result, &dir)) {
            Ok(path) => {
                let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                sp.finish_with_message(format!(
                    "Saved {} ({})",
                    path.display(),
                    format_size(size, BINARY)
                ));
            }
            Err(e) => {
                sp.finish_and_clear();
                return Err(e.to_string());
            }
        }
    }

    Ok(())
}

fn cmd_edit(config: &ClientConfig, deck: Option<PathBuf>) -> Result<(), String> {
    let app = match deck {
        Some(path) => {
            let presentation = load_deck(&path).map_err(|e| e.to_string())?;
            log::info!(
                "opened {} ({} slides)",
                path.display(),
                presentation.slides.len()
            );
            App::with_presentation(presentation, Some(path))
        }
        None => App::compose(),
    };

    tui::run::run(app, config, default_download_dir()).map_err(|e| e.to_string())
}

fn cmd_render(deck: &Path, format: OutputFormat) -> Result<(), String> {
    let presentation = load_deck(deck).map_err(|e| e.to_string())?;
    print!("{}", format_outline(&presentation, format));
    Ok(())
}

fn cmd_themes() -> Result<(), String> {
    println!("Themes:");
    for theme in themes::catalog() {
        println!(
            "  {:<10} {:<18} {} {} {} {}  {}",
            theme.id,
            theme.name,
            theme.primary_color,
            theme.secondary_color,
            theme.background_color,
            theme.text_color,
            theme.font_family
        );
    }

    println!();
    println!("Generation styles:");
    for style in GenerationStyle::ALL {
        println!("  {:<13} {}", style.as_str(), style.description());
    }

    Ok(())
}
