//! Deck files: a presentation as pretty-printed JSON on disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Presentation;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("cannot access deck {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("deck {path} is not valid: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a presentation from `path`.
pub fn load_deck(path: &Path) -> Result<Presentation, DeckError> {
    let content = fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DeckError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a presentation to `path`, replacing any existing file.
pub fn save_deck(presentation: &Presentation, path: &Path) -> Result<(), DeckError> {
    let content = serde_json::to_string_pretty(presentation).map_err(|source| DeckError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("saved deck to {}", path.display());
    Ok(())
}
