//! slidedeck: generate slide decks from a topic, then edit and preview them.

pub mod deck;
pub mod generation;
pub mod outline;
pub mod render;
pub mod store;
pub mod themes;
pub mod tui;
pub mod types;
