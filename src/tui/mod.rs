//! TUI module for interactive terminal interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Screen, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `theme`: Styles, including colors taken from the presentation theme
//! - `run`: Effects (terminal, key reader, backend requests)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
