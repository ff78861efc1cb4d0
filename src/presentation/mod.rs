//! Presentation layer handling the terminal UI, user input and the CLI.
//!
//! This module renders the classification form with ratatui, maps
//! keyboard input onto the application state, and defines the
//! command-line interface.

pub mod cli;
pub mod ui;
pub mod input;

pub use cli::*;
pub use ui::*;
pub use input::*;
