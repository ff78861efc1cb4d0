//! Application layer managing state and the submission workflow.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the submission controller and the terminal's interaction state.

pub mod controller;
pub mod state;

pub use controller::*;
pub use state::*;
