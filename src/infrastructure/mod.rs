//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP classifier, the handle for the in-flight
//! request, configuration loading, logging and clipboard access.

pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod pending;

pub use classifier::*;
pub use clipboard::*;
pub use config::*;
pub use pending::*;
