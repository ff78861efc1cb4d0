//! ZENA - Amharic Fake News Detector Library
//!
//! A terminal client that sends Amharic text to a remote classification
//! service and shows the predicted label with its confidence.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
