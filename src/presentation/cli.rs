//! Command-line surface.
//!
//! Without a subcommand the terminal form starts. `classify` drives the same
//! submission controller once and prints the outcome.

use crate::application::SubmissionController;
use crate::domain::SubmissionState;
use crate::infrastructure::Classifier;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "zena", version, about = "Amharic fake news detector")]
pub struct Cli {
    /// Classification endpoint, overriding config file and ZENA_ENDPOINT
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Path to a zena.toml config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a single text and print the prediction
    Classify {
        /// Text to classify; read from stdin when omitted
        text: Option<String>,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Runs one submission to completion and returns the final state.
pub fn classify_once(classifier: Arc<dyn Classifier>, text: impl Into<String>) -> SubmissionState {
    let mut controller = SubmissionController::new(classifier);
    controller.edit(text);
    controller.submit();
    controller.wait();
    controller.state().clone()
}

/// Formats a final state for stdout, or returns the error message for stderr.
pub fn render_outcome(state: &SubmissionState, json: bool) -> Result<String, String> {
    if let Some(message) = state.error_message() {
        return Err(message);
    }
    let Some(result) = state.visible_result() else {
        return Err("No prediction was produced.".to_string());
    };
    if json {
        serde_json::to_string_pretty(result).map_err(|err| err.to_string())
    } else {
        Ok(format!(
            "Prediction: {}\nConfidence: {}",
            result.prediction,
            result.confidence_label()
        ))
    }
}

/// Drops the single trailing newline a shell pipe adds to stdin.
pub fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
