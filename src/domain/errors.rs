use thiserror::Error;

/// Message shown when the user submits empty or whitespace-only text.
pub const VALIDATION_MESSAGE: &str = "Please enter some Amharic text to classify.";

/// Prefix carried by every failure that happened after a request was attempted.
pub const FAILURE_PREFIX: &str = "Failed to get prediction: ";

/// Ways a single classification attempt can end without a result.
///
/// None of these are retried; the user has to submit again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Input was empty after trimming. Never reaches the network.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    /// The request could not be completed.
    #[error("{0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("{}", server_message(*status, details.as_deref()))]
    Server { status: u16, details: Option<String> },
    /// The service answered with success but the body is not a result.
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

fn server_message(status: u16, details: Option<&str>) -> String {
    match details {
        Some(details) => details.to_string(),
        None => format!("HTTP error! status: {}", status),
    }
}

impl PredictionError {
    /// Text shown to the user for this failure.
    ///
    /// Validation errors are shown as-is; everything else is prefixed with
    /// [`FAILURE_PREFIX`].
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Validation => self.to_string(),
            _ => format!("{}{}", FAILURE_PREFIX, self),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PredictionError::Validation)
    }
}

pub type PredictionResult<T> = Result<T, PredictionError>;
