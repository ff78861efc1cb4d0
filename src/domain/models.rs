use serde::{Deserialize, Serialize};

/// Label the classifier uses for text it considers misinformation.
pub const FAKE_NEWS_LABEL: &str = "Fake News";

/// Body of the one outbound request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub text: String,
}

impl ClassificationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Result returned by the remote classifier on success.
///
/// Unknown fields in the response are ignored; the three known fields are
/// required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub original_text: String,
    pub prediction: String,
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn is_fake(&self) -> bool {
        self.prediction == FAKE_NEWS_LABEL
    }

    /// Confidence formatted for display, e.g. `87.34%`.
    pub fn confidence_label(&self) -> String {
        format_confidence(self.confidence)
    }
}

/// Best-effort shape of an error body returned with a non-success status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extracts a usable `details` message from a raw response body.
    ///
    /// Returns `None` when the body is not JSON, has no `details` field, or
    /// the field is not a non-empty string.
    pub fn details_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.details? {
            serde_json::Value::String(details) if !details.is_empty() => Some(details),
            _ => None,
        }
    }
}

/// Scales a confidence fraction to a percentage rounded to two decimals.
///
/// # Examples
///
/// ```
/// use zena::domain::confidence_percent;
///
/// assert_eq!(confidence_percent(0.8734), 87.34);
/// assert_eq!(confidence_percent(1.0), 100.0);
/// ```
pub fn confidence_percent(confidence: f64) -> f64 {
    (confidence * 10000.0).round() / 100.0
}

/// Formats a confidence fraction as a percentage string.
///
/// Whole percentages drop the fractional part, so `0.92` renders as `92%`.
pub fn format_confidence(confidence: f64) -> String {
    let percent = confidence_percent(confidence);
    // -0.0 would otherwise render as "-0"
    let percent = if percent == 0.0 { 0.0 } else { percent };
    format!("{}%", percent)
}
