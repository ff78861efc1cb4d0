//! HTTP access to the remote classification service.

use crate::domain::{
    ClassificationRequest, ClassificationResult, ErrorBody, PredictionError, PredictionResult,
};
use crate::infrastructure::config::Settings;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Something that can classify a piece of text.
///
/// Implementations block until the classification finishes.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> PredictionResult<ClassificationResult>;
}

/// Classifier backed by the remote JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    endpoint: Url,
}

impl HttpClassifier {
    /// Builds a classifier posting to `endpoint`.
    ///
    /// With `timeout` set to `None` the request waits as long as the
    /// transport allows.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        Self::new(settings.endpoint.clone(), settings.timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, text: &str) -> PredictionResult<ClassificationResult> {
        debug!(endpoint = %self.endpoint, chars = text.chars().count(), "posting classification request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ClassificationRequest::new(text))
            .send()
            .map_err(|err| PredictionError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let details = ErrorBody::details_from(&body);
            if details.is_none() {
                warn!(status = status.as_u16(), "error response carried no details");
            }
            return Err(PredictionError::Server {
                status: status.as_u16(),
                details,
            });
        }

        let body = response
            .text()
            .map_err(|err| PredictionError::Transport(err.to_string()))?;
        serde_json::from_str::<ClassificationResult>(&body)
            .map_err(|err| PredictionError::InvalidResponse(err.to_string()))
    }
}
