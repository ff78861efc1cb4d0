//! Handle for the one in-flight classification request.

use crate::domain::{ClassificationResult, PredictionError, PredictionResult};
use crate::infrastructure::classifier::Classifier;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::debug;

type Outcome = PredictionResult<ClassificationResult>;

/// A classification running on a worker thread.
///
/// The outcome is collected with [`poll`](Self::poll) or
/// [`wait`](Self::wait). [`cancel`](Self::cancel) only discards the outcome;
/// the HTTP call itself still runs to completion.
#[derive(Debug)]
pub struct PendingPrediction {
    receiver: Receiver<Outcome>,
    cancelled: Arc<AtomicBool>,
}

impl PendingPrediction {
    /// Starts classifying `text` on a new worker thread.
    pub fn spawn(classifier: Arc<dyn Classifier>, text: String) -> Self {
        let (sender, receiver) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));

        let worker_sender = sender.clone();
        let worker_cancelled = Arc::clone(&cancelled);
        let spawned = thread::Builder::new()
            .name("zena-request".to_string())
            .spawn(move || {
                let outcome = classifier.classify(&text);
                if worker_cancelled.load(Ordering::SeqCst) {
                    debug!("discarding outcome of cancelled request");
                    return;
                }
                let _ = worker_sender.send(outcome);
            });

        if let Err(err) = spawned {
            let _ = sender.send(Err(PredictionError::Transport(format!(
                "could not start request worker: {}",
                err
            ))));
        }

        Self { receiver, cancelled }
    }

    /// Returns the outcome if the request has finished.
    pub fn poll(&self) -> Option<Outcome> {
        if self.is_cancelled() {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_lost())),
        }
    }

    /// Blocks until the request finishes.
    pub fn wait(self) -> Outcome {
        self.receiver.recv().unwrap_or_else(|_| Err(worker_lost()))
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

fn worker_lost() -> PredictionError {
    PredictionError::Transport("request worker stopped without a response".to_string())
}
