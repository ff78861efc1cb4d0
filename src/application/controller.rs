//! The submission controller: owns one [`SubmissionState`], feeds events
//! through [`transition`] and runs the resulting request.

use crate::domain::{transition, Effect, Event, SubmissionState};
use crate::infrastructure::{Classifier, PendingPrediction};
use std::sync::Arc;
use tracing::{debug, error, info};

type Listener = Box<dyn FnMut(&SubmissionState)>;

/// Drives the submission state machine against a [`Classifier`].
///
/// At most one request is in flight at a time; it is never cancelled by the
/// controller and always runs to completion.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use zena::application::SubmissionController;
/// use zena::infrastructure::{HttpClassifier, Settings};
///
/// let classifier = HttpClassifier::from_settings(&Settings::default()).unwrap();
/// let mut controller = SubmissionController::new(Arc::new(classifier));
/// controller.edit("ይህ ዜና እውነት ነው");
/// controller.submit();
/// controller.wait();
/// println!("{:?}", controller.state().visible_result());
/// ```
pub struct SubmissionController {
    state: SubmissionState,
    classifier: Arc<dyn Classifier>,
    pending: Option<PendingPrediction>,
    listeners: Vec<Listener>,
}

impl SubmissionController {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            state: SubmissionState::default(),
            classifier,
            pending: None,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Registers a callback invoked after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&SubmissionState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces the input text, clearing any previous result or error.
    pub fn edit(&mut self, input: impl Into<String>) {
        self.dispatch(Event::Edit(input.into()));
    }

    /// Submits the current input. Returns whether a request was started.
    pub fn submit(&mut self) -> bool {
        self.dispatch(Event::Submit)
    }

    /// Collects the outcome of the in-flight request if it has finished.
    /// Returns whether the state changed.
    pub fn poll(&mut self) -> bool {
        let outcome = match self.pending.as_ref().and_then(PendingPrediction::poll) {
            Some(outcome) => outcome,
            None => return false,
        };
        self.pending = None;
        self.dispatch(Event::Resolved(outcome));
        true
    }

    /// Blocks until the in-flight request, if any, finishes.
    pub fn wait(&mut self) {
        if let Some(pending) = self.pending.take() {
            let outcome = pending.wait();
            self.dispatch(Event::Resolved(outcome));
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    fn dispatch(&mut self, event: Event) -> bool {
        let is_submit = matches!(event, Event::Submit);
        if let Event::Resolved(outcome) = &event {
            match outcome {
                Ok(result) => info!(
                    prediction = %result.prediction,
                    confidence = result.confidence,
                    "prediction received"
                ),
                Err(err) => error!("Prediction error: {}", err),
            }
        }

        let current = std::mem::take(&mut self.state);
        let (next, effect) = transition(current, event);
        self.state = next;

        let started = match effect {
            Some(effect) => {
                self.run(effect);
                true
            }
            None => false,
        };

        if is_submit && self.state.error.as_ref().is_some_and(|err| err.is_validation()) {
            debug!("submission rejected: empty input");
        }
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
        started
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::SendRequest { text } => {
                debug!(chars = text.chars().count(), "starting classification request");
                self.pending = Some(PendingPrediction::spawn(Arc::clone(&self.classifier), text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Phase, PredictionError, VALIDATION_MESSAGE};
    use crate::infrastructure::classifier::testing::RecordingClassifier;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_submit_issues_exactly_one_request_with_untrimmed_text() {
        let classifier = Arc::new(RecordingClassifier::succeeding("Real News", 0.92));
        let mut controller = SubmissionController::new(classifier.clone());
        controller.edit("  ይህ ዜና እውነት ነው ");
        assert!(controller.submit());
        assert!(controller.is_loading());
        controller.wait();

        assert_eq!(classifier.calls(), vec!["  ይህ ዜና እውነት ነው ".to_string()]);
        assert_eq!(controller.state().phase(), Phase::Success);
        let result = controller.state().visible_result().unwrap();
        assert_eq!(result.prediction, "Real News");
        assert_eq!(result.confidence_label(), "92%");
    }

    #[test]
    fn test_blank_submit_issues_no_request() {
        let classifier = Arc::new(RecordingClassifier::succeeding("Real News", 0.92));
        let mut controller = SubmissionController::new(classifier.clone());
        for input in ["", " ", "\t\n"] {
            controller.edit(input);
            assert!(!controller.submit());
            controller.wait();
            assert_eq!(
                controller.state().error_message().as_deref(),
                Some(VALIDATION_MESSAGE)
            );
        }
        assert!(classifier.calls().is_empty());
    }

    #[test]
    fn test_second_submit_while_loading_is_ignored() {
        let classifier = Arc::new(RecordingClassifier::succeeding("Real News", 0.5));
        let mut controller = SubmissionController::new(classifier.clone());
        controller.edit("ሰላም");
        assert!(controller.submit());
        assert!(!controller.submit());
        controller.wait();
        assert_eq!(classifier.calls().len(), 1);
    }

    #[test]
    fn test_failure_is_prefixed_and_cleared_by_edit() {
        let classifier = Arc::new(RecordingClassifier::new(Err(PredictionError::Server {
            status: 500,
            details: Some("model unavailable".to_string()),
        })));
        let mut controller = SubmissionController::new(classifier);
        controller.edit("ሰላም");
        controller.submit();
        controller.wait();

        let message = controller.state().error_message().unwrap();
        assert_eq!(message, "Failed to get prediction: model unavailable");
        assert!(controller.state().visible_result().is_none());

        controller.edit("ሰላም!");
        assert!(controller.state().error.is_none());
        assert_eq!(controller.state().phase(), Phase::Idle);
    }

    #[test]
    fn test_poll_without_request_does_nothing() {
        let classifier = Arc::new(RecordingClassifier::succeeding("Real News", 0.5));
        let mut controller = SubmissionController::new(classifier);
        assert!(!controller.poll());
        assert_eq!(controller.state(), &SubmissionState::default());
    }

    #[test]
    fn test_listeners_observe_every_change() {
        let classifier = Arc::new(RecordingClassifier::succeeding("Fake News", 0.25));
        let mut controller = SubmissionController::new(classifier);
        let seen: Rc<RefCell<Vec<Phase>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.subscribe(move |state| sink.borrow_mut().push(state.phase()));

        controller.edit("ሰላም");
        controller.submit();
        controller.wait();

        assert_eq!(
            *seen.borrow(),
            vec![Phase::Idle, Phase::Submitting, Phase::Success]
        );
    }
}
