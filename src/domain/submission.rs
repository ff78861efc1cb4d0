//! Submission lifecycle as a pure state machine.
//!
//! [`SubmissionState`] holds everything the form displays. [`transition`]
//! maps a state and an [`Event`] to the next state plus an optional
//! [`Effect`] the caller has to carry out. Nothing here performs I/O, so the
//! terminal UI, the CLI and the tests all drive the same machine.

use super::errors::PredictionError;
use super::models::ClassificationResult;

/// Lifecycle phase derived from a [`SubmissionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing submitted yet, or the input was edited since the last attempt.
    Idle,
    /// A request is in flight.
    Submitting,
    /// The last attempt produced a result.
    Success,
    /// The last attempt failed, including local validation.
    Failed,
}

/// Everything the form needs to render.
///
/// `result` and `error` are never both set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionState {
    pub input: String,
    pub result: Option<ClassificationResult>,
    pub error: Option<PredictionError>,
    pub loading: bool,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The input text was replaced with a new value.
    Edit(String),
    /// The user asked to classify the current input.
    Submit,
    /// The in-flight request finished.
    Resolved(Result<ClassificationResult, PredictionError>),
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send exactly this text to the classifier.
    SendRequest { text: String },
}

impl SubmissionState {
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// Whether the submit trigger is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Message to show in the error block, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(PredictionError::user_message)
    }

    /// Result to show, suppressed whenever an error is set.
    pub fn visible_result(&self) -> Option<&ClassificationResult> {
        if self.error.is_some() {
            None
        } else {
            self.result.as_ref()
        }
    }
}

/// Computes the next state for `event`.
///
/// A submit while a request is in flight and a resolution arriving while no
/// request is in flight both leave the state untouched.
pub fn transition(state: SubmissionState, event: Event) -> (SubmissionState, Option<Effect>) {
    match event {
        Event::Edit(input) => {
            let next = SubmissionState {
                input,
                result: None,
                error: None,
                loading: state.loading,
            };
            (next, None)
        }
        Event::Submit => {
            if state.loading {
                return (state, None);
            }
            if state.input.trim().is_empty() {
                let next = SubmissionState {
                    result: None,
                    error: Some(PredictionError::Validation),
                    loading: false,
                    ..state
                };
                return (next, None);
            }
            let effect = Effect::SendRequest {
                text: state.input.clone(),
            };
            let next = SubmissionState {
                result: None,
                error: None,
                loading: true,
                ..state
            };
            (next, Some(effect))
        }
        Event::Resolved(outcome) => {
            if !state.loading {
                return (state, None);
            }
            let next = match outcome {
                Ok(result) => SubmissionState {
                    result: Some(result),
                    error: None,
                    loading: false,
                    ..state
                },
                Err(error) => SubmissionState {
                    result: None,
                    error: Some(error),
                    loading: false,
                    ..state
                },
            };
            (next, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::VALIDATION_MESSAGE;

    fn sample_result() -> ClassificationResult {
        ClassificationResult {
            original_text: "ይህ ዜና እውነት ነው".to_string(),
            prediction: "Real News".to_string(),
            confidence: 0.92,
        }
    }

    fn assert_exclusive(state: &SubmissionState) {
        assert!(!(state.result.is_some() && state.error.is_some()));
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = SubmissionState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.can_submit());
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_submit_empty_input_fails_validation_without_effect() {
        for input in ["", "   ", "\n\t  "] {
            let (state, effect) = transition(SubmissionState::with_input(input), Event::Submit);
            assert!(effect.is_none());
            assert_eq!(state.phase(), Phase::Failed);
            assert!(!state.loading);
            assert_eq!(state.error_message().as_deref(), Some(VALIDATION_MESSAGE));
        }
    }

    #[test]
    fn test_submit_sends_untrimmed_text() {
        let (state, effect) = transition(SubmissionState::with_input("  ሰላም \n"), Event::Submit);
        assert_eq!(
            effect,
            Some(Effect::SendRequest { text: "  ሰላም \n".to_string() })
        );
        assert_eq!(state.phase(), Phase::Submitting);
        assert!(!state.can_submit());
        assert_eq!(state.input, "  ሰላም \n");
    }

    #[test]
    fn test_submit_clears_previous_outcome() {
        let state = SubmissionState {
            input: "ሰላም".to_string(),
            result: Some(sample_result()),
            error: None,
            loading: false,
        };
        let (state, effect) = transition(state, Event::Submit);
        assert!(effect.is_some());
        assert!(state.result.is_none());
        assert!(state.error.is_none());
        assert!(state.loading);
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let (state, _) = transition(SubmissionState::with_input("ሰላም"), Event::Submit);
        let (again, effect) = transition(state.clone(), Event::Submit);
        assert!(effect.is_none());
        assert_eq!(again, state);
    }

    #[test]
    fn test_resolved_success() {
        let (state, _) = transition(SubmissionState::with_input("ይህ ዜና እውነት ነው"), Event::Submit);
        let (state, effect) = transition(state, Event::Resolved(Ok(sample_result())));
        assert!(effect.is_none());
        assert_eq!(state.phase(), Phase::Success);
        let shown = state.visible_result().unwrap();
        assert_eq!(shown.prediction, "Real News");
        assert_eq!(shown.confidence_label(), "92%");
        assert_exclusive(&state);
    }

    #[test]
    fn test_resolved_failure() {
        let (state, _) = transition(SubmissionState::with_input("ሰላም"), Event::Submit);
        let error = PredictionError::Server { status: 500, details: None };
        let (state, _) = transition(state, Event::Resolved(Err(error)));
        assert_eq!(state.phase(), Phase::Failed);
        assert!(state.visible_result().is_none());
        assert!(state.error_message().unwrap().contains("500"));
        assert_exclusive(&state);
    }

    #[test]
    fn test_resolution_without_request_is_ignored() {
        let state = SubmissionState::with_input("ሰላም");
        let (next, _) = transition(state.clone(), Event::Resolved(Ok(sample_result())));
        assert_eq!(next, state);
    }

    #[test]
    fn test_edit_after_completion_clears_outcome() {
        let (state, _) = transition(SubmissionState::with_input("ሰላም"), Event::Submit);
        let (state, _) = transition(state, Event::Resolved(Ok(sample_result())));
        let (state, _) = transition(state, Event::Edit("ሰላም!".to_string()));
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.result.is_none());

        let (state, _) = transition(state, Event::Edit(String::new()));
        let (state, _) = transition(state, Event::Submit);
        assert_eq!(state.phase(), Phase::Failed);
        let (state, _) = transition(state, Event::Edit("a".to_string()));
        assert!(state.error.is_none());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_edit_keeps_loading_flag() {
        let (state, _) = transition(SubmissionState::with_input("ሰላም"), Event::Submit);
        let (state, _) = transition(state, Event::Edit("other".to_string()));
        assert!(state.loading);
        assert_eq!(state.phase(), Phase::Submitting);
    }

    #[test]
    fn test_exclusive_across_event_sequence() {
        let events = vec![
            Event::Submit,
            Event::Edit("ሰላም".to_string()),
            Event::Submit,
            Event::Resolved(Ok(sample_result())),
            Event::Submit,
            Event::Resolved(Err(PredictionError::Transport("reset".to_string()))),
            Event::Edit("   ".to_string()),
            Event::Submit,
        ];
        let mut state = SubmissionState::default();
        for event in events {
            let (next, _) = transition(state, event);
            assert_exclusive(&next);
            state = next;
        }
        assert!(state.error.as_ref().unwrap().is_validation());
    }
}
