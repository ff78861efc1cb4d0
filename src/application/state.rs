//! Application state for the terminal form.
//!
//! Wraps the [`SubmissionController`] with the purely visual state of the
//! terminal: cursor, help popup, status line and the quit flag.

use crate::application::controller::SubmissionController;
use crate::domain::SubmissionState;
use crate::infrastructure::Classifier;
use std::sync::Arc;

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Typing into the form
    Normal,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// The cursor is a character index into the input, not a byte offset, so
/// multi-byte Ethiopic text can be edited safely.
pub struct App {
    /// Owns the input text and the submission lifecycle
    pub controller: SubmissionController,
    /// Current application mode
    pub mode: AppMode,
    /// Cursor position within the input, in characters
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Set once the user asked to leave
    pub should_quit: bool,
}

impl App {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            controller: SubmissionController::new(classifier),
            mode: AppMode::Normal,
            cursor_position: 0,
            help_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        self.controller.state()
    }

    pub fn input(&self) -> &str {
        &self.controller.state().input
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Inserts text at the cursor, normalizing `\r\n` and `\r` to `\n`.
    pub fn insert_str(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if text.is_empty() {
            return;
        }
        let mut input = self.input().to_string();
        let at = self.byte_index(self.cursor_position);
        input.insert_str(at, &text);
        self.cursor_position += text.chars().count();
        self.controller.edit(input);
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let mut input = self.input().to_string();
        let at = self.byte_index(self.cursor_position - 1);
        input.remove(at);
        self.cursor_position -= 1;
        self.controller.edit(input);
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor_position >= self.input_len() {
            return;
        }
        let mut input = self.input().to_string();
        let at = self.byte_index(self.cursor_position);
        input.remove(at);
        self.controller.edit(input);
    }

    pub fn clear_input(&mut self) {
        self.cursor_position = 0;
        self.controller.edit(String::new());
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input_len();
    }

    /// Submits the input unless a request is already in flight.
    pub fn submit(&mut self) {
        self.status_message = None;
        if !self.state().can_submit() {
            return;
        }
        self.controller.submit();
    }

    /// Collects a finished request. Called once per event-loop iteration.
    pub fn tick(&mut self) {
        self.controller.poll();
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    fn input_len(&self) -> usize {
        self.input().chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        let input = self.input();
        input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(input.len())
    }
}
