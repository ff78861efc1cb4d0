use crate::application::{App, AppMode};
use crate::infrastructure::clipboard;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    /// Inserts text delivered by a terminal bracketed paste.
    pub fn handle_paste(app: &mut App, text: &str) {
        if matches!(app.mode, AppMode::Normal) {
            app.insert_str(text);
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('c') => app.should_quit = true,
                KeyCode::Char('v') => Self::paste_from_clipboard(app),
                KeyCode::Char('u') => app.clear_input(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                app.should_quit = true;
            }
            KeyCode::F(1) => {
                app.show_help();
            }
            KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => {
                app.insert_char('\n');
            }
            KeyCode::Enter => {
                app.submit();
            }
            KeyCode::Backspace => {
                app.backspace();
            }
            KeyCode::Delete => {
                app.delete();
            }
            KeyCode::Left => {
                app.move_cursor_left();
            }
            KeyCode::Right => {
                app.move_cursor_right();
            }
            KeyCode::Home => {
                app.move_cursor_home();
            }
            KeyCode::End => {
                app.move_cursor_end();
            }
            KeyCode::Char(c) => {
                app.insert_char(c);
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn paste_from_clipboard(app: &mut App) {
        match clipboard::paste_text() {
            Ok(text) => {
                app.status_message = None;
                app.insert_str(&text);
            }
            Err(err) => {
                warn!("{}", err);
                app.status_message = Some(err.to_string());
            }
        }
    }
}
