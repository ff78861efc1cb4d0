use crate::application::{App, AppMode};
use crate::domain::{ClassificationResult, SubmissionState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub const TITLE: &str = "Amharic Fake News Detector";
pub const SUBTITLE: &str = "Unmasking misinformation in Amharic text.";
pub const INPUT_LABEL: &str = "Enter Amharic News Text:";
pub const PLACEHOLDER: &str = "የዜና ጽሑፍ እዚህ ያስገቡ...";
pub const SUBMIT_LABEL: &str = "Detect Fake News";
pub const LOADING_LABEL: &str = "Detecting...";

const DISCLAIMER: &str = "Important Note: This prototype uses a general Amharic BERT model. \
For accurate Fake News Detection, the model must be fine-tuned on a dedicated Amharic fake news dataset. \
The classification 'Real News' vs. 'Fake News' is for demonstration and depends on the model's training labels.";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(outcome_height(app.state())),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_input(f, app, chunks[1]);
    render_trigger(f, app.state(), chunks[2]);
    render_outcome(f, app.state(), chunks[3]);
    render_disclaimer(f, chunks[4]);
    render_status_bar(f, app, chunks[5]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn outcome_height(state: &SubmissionState) -> u16 {
    if state.error.is_some() {
        4
    } else if state.visible_result().is_some() {
        7
    } else {
        0
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.state().loading {
        format!("{} ({})", INPUT_LABEL, LOADING_LABEL)
    } else {
        INPUT_LABEL.to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    let (rows, (row, col)) = layout_input(app.input(), app.cursor_position, inner.width as usize);
    let visible_rows = inner.height.max(1) as usize;
    let scroll = row.saturating_sub(visible_rows - 1);

    let paragraph = if app.input().is_empty() {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(rows.into_iter().map(Line::from).collect::<Vec<_>>())
    };
    f.render_widget(paragraph.block(block).scroll((scroll as u16, 0)), area);

    if matches!(app.mode, AppMode::Normal) && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (col as u16).min(inner.width - 1);
        let y = inner.y + (row - scroll) as u16;
        f.set_cursor_position(Position::new(x, y));
    }
}

/// Hard-wraps `text` into rows of at most `width` characters.
///
/// Returns the rows and the cursor's `(row, col)` for a cursor sitting
/// before the character at index `cursor`. A cursor after a full row
/// moves to the start of the next one.
fn layout_input(text: &str, cursor: usize, width: usize) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut col = 0;
    let mut cursor_at = None;

    for (index, c) in text.chars().enumerate() {
        if c != '\n' && col == width {
            rows.push(String::new());
            col = 0;
        }
        if index == cursor {
            cursor_at = Some((rows.len() - 1, col));
        }
        if c == '\n' {
            rows.push(String::new());
            col = 0;
        } else if let Some(last) = rows.last_mut() {
            last.push(c);
            col += 1;
        }
    }

    let cursor_at = cursor_at.unwrap_or_else(|| {
        if col == width {
            rows.push(String::new());
            (rows.len() - 1, 0)
        } else {
            (rows.len() - 1, col)
        }
    });
    (rows, cursor_at)
}

fn render_trigger(f: &mut Frame, state: &SubmissionState, area: Rect) {
    if area.height == 0 {
        return;
    }
    let (label, style) = if state.can_submit() {
        (
            format!("[ {} ]", SUBMIT_LABEL),
            Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            format!("[ {} ]", LOADING_LABEL),
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        )
    };
    let trigger = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center);
    let inner = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    f.render_widget(trigger, inner);
}

fn render_outcome(f: &mut Frame, state: &SubmissionState, area: Rect) {
    if area.height == 0 {
        return;
    }
    if let Some(message) = state.error_message() {
        let error = Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::LightRed))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Error:")
                    .style(Style::default().fg(Color::Red)),
            );
        f.render_widget(error, area);
    } else if let Some(result) = state.visible_result() {
        render_result(f, result, area);
    }
}

fn render_result(f: &mut Frame, result: &ClassificationResult, area: Rect) {
    let label_style = if result.is_fake() {
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(Color::White).bg(Color::Green).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Input Text: ", Style::default().fg(Color::Gray)),
            Span::styled(
                result.original_text.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("This news is likely: "),
            Span::styled(format!(" {} ", result.prediction), label_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Confidence: ", Style::default().fg(Color::Gray)),
            Span::styled(result.confidence_label(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Prediction Result")
        .style(Style::default().fg(Color::LightBlue));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

fn render_disclaimer(f: &mut Frame, area: Rect) {
    let note = Paragraph::new(DISCLAIMER)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(note, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else if app.state().loading {
                "Waiting for the classifier... | Esc/Ctrl+C: quit".to_string()
            } else {
                "Enter: detect | Alt+Enter: new line | Ctrl+V: paste | Ctrl+U: clear | F1: help | Esc: quit"
                    .to_string()
            }
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("zena Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"ZENA - AMHARIC FAKE NEWS DETECTOR

=== HOW IT WORKS ===
• Type or paste Amharic news text into the input box
• Press Enter to send it to the classification service
• The result shows the predicted label and the model's confidence
• Editing the text clears the previous result or error

=== EDITING ===
Characters      Inserted at the cursor
Alt+Enter       Insert a new line
Backspace       Delete character before the cursor
Delete          Delete character under the cursor
←/→             Move the cursor
Home/End        Jump to start/end of the text
Ctrl+V          Paste from the system clipboard
Ctrl+U          Clear the input

=== DETECTION ===
Enter           Detect fake news
                Disabled while a request is in flight
                Empty text is rejected without contacting the service

=== CONFIGURATION ===
--endpoint URL  Classification endpoint for this run
ZENA_ENDPOINT   Environment override for the endpoint
zena.toml       endpoint, timeout_secs and log_level

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/q        Close this help window

=== QUITTING ===
Esc / Ctrl+C    Quit"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::classifier::testing::RecordingClassifier;
    use crate::domain::PredictionError;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn resolved_app(classifier: RecordingClassifier, input: &str) -> App {
        let mut app = App::new(Arc::new(classifier));
        app.insert_str(input);
        app.submit();
        app.controller.wait();
        app
    }

    #[test]
    fn test_idle_form_shows_title_and_trigger() {
        let app = App::new(Arc::new(RecordingClassifier::succeeding("Real News", 0.5)));
        let screen = render_to_string(&app);
        assert!(screen.contains(TITLE));
        assert!(screen.contains(SUBMIT_LABEL));
        assert!(!screen.contains("Prediction Result"));
    }

    #[test]
    fn test_loading_label_while_submitting() {
        let mut app = App::new(Arc::new(RecordingClassifier::succeeding("Real News", 0.5)));
        app.insert_str("text");
        app.submit();
        let screen = render_to_string(&app);
        assert!(screen.contains(LOADING_LABEL));
        assert!(screen.contains("Enter Amharic News Text: (Detecting...)"));
        app.controller.wait();

        let screen = render_to_string(&app);
        assert!(!screen.contains("(Detecting...)"));
    }

    #[test]
    fn test_long_single_line_input_wraps_inside_box() {
        let mut app = App::new(Arc::new(RecordingClassifier::succeeding("Real News", 0.5)));
        app.insert_str(&format!("{}ENDMARK", "ሀ".repeat(150)));

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("ENDMARK"));

        // Inner width is 98: the second row holds 52 + 7 characters.
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor, Position::new(60, 4));
    }

    #[test]
    fn test_layout_input_wraps_by_width() {
        let (rows, cursor) = layout_input("abcdefg", 7, 3);
        assert_eq!(rows, vec!["abc", "def", "g"]);
        assert_eq!(cursor, (2, 1));

        let (_, cursor) = layout_input("abcdefg", 4, 3);
        assert_eq!(cursor, (1, 1));
    }

    #[test]
    fn test_layout_input_newlines_start_rows() {
        let (rows, cursor) = layout_input("ab\ncd", 3, 10);
        assert_eq!(rows, vec!["ab", "cd"]);
        assert_eq!(cursor, (1, 0));

        let (_, cursor) = layout_input("ab\ncd", 2, 10);
        assert_eq!(cursor, (0, 2));
    }

    #[test]
    fn test_layout_input_cursor_after_full_row() {
        let (rows, cursor) = layout_input("abc", 3, 3);
        assert_eq!(rows, vec!["abc", ""]);
        assert_eq!(cursor, (1, 0));

        let (rows, cursor) = layout_input("", 0, 3);
        assert_eq!(rows, vec![""]);
        assert_eq!(cursor, (0, 0));
    }

    #[test]
    fn test_result_block_rendered() {
        let app = resolved_app(RecordingClassifier::succeeding("Real News", 0.92), "news");
        let screen = render_to_string(&app);
        assert!(screen.contains("Prediction Result"));
        assert!(screen.contains("Real News"));
        assert!(screen.contains("92%"));
    }

    #[test]
    fn test_error_block_rendered_without_result() {
        let classifier = RecordingClassifier::new(Err(PredictionError::Server {
            status: 500,
            details: None,
        }));
        let app = resolved_app(classifier, "news");
        let screen = render_to_string(&app);
        assert!(screen.contains("Error:"));
        assert!(screen.contains("HTTP error! status: 500"));
        assert!(!screen.contains("Prediction Result"));
    }

    #[test]
    fn test_help_popup_rendered() {
        let mut app = App::new(Arc::new(RecordingClassifier::succeeding("Real News", 0.5)));
        app.show_help();
        let screen = render_to_string(&app);
        assert!(screen.contains("zena Help"));
    }
}
