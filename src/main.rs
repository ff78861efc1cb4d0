//! ZENA - Amharic Fake News Detector
//!
//! A terminal form that sends Amharic news text to a remote classifier and
//! shows whether it is likely real or fake, with the model's confidence.

use std::io::{self, Read};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};

use zena::application::App;
use zena::infrastructure::{logging, Classifier, HttpClassifier, Settings};
use zena::presentation::{classify_once, render_outcome, render_ui, strip_trailing_newline, Cli, Command, InputHandler};

/// How long the event loop waits for input before checking the request.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Entry point.
///
/// Loads settings, installs logging, then either runs a one-shot
/// classification or the interactive terminal form.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the HTTP client cannot be
/// built, or terminal setup fails.
fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), cli.endpoint.as_deref())?;

    // Held until main returns so buffered log lines reach the file.
    let _log_handle = match logging::init(&settings.log_level) {
        Ok(handle) => {
            info!(endpoint = %settings.endpoint, log_dir = %handle.directory.display(), "starting zena");
            Some(handle)
        }
        Err(err) => {
            eprintln!("warning: {err}");
            None
        }
    };

    let classifier: Arc<dyn Classifier> = Arc::new(HttpClassifier::from_settings(&settings)?);

    match cli.command {
        Some(Command::Classify { text, json }) => run_classify(classifier, text, json),
        None => run_tui(classifier).map(|()| ExitCode::SUCCESS),
    }
}

fn run_classify(
    classifier: Arc<dyn Classifier>,
    text: Option<String>,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            strip_trailing_newline(buffer)
        }
    };

    let state = classify_once(classifier, text);
    match render_outcome(&state, json) {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_tui(classifier: Arc<dyn Classifier>) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(classifier);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if app.state().loading {
        warn!("exiting with a classification request still in flight");
    }
    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Redraws, waits up to [`TICK_RATE`] for terminal input, then collects the
/// outcome of any finished request. Runs until the user quits.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(TICK_RATE)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
                Event::Paste(text) => InputHandler::handle_paste(app, &text),
                _ => {}
            }
        }

        app.tick();
        if app.should_quit {
            return Ok(());
        }
    }
}
