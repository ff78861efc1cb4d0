use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(String);

/// Reads text from the system clipboard.
pub fn paste_text() -> Result<String, ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|err| ClipboardError(err.to_string()))?;
    clipboard.get_text().map_err(|err| ClipboardError(err.to_string()))
}
