//! Clipboard support for copying calculator results.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;

    clipboard
        .set_text(text.to_string())
        .with_context(|| format!("Failed to copy '{}' to clipboard", text))
}
