//! Terminal clipboard: OSC 52 escape, with a print-for-selection fallback

use crate::core::clipboard::Clipboard;
use crate::error::VidgrabError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{IsTerminal, Write};

/// Copies through the terminal emulator
#[derive(Debug, Default)]
pub struct TerminalClipboard;

impl TerminalClipboard {
    pub fn new() -> Self {
        Self
    }
}

/// OSC 52 "set clipboard" sequence for `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl Clipboard for TerminalClipboard {
    fn write_text(&self, text: &str) -> Result<(), VidgrabError> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(VidgrabError::Clipboard(
                "stdout is not a terminal".to_string(),
            ));
        }
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Print the text between markers so it can be selected by hand
    fn legacy_copy(&self, text: &str) -> Result<(), VidgrabError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "----- copy below -----")?;
        writeln!(stdout, "{}", text)?;
        writeln!(stdout, "----------------------")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_legacy_copy_prints() {
        assert!(TerminalClipboard::new().legacy_copy("Title: T").is_ok());
    }
}
