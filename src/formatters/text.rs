//! Plain-text formatter

use crate::core::formatter::terminate_line;
use crate::core::{Entry, Formatter, Result};

/// Writes only the message: concatenated arguments, or the substituted
/// template. Level, time and caller are never emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for TextFormatter {
    fn format(&self, entry: &mut Entry) -> Result<()> {
        entry.append_message();
        terminate_line(&mut entry.buffer);
        Ok(())
    }

    fn name(&self) -> &str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LogLevel};

    fn entry(format: &str, args: &[&str]) -> Entry {
        let mut entry = Entry::new();
        entry.level = LogLevel::Warning;
        entry.format.push_str(format);
        entry.args.extend(args.iter().map(|a| (*a).into()));
        entry.caller = Some(CallSite::new("src/lib.rs", 3, Some("app::run")));
        entry
    }

    #[test]
    fn test_concatenates_without_template() {
        let mut e = entry("", &["a", "b"]);
        TextFormatter.format(&mut e).unwrap();
        assert_eq!(e.buffer, b"ab\n");
        assert!(e.fields.is_empty());
    }

    #[test]
    fn test_substitutes_template() {
        let mut e = entry("user {} logged in from {}", &["ana", "10.0.0.1"]);
        TextFormatter.format(&mut e).unwrap();
        assert_eq!(e.buffer, b"user ana logged in from 10.0.0.1\n");
    }

    #[test]
    fn test_no_metadata_and_single_newline() {
        let mut e = entry("", &["line already terminated\n"]);
        TextFormatter.format(&mut e).unwrap();
        let out = String::from_utf8(e.buffer.clone()).unwrap();
        assert_eq!(out, "line already terminated\n");
        assert!(!out.contains("WARNING"));
        assert!(!out.contains("src/lib.rs"));
    }
}
