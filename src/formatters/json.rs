//! JSON formatter for structured logging

use crate::core::formatter::terminate_line;
use crate::core::{Entry, Formatter, Result};
use chrono::SecondsFormat;
use serde_json::Value;

/// Renders entries as JSON lines.
///
/// With basic fields (the default) each call produces one object:
///
/// ```text
/// {"file":"src/main.rs:12","func":"app::main","level":"INFO","message":"ready","time":"2025-01-08T10:30:45Z"}
/// ```
///
/// `file` and `func` are written together whenever a call site is attached;
/// a site whose function could not be named reports `"unknown"`.
///
/// With basic fields ignored, a call without a template writes each argument
/// as its own JSON value on its own line, and a call with a template writes
/// the substituted text as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    ignore_basic_fields: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter that skips level, time and caller
    pub fn without_basic_fields() -> Self {
        Self {
            ignore_basic_fields: true,
        }
    }

    #[must_use]
    pub fn with_ignore_basic_fields(mut self, ignore: bool) -> Self {
        self.ignore_basic_fields = ignore;
        self
    }

    pub fn ignores_basic_fields(&self) -> bool {
        self.ignore_basic_fields
    }

    fn format_bare(&self, entry: &mut Entry) -> Result<()> {
        if entry.has_template() {
            entry.append_message();
            terminate_line(&mut entry.buffer);
            return Ok(());
        }

        for arg in &entry.args {
            serde_json::to_writer(&mut entry.buffer, arg)?;
            entry.buffer.push(b'\n');
        }
        Ok(())
    }

    fn format_record(&self, entry: &mut Entry) -> Result<()> {
        entry
            .fields
            .insert("level".into(), Value::from(entry.level.to_str()));
        entry.fields.insert(
            "time".into(),
            Value::from(entry.time.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        if let Some(site) = entry.caller {
            entry.fields.insert("file".into(), Value::from(site.file_line()));
            entry.fields.insert("func".into(), Value::from(site.function()));
        }

        let message = entry.render_message().to_owned();
        entry.fields.insert("message".into(), Value::from(message));

        serde_json::to_writer(&mut entry.buffer, &entry.fields)?;
        entry.buffer.push(b'\n');
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &mut Entry) -> Result<()> {
        if self.ignore_basic_fields {
            self.format_bare(entry)
        } else {
            self.format_record(entry)
        }
    }

    fn name(&self) -> &str {
        "json"
    }
}
