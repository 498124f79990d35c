//! Log entry structure
//!
//! An [`Entry`] is the transient state of exactly one log call. Entries are
//! pooled and reused, so [`Entry::reset`] must bring every mutable field back
//! to its empty state before an entry is handed to the next call.

use super::caller::CallSite;
use super::field_value::FieldValue;
use super::log_level::LogLevel;
use super::template;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Entry {
    pub level: LogLevel,
    /// Message template; empty means the arguments are concatenated verbatim
    pub format: String,
    pub args: Vec<FieldValue>,
    /// Rendered output, written to the sink once the formatter is done
    pub buffer: Vec<u8>,
    pub time: DateTime<Utc>,
    /// Resolved call site, `None` when caller resolution is disabled
    pub caller: Option<CallSite>,
    /// Named fields assembled by structured formatters
    pub fields: serde_json::Map<String, serde_json::Value>,
    message: String,
}

impl Entry {
    pub fn new() -> Self {
        Self {
            level: LogLevel::default(),
            format: String::new(),
            args: Vec::new(),
            buffer: Vec::new(),
            time: DateTime::<Utc>::UNIX_EPOCH,
            caller: None,
            fields: serde_json::Map::new(),
            message: String::new(),
        }
    }

    /// Whether the call supplied a message template
    #[inline]
    pub fn has_template(&self) -> bool {
        !self.format.is_empty()
    }

    /// Render the plain message (concatenation or template substitution).
    ///
    /// The result is kept in a scratch buffer owned by the entry, so repeated
    /// renders of a pooled entry do not allocate.
    pub fn render_message(&mut self) -> &str {
        self.message.clear();
        template::render(&self.format, &self.args, &mut self.message);
        &self.message
    }

    /// Render the plain message and append it to the output buffer
    pub fn append_message(&mut self) {
        self.render_message();
        self.buffer.extend_from_slice(self.message.as_bytes());
    }

    /// Populate the fields used by every call.
    pub(crate) fn fill<I>(&mut self, level: LogLevel, format: &str, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.level = level;
        self.format.push_str(format);
        self.args.extend(args.into_iter().map(Into::into));
    }

    /// Clear every per-call field. Allocated capacity is retained.
    pub fn reset(&mut self) {
        self.level = LogLevel::default();
        self.format.clear();
        self.args.clear();
        self.buffer.clear();
        self.time = DateTime::<Utc>::UNIX_EPOCH;
        self.caller = None;
        self.fields.clear();
        self.message.clear();
    }

    /// True when the entry holds no state from a previous call
    pub fn is_reset(&self) -> bool {
        self.level == LogLevel::default()
            && self.format.is_empty()
            && self.args.is_empty()
            && self.buffer.is_empty()
            && self.time == DateTime::<Utc>::UNIX_EPOCH
            && self.caller.is_none()
            && self.fields.is_empty()
            && self.message.is_empty()
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_and_template() {
        let mut entry = Entry::new();
        entry.fill(LogLevel::Info, "", ["a", "b"]);
        assert_eq!(entry.render_message(), "ab");

        entry.reset();
        entry.fill(LogLevel::Info, "{} items", [3]);
        assert!(entry.has_template());
        assert_eq!(entry.render_message(), "3 items");

        entry.append_message();
        entry.append_message();
        assert_eq!(entry.buffer, b"3 items3 items");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut entry = Entry::new();
        entry.fill(LogLevel::Error, "x={}", [1]);
        entry.buffer.extend_from_slice(b"rendered");
        entry.time = Utc::now();
        entry.caller = Some(CallSite::new("src/main.rs", 10, Some("app::main")));
        entry.fields.insert("level".into(), "ERROR".into());
        entry.render_message();
        assert!(!entry.is_reset());

        entry.reset();
        assert!(entry.is_reset());
        assert!(entry.buffer.capacity() >= "rendered".len());
    }
}
