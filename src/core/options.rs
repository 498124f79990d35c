//! Logger configuration
//!
//! [`Options`] is the live configuration of one logger. It is changed only
//! through [`LoggerOption`] values, each of which sets exactly one field.

use super::formatter::Formatter;
use super::log_level::LogLevel;
use super::sink::LogSink;
use crate::formatters::TextFormatter;
use crate::sinks::ConsoleSink;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Options {
    pub output: Arc<dyn LogSink>,
    /// Minimum level accepted by the leveled verbs
    pub level: LogLevel,
    /// Level given to records arriving through the writer adapter
    pub std_level: LogLevel,
    pub formatter: Arc<dyn Formatter>,
    pub disable_caller: bool,
}

impl Options {
    /// Apply `opts` over the defaults: stderr output, INFO level, INFO std
    /// level, text formatter, caller resolution enabled.
    pub fn init(opts: impl IntoIterator<Item = LoggerOption>) -> Self {
        let mut options = Self::default();
        options.apply(opts);
        options
    }

    pub fn apply(&mut self, opts: impl IntoIterator<Item = LoggerOption>) {
        for opt in opts {
            opt.apply(self);
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: Arc::new(ConsoleSink::stderr()),
            level: LogLevel::default(),
            std_level: LogLevel::default(),
            formatter: Arc::new(TextFormatter),
            disable_caller: false,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("output", &self.output.name())
            .field("level", &self.level)
            .field("std_level", &self.std_level)
            .field("formatter", &self.formatter.name())
            .field("disable_caller", &self.disable_caller)
            .finish()
    }
}

/// A single configuration change
#[derive(Clone)]
pub enum LoggerOption {
    Output(Arc<dyn LogSink>),
    Level(LogLevel),
    StdLevel(LogLevel),
    Formatter(Arc<dyn Formatter>),
    DisableCaller(bool),
}

impl LoggerOption {
    pub fn apply(self, options: &mut Options) {
        match self {
            LoggerOption::Output(output) => options.output = output,
            LoggerOption::Level(level) => options.level = level,
            LoggerOption::StdLevel(level) => options.std_level = level,
            LoggerOption::Formatter(formatter) => options.formatter = formatter,
            LoggerOption::DisableCaller(disable) => options.disable_caller = disable,
        }
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerOption::Output(output) => f.debug_tuple("Output").field(&output.name()).finish(),
            LoggerOption::Level(level) => f.debug_tuple("Level").field(level).finish(),
            LoggerOption::StdLevel(level) => f.debug_tuple("StdLevel").field(level).finish(),
            LoggerOption::Formatter(formatter) => {
                f.debug_tuple("Formatter").field(&formatter.name()).finish()
            }
            LoggerOption::DisableCaller(disable) => {
                f.debug_tuple("DisableCaller").field(disable).finish()
            }
        }
    }
}

pub fn with_output(output: impl LogSink + 'static) -> LoggerOption {
    LoggerOption::Output(Arc::new(output))
}

pub fn with_level(level: LogLevel) -> LoggerOption {
    LoggerOption::Level(level)
}

pub fn with_std_level(level: LogLevel) -> LoggerOption {
    LoggerOption::StdLevel(level)
}

pub fn with_formatter(formatter: impl Formatter + 'static) -> LoggerOption {
    LoggerOption::Formatter(Arc::new(formatter))
}

pub fn with_disable_caller(disable: bool) -> LoggerOption {
    LoggerOption::DisableCaller(disable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::JsonFormatter;
    use crate::sinks::MemorySink;

    #[test]
    fn test_defaults() {
        let options = Options::init([]);
        assert_eq!(options.output.name(), "stderr");
        assert_eq!(options.formatter.name(), "text");
        assert_eq!(options.level, LogLevel::Info);
        assert_eq!(options.std_level, LogLevel::Info);
        assert!(!options.disable_caller);
    }

    #[test]
    fn test_each_option_sets_one_field() {
        let options = Options::init([
            with_output(MemorySink::new()),
            with_level(LogLevel::Warning),
            with_std_level(LogLevel::Error),
            with_formatter(JsonFormatter::new()),
            with_disable_caller(true),
        ]);
        assert_eq!(options.output.name(), "memory");
        assert_eq!(options.level, LogLevel::Warning);
        assert_eq!(options.std_level, LogLevel::Error);
        assert_eq!(options.formatter.name(), "json");
        assert!(options.disable_caller);

        let mut changed = options.clone();
        changed.apply([with_level(LogLevel::Debug)]);
        assert_eq!(changed.level, LogLevel::Debug);
        assert_eq!(changed.std_level, LogLevel::Error);
        assert_eq!(changed.formatter.name(), "json");
    }

    #[test]
    fn test_later_options_win() {
        let options = Options::init([with_level(LogLevel::Error), with_level(LogLevel::Debug)]);
        assert_eq!(options.level, LogLevel::Debug);
    }

    #[test]
    fn test_debug_names_components() {
        let rendered = format!("{:?}", Options::default());
        assert!(rendered.contains("stderr"));
        assert!(rendered.contains("text"));
        assert_eq!(format!("{:?}", with_level(LogLevel::Panic)), "Level(Panic)");
    }
}
