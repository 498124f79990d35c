//! # Rust Pooled Logger
//!
//! A leveled, structured logger with pooled entries and hot-swappable
//! configuration.
//!
//! ## Features
//!
//! - **Leveled verbs**: `debug`, `info`, `warn`, `error`, plus terminal
//!   `panic` and `fatal`, each with a runtime-template `f` form
//! - **Pluggable formatting**: plain text or JSON records
//! - **Live reconfiguration**: options are swapped atomically while log
//!   calls keep reading lock-free snapshots
//! - **Entry pooling**: per-call scratch buffers are reused, not reallocated
//! - **Writer adapter**: hand the logger to anything that takes `io::Write`
//!
//! ## Example
//!
//! ```
//! use rust_pooled_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new([
//!     with_output(sink.clone()),
//!     with_formatter(JsonFormatter::new()),
//! ]);
//!
//! logger.infof("listening on {}", ["0.0.0.0:8080"]);
//!
//! let record: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
//! assert_eq!(record["level"], "INFO");
//! assert_eq!(record["message"], "listening on 0.0.0.0:8080");
//! ```

pub mod config;
pub mod core;
pub mod formatters;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::config::{LoggerConfig, OutputFormat, OutputTarget};
    pub use crate::core::{
        with_disable_caller, with_formatter, with_level, with_output, with_std_level, CallSite,
        Entry, FieldValue, Formatter, LogLevel, LogSink, LogWriter, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, LoggerOption, Options, Result,
    };
    pub use crate::formatters::{JsonFormatter, TextFormatter};
    pub use crate::sinks::{ConsoleSink, ConsoleStream, FileSink, MemorySink, WriterSink};
}

pub use config::LoggerConfig;
pub use core::{
    CallSite, Entry, EntryPool, Escalation, FieldValue, Formatter, LogLevel, LogSink, LogWriter,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerOption, Options, PooledEntry, Result,
};
pub use formatters::{JsonFormatter, TextFormatter};
pub use global::std_logger;
pub use sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
