//! Core logger types and traits

pub mod caller;
pub mod error;
pub mod field_value;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod pool;
pub mod sink;
pub mod template;

pub use caller::CallSite;
pub use error::{LoggerError, Result};
pub use field_value::FieldValue;
pub use formatter::Formatter;
pub use log_entry::Entry;
pub use log_level::{Escalation, LogLevel};
pub use logger::{LogWriter, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use options::{
    with_disable_caller, with_formatter, with_level, with_output, with_std_level, LoggerOption,
    Options,
};
pub use pool::{EntryPool, PooledEntry};
pub use sink::LogSink;
