//! Main logger implementation
//!
//! A log call flows through one pipeline:
//!
//! 1. level gate against the current [`Options`] snapshot
//! 2. entry acquired from the pool and populated
//! 3. call site attached unless caller resolution is disabled
//! 4. timestamp captured
//! 5. formatter renders into the entry's buffer
//! 6. buffer written to the output sink
//! 7. entry reset and returned to the pool (also on failure)
//!
//! `Panic` and `Fatal` verbs run the same pipeline and then escalate, whether
//! or not the gate let the record through.

use super::{
    caller::CallSite,
    error::Result,
    field_value::FieldValue,
    formatter::Formatter,
    log_level::{Escalation, LogLevel},
    metrics::LoggerMetrics,
    options::{LoggerOption, Options},
    pool::EntryPool,
    sink::LogSink,
    template,
};
use arc_swap::ArcSwap;
use chrono::Utc;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

struct Shared {
    /// Read lock-free by every log call
    options: ArcSwap<Options>,
    /// Serializes `set_options` callers
    config_lock: Mutex<()>,
    pool: EntryPool,
    metrics: LoggerMetrics,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Err(e) = self.options.load().output.flush() {
            let _ = writeln!(io::stderr(), "[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Leveled logger with pooled entries.
///
/// Cloning is cheap; clones share configuration, pool and metrics.
///
/// # Example
///
/// ```
/// use rust_pooled_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::new([with_output(sink.clone()), with_level(LogLevel::Debug)]);
///
/// logger.info(["server ", "started"]);
/// logger.warnf("retry {} of {}", [3, 5]);
///
/// assert_eq!(sink.lines(), vec!["server started", "retry 3 of 5"]);
/// ```
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
}

impl Logger {
    /// Build a logger from `opts` applied over the defaults
    #[must_use]
    pub fn new(opts: impl IntoIterator<Item = LoggerOption>) -> Self {
        Self::from_parts(Options::init(opts), EntryPool::default())
    }

    fn from_parts(options: Options, pool: EntryPool) -> Self {
        Self {
            shared: Arc::new(Shared {
                options: ArcSwap::from_pointee(options),
                config_lock: Mutex::new(()),
                pool,
                metrics: LoggerMetrics::new(),
            }),
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Apply configuration changes.
    ///
    /// Concurrent `set_options` calls are serialized. Log calls never wait:
    /// each one reads a complete snapshot, either from before or after a
    /// given change.
    pub fn set_options(&self, opts: impl IntoIterator<Item = LoggerOption>) {
        let _guard = self.shared.config_lock.lock();
        let mut next = Options::clone(&self.shared.options.load());
        next.apply(opts);
        self.shared.options.store(Arc::new(next));
    }

    /// Current configuration snapshot
    pub fn options(&self) -> Arc<Options> {
        self.shared.options.load_full()
    }

    pub fn level(&self) -> LogLevel {
        self.shared.options.load().level
    }

    /// Whether a leveled call at `level` would be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.shared.options.load().level
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn pool(&self) -> &EntryPool {
        &self.shared.pool
    }

    pub fn flush(&self) -> Result<()> {
        self.shared.options.load().output.flush()
    }

    /// A [`Write`] view of this logger. Every write becomes one record at the
    /// configured std level.
    pub fn writer(&self) -> LogWriter {
        LogWriter {
            logger: self.clone(),
        }
    }

    #[track_caller]
    pub fn debug<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(LogLevel::Debug, "", args, CallSite::caller());
    }

    #[track_caller]
    pub fn debugf<I>(&self, format: &str, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(LogLevel::Debug, format, args, CallSite::caller());
    }

    #[track_caller]
    pub fn info<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(LogLevel::Info, "", args, CallSite::caller());
    }

    #[track_caller]
    pub fn infof<I>(&self, format: &str, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(LogLevel::Info, format, args, CallSite::caller());
    }

    #[track_caller]
    pub fn warn<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(LogLevel::Warning, "", args, CallSite::caller());
    }

    #[track_caller]
    pub fn warnf<I>(&self, format: &str, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(LogLevel::Warning, format, args, CallSite::caller());
    }

    #[track_caller]
    pub fn error<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(LogLevel::Error, "", args, CallSite::caller());
    }

    #[track_caller]
    pub fn errorf<I>(&self, format: &str, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(LogLevel::Error, format, args, CallSite::caller());
    }

    /// Log at `Panic`, then panic with the plain message as payload
    #[track_caller]
    pub fn panic<I>(&self, args: I) -> !
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.terminate(LogLevel::Panic, Escalation::Panic, "", args, CallSite::caller())
    }

    #[track_caller]
    pub fn panicf<I>(&self, format: &str, args: I) -> !
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.terminate(LogLevel::Panic, Escalation::Panic, format, args, CallSite::caller())
    }

    /// Log at `Fatal`, then exit the process with status 1
    #[track_caller]
    pub fn fatal<I>(&self, args: I) -> !
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.terminate(LogLevel::Fatal, Escalation::Exit(1), "", args, CallSite::caller())
    }

    #[track_caller]
    pub fn fatalf<I>(&self, format: &str, args: I) -> !
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.terminate(LogLevel::Fatal, Escalation::Exit(1), format, args, CallSite::caller())
    }

    /// Log at an arbitrary level. Terminal levels escalate.
    #[track_caller]
    pub fn log<I>(&self, level: LogLevel, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(level, "", args, CallSite::caller());
    }

    #[track_caller]
    pub fn logf<I>(&self, level: LogLevel, format: &str, args: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log_at(level, format, args, CallSite::caller());
    }

    /// Log with an explicit call site. This is what the logging macros expand
    /// to. Formatter and sink failures are absorbed; terminal levels escalate.
    pub fn log_at<I>(&self, level: LogLevel, format: &str, args: I, site: CallSite)
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        if let Some(escalation) = level.escalation() {
            self.terminate(level, escalation, format, args, site);
        }
        let result = self.dispatch(level, format, args, Some(site));
        self.absorb(result);
    }

    /// Run the pipeline and report failures to the caller.
    ///
    /// Returns `Ok(false)` when the level gate rejected the call. Unlike the
    /// other verbs this never panics or exits, even for terminal levels.
    #[track_caller]
    pub fn try_log<I>(&self, level: LogLevel, format: &str, args: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let result = self.dispatch(level, format, args, Some(CallSite::caller()));
        if result.is_err() {
            self.shared.metrics.record_dropped();
        }
        result
    }

    fn terminate<I>(
        &self,
        level: LogLevel,
        escalation: Escalation,
        format: &str,
        args: I,
        site: CallSite,
    ) -> !
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let args: Vec<FieldValue> = args.into_iter().map(Into::into).collect();
        let message = template::render_to_string(format, &args);

        let result = self.dispatch(level, format, args, Some(site));
        self.absorb(result);
        // the sink may hold the record in a buffer that exit would discard
        self.absorb(self.flush().map(|()| true));

        match escalation {
            Escalation::Panic => std::panic::panic_any(message),
            Escalation::Exit(code) => std::process::exit(code),
        }
    }

    fn dispatch<I>(
        &self,
        level: LogLevel,
        format: &str,
        args: I,
        site: Option<CallSite>,
    ) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let options = self.shared.options.load();
        if level < options.level {
            self.shared.metrics.record_filtered();
            return Ok(false);
        }

        self.emit(&options, level, format, args, site)?;
        Ok(true)
    }

    /// Steps 2-7 of the pipeline; the level gate has already passed.
    fn emit<I>(
        &self,
        options: &Options,
        level: LogLevel,
        format: &str,
        args: I,
        site: Option<CallSite>,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let mut entry = self.shared.pool.acquire();
        entry.fill(level, format, args);
        if !options.disable_caller {
            entry.caller = site.map(CallSite::resolved);
        }
        entry.time = Utc::now();

        options.formatter.format(&mut entry)?;
        options.output.write(&entry.buffer)?;

        self.shared.metrics.record_emitted();
        Ok(())
    }

    fn write_raw(&self, bytes: &[u8]) -> Result<()> {
        let options = self.shared.options.load();
        let message = String::from_utf8_lossy(bytes).into_owned();

        let result = self.emit(&options, options.std_level, "", [message], None);
        if result.is_err() {
            self.shared.metrics.record_dropped();
        }
        result
    }

    /// Count a failed record and report it on stderr: the first failure and
    /// every 1000th after that.
    fn absorb(&self, result: Result<bool>) {
        let Err(e) = result else {
            return;
        };

        let dropped_before = self.shared.metrics.record_dropped();
        if dropped_before == 0 || (dropped_before + 1) % 1000 == 0 {
            let _ = writeln!(
                io::stderr(),
                "[LOGGER ERROR] Failed to write log record ({} dropped so far): {}",
                dropped_before + 1,
                e
            );
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new([])
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("options", &self.options())
            .field("pool_available", &self.shared.pool.available())
            .finish()
    }
}

/// Byte-sink view of a [`Logger`], for components that only know how to
/// write to an [`io::Write`].
///
/// Records are written at the logger's std level and bypass the level gate.
/// Each `write` call becomes one record; no caller is attached.
#[derive(Debug, Clone)]
pub struct LogWriter {
    logger: Logger,
}

impl LogWriter {
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.logger.write_raw(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.logger.flush()?;
        Ok(())
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_pooled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .output(ConsoleSink::stdout())
///     .formatter(JsonFormatter::new())
///     .pool_capacity(16)
///     .build();
///
/// assert_eq!(logger.level(), LogLevel::Debug);
/// assert_eq!(logger.pool().max_entries(), 16);
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    options: Vec<LoggerOption>,
    pool_capacity: Option<usize>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: impl IntoIterator<Item = LoggerOption>) -> Self {
        self.options.extend(options);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output<S: LogSink + 'static>(self, output: S) -> Self {
        self.option(LoggerOption::Output(Arc::new(output)))
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(self, level: LogLevel) -> Self {
        self.option(LoggerOption::Level(level))
    }

    #[must_use = "builder methods return a new value"]
    pub fn std_level(self, level: LogLevel) -> Self {
        self.option(LoggerOption::StdLevel(level))
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(self, formatter: F) -> Self {
        self.option(LoggerOption::Formatter(Arc::new(formatter)))
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_caller(self, disable: bool) -> Self {
        self.option(LoggerOption::DisableCaller(disable))
    }

    /// Maximum number of idle entries kept for reuse
    #[must_use = "builder methods return a new value"]
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = Some(capacity);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let pool = match self.pool_capacity {
            Some(capacity) => EntryPool::new(capacity),
            None => EntryPool::default(),
        };
        Logger::from_parts(Options::init(self.options), pool)
    }
}
