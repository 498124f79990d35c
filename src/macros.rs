//! Logging macros
//!
//! The macros mirror the [`Logger`](crate::Logger) verbs but record the
//! enclosing function at compile time, so no stack walk is needed to name it.
//! Arguments are anything convertible into a [`FieldValue`](crate::FieldValue).
//!
//! Plain forms concatenate their arguments; `f` forms take a runtime template
//! first (`{}` takes the next argument, `{N}` the N-th).
//!
//! # Examples
//!
//! ```
//! use rust_pooled_logger::prelude::*;
//! use rust_pooled_logger::{info, infof};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new([with_output(sink.clone())]);
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! infof!(logger, "Server listening on port {}", port);
//!
//! let user_id = 42;
//! infof!(logger, "User {} performed action: {}", user_id, "login");
//!
//! assert_eq!(sink.lines()[2], "User 42 performed action: login");
//! ```

/// Log the concatenated arguments at a given level.
///
/// # Examples
///
/// ```
/// # use rust_pooled_logger::prelude::*;
/// # let logger = Logger::new([with_output(MemorySink::new())]);
/// use rust_pooled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: ", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_at(
            $level,
            "",
            {
                let args: ::std::vec::Vec<$crate::FieldValue> =
                    ::std::vec![$($crate::FieldValue::from($arg)),*];
                args
            },
            $crate::__call_site!(),
        )
    };
}

/// Log a runtime template at a given level.
///
/// ```
/// # use rust_pooled_logger::prelude::*;
/// # let logger = Logger::new([with_output(MemorySink::new())]);
/// use rust_pooled_logger::logf;
/// logf!(logger, LogLevel::Warning, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_at(
            $level,
            $format,
            {
                let args: ::std::vec::Vec<$crate::FieldValue> =
                    ::std::vec![$($crate::FieldValue::from($arg)),*];
                args
            },
            $crate::__call_site!(),
        )
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug $(, $arg)*)
    };
}

#[macro_export]
macro_rules! debugf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::logf!($logger, $crate::LogLevel::Debug, $format $(, $arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info $(, $arg)*)
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::logf!($logger, $crate::LogLevel::Info, $format $(, $arg)*)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_pooled_logger::prelude::*;
/// # let logger = Logger::new([with_output(MemorySink::new())]);
/// use rust_pooled_logger::warn;
/// warn!(logger, "Low disk space");
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warning $(, $arg)*)
    };
}

#[macro_export]
macro_rules! warnf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::logf!($logger, $crate::LogLevel::Warning, $format $(, $arg)*)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_pooled_logger::prelude::*;
/// # let logger = Logger::new([with_output(MemorySink::new())]);
/// use rust_pooled_logger::errorf;
/// errorf!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error $(, $arg)*)
    };
}

#[macro_export]
macro_rules! errorf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::logf!($logger, $crate::LogLevel::Error, $format $(, $arg)*)
    };
}

/// Log at `Panic`, then panic with the rendered message.
#[macro_export]
macro_rules! log_panic {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Panic $(, $arg)*)
    };
}

#[macro_export]
macro_rules! log_panicf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::logf!($logger, $crate::LogLevel::Panic, $format $(, $arg)*)
    };
}

/// Log at `Fatal`, then exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Fatal $(, $arg)*)
    };
}

#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::logf!($logger, $crate::LogLevel::Fatal, $format $(, $arg)*)
    };
}
