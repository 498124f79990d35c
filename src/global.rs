//! Process-wide default logger
//!
//! The default logger is created lazily with the default options: stderr
//! output, INFO level, text formatter. The free functions here forward to it
//! and report the caller's location, not this module's.

use crate::core::{FieldValue, LogLevel, LogWriter, Logger, LoggerOption};
use std::sync::OnceLock;

static STD: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger. Clones share its configuration.
pub fn std_logger() -> &'static Logger {
    STD.get_or_init(Logger::default)
}

/// Reconfigure the process-wide logger
pub fn set_options(opts: impl IntoIterator<Item = LoggerOption>) {
    std_logger().set_options(opts);
}

pub fn writer() -> LogWriter {
    std_logger().writer()
}

pub fn is_enabled(level: LogLevel) -> bool {
    std_logger().is_enabled(level)
}

macro_rules! forward {
    ($($(#[$meta:meta])* $plain:ident, $formatted:ident;)*) => {
        $(
            $(#[$meta])*
            #[track_caller]
            pub fn $plain<I>(args: I)
            where
                I: IntoIterator,
                I::Item: Into<FieldValue>,
            {
                std_logger().$plain(args)
            }

            #[track_caller]
            pub fn $formatted<I>(format: &str, args: I)
            where
                I: IntoIterator,
                I::Item: Into<FieldValue>,
            {
                std_logger().$formatted(format, args)
            }
        )*
    };
}

forward! {
    debug, debugf;
    info, infof;
    warn, warnf;
    error, errorf;
}

/// Log at `Panic` on the default logger, then panic with the message
#[track_caller]
pub fn panic<I>(args: I) -> !
where
    I: IntoIterator,
    I::Item: Into<FieldValue>,
{
    std_logger().panic(args)
}

#[track_caller]
pub fn panicf<I>(format: &str, args: I) -> !
where
    I: IntoIterator,
    I::Item: Into<FieldValue>,
{
    std_logger().panicf(format, args)
}

/// Log at `Fatal` on the default logger, then exit with status 1
#[track_caller]
pub fn fatal<I>(args: I) -> !
where
    I: IntoIterator,
    I::Item: Into<FieldValue>,
{
    std_logger().fatal(args)
}

#[track_caller]
pub fn fatalf<I>(format: &str, args: I) -> !
where
    I: IntoIterator,
    I::Item: Into<FieldValue>,
{
    std_logger().fatalf(format, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::{with_formatter, with_level, with_output};
    use crate::formatters::JsonFormatter;
    use crate::sinks::MemorySink;
    use std::io::Write;

    // The default logger is shared by every test in this binary, so all
    // assertions against it live in one test.
    #[test]
    fn test_default_logger() {
        assert!(std::ptr::eq(std_logger(), std_logger()));
        assert_eq!(std_logger().level(), LogLevel::Info);

        let sink = MemorySink::new();
        set_options([
            with_output(sink.clone()),
            with_level(LogLevel::Debug),
            with_formatter(JsonFormatter::new()),
        ]);
        assert!(is_enabled(LogLevel::Debug));

        let line = line!() + 1;
        infof("ready on port {}", [8080]);
        debug(["a", "b"]);
        writer().write_all(b"adapted").unwrap();

        let records: Vec<serde_json::Value> = sink
            .lines()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["message"], "ready on port 8080");
        assert_eq!(records[0]["file"], format!("{}:{}", file!(), line));
        assert_eq!(records[0]["func"], "rust_pooled_logger::global::tests::test_default_logger");
        assert_eq!(records[1]["level"], "DEBUG");
        assert_eq!(records[1]["message"], "ab");
        assert_eq!(records[1]["func"], records[0]["func"]);
        assert_eq!(records[2]["level"], "INFO");

        let result = std::panic::catch_unwind(|| {
            panicf("bad state: {}", ["x"]);
        });
        assert_eq!(
            result.unwrap_err().downcast_ref::<String>().unwrap(),
            "bad state: x"
        );
        assert_eq!(sink.lines().len(), 4);
    }
}
