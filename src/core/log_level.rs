//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Action taken after a terminal record has been emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Unwind with the plain message as the panic payload
    Panic,
    /// Exit the process with the given status
    Exit(i32),
}

/// Severity of a log call.
///
/// Ordering is total: `Debug < Info < Warning < Error < Panic < Fatal`.
/// `Panic` and `Fatal` are terminal: the logger escalates after emitting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Voluminous diagnostics, usually disabled in production.
    Debug = 0,
    /// The default logging priority.
    #[default]
    Info = 1,
    /// More important than info, but no individual human review needed.
    Warning = 2,
    /// High priority. A healthy application should not produce these.
    Error = 3,
    /// Logs the message, then panics with it.
    Panic = 4,
    /// Logs the message, then exits the process with status 1.
    Fatal = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Panic,
        LogLevel::Fatal,
    ];

    /// Canonical upper-case name, as written into structured records
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Panic => "PANIC",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// What follows emission at this level, if anything
    #[inline]
    pub fn escalation(&self) -> Option<Escalation> {
        match self {
            LogLevel::Panic => Some(Escalation::Panic),
            LogLevel::Fatal => Some(Escalation::Exit(1)),
            _ => None,
        }
    }

    /// Whether emitting at this level is followed by a panic or process exit
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.escalation().is_some()
    }

    fn parse_exact(text: &str) -> Option<Self> {
        match text {
            "debug" | "DEBUG" => Some(LogLevel::Debug),
            // make the empty value useful
            "info" | "INFO" | "" => Some(LogLevel::Info),
            "warn" | "WARN" | "warning" | "WARNING" => Some(LogLevel::Warning),
            "error" | "ERROR" => Some(LogLevel::Error),
            "panic" | "PANIC" => Some(LogLevel::Panic),
            "fatal" | "FATAL" => Some(LogLevel::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_exact(s)
            .or_else(|| Self::parse_exact(&s.to_lowercase()))
            .ok_or_else(|| LoggerError::UnrecognizedLevel(s.to_string()))
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
