//! Declarative logger configuration
//!
//! [`LoggerConfig`] describes a logger in plain data so it can be read from a
//! JSON document or from environment variables and turned into
//! [`LoggerOption`]s.

use crate::core::{LogLevel, Logger, LoggerError, LoggerOption, Result};
use crate::formatters::{JsonFormatter, TextFormatter};
use crate::sinks::{ConsoleSink, FileSink};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Rendering strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where records go
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub std_level: LogLevel,
    pub format: OutputFormat,
    /// Only meaningful with the JSON format
    pub ignore_basic_fields: bool,
    pub disable_caller: bool,
    pub output: OutputTarget,
}

impl LoggerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read `LOGGER_LEVEL`, `LOGGER_STD_LEVEL`, `LOGGER_FORMAT`,
    /// `LOGGER_DISABLE_CALLER` and `LOGGER_OUTPUT`. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(level) = lookup("LOGGER_LEVEL") {
            config.level = level.parse()?;
        }
        if let Some(level) = lookup("LOGGER_STD_LEVEL") {
            config.std_level = level.parse()?;
        }
        if let Some(format) = lookup("LOGGER_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "text" | "" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                "json-bare" => {
                    config.ignore_basic_fields = true;
                    OutputFormat::Json
                }
                other => {
                    return Err(LoggerError::config(
                        "LOGGER_FORMAT",
                        format!("unknown format {:?}", other),
                    ))
                }
            };
        }
        if let Some(flag) = lookup("LOGGER_DISABLE_CALLER") {
            config.disable_caller = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(output) = lookup("LOGGER_OUTPUT") {
            config.output = match output.as_str() {
                "" | "stderr" => OutputTarget::Stderr,
                "stdout" => OutputTarget::Stdout,
                path => OutputTarget::File(PathBuf::from(path)),
            };
        }

        Ok(config)
    }

    /// Translate into options. Opening a file output can fail.
    pub fn into_options(self) -> Result<Vec<LoggerOption>> {
        let output: Arc<dyn crate::core::LogSink> = match self.output {
            OutputTarget::Stderr => Arc::new(ConsoleSink::stderr()),
            OutputTarget::Stdout => Arc::new(ConsoleSink::stdout()),
            OutputTarget::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(LoggerError::config("output", "empty file path"));
                }
                Arc::new(FileSink::new(path)?)
            }
        };
        let formatter: Arc<dyn crate::core::Formatter> = match self.format {
            OutputFormat::Text => Arc::new(TextFormatter),
            OutputFormat::Json => {
                Arc::new(JsonFormatter::new().with_ignore_basic_fields(self.ignore_basic_fields))
            }
        };

        Ok(vec![
            LoggerOption::Output(output),
            LoggerOption::Level(self.level),
            LoggerOption::StdLevel(self.std_level),
            LoggerOption::Formatter(formatter),
            LoggerOption::DisableCaller(self.disable_caller),
        ])
    }

    pub fn build(self) -> Result<Logger> {
        Ok(Logger::new(self.into_options()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.output, OutputTarget::Stderr);
        assert!(!config.disable_caller);
    }

    #[test]
    fn test_from_json() {
        let config = LoggerConfig::from_json(
            r#"{"level": "debug", "std_level": "", "format": "json",
                "ignore_basic_fields": true, "output": {"file": "/tmp/app.log"}}"#,
        )
        .unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.std_level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.ignore_basic_fields);
        assert_eq!(config.output, OutputTarget::File(PathBuf::from("/tmp/app.log")));
    }

    #[test]
    fn test_from_json_rejects_bad_level() {
        let err = LoggerConfig::from_json(r#"{"level": "verbose"}"#).unwrap_err();
        assert!(err.to_string().contains("unrecognized level"), "{}", err);
    }

    #[test]
    fn test_from_lookup() {
        let config = LoggerConfig::from_lookup(lookup(&[
            ("LOGGER_LEVEL", "WARN"),
            ("LOGGER_FORMAT", "json-bare"),
            ("LOGGER_DISABLE_CALLER", "true"),
            ("LOGGER_OUTPUT", "stdout"),
        ]))
        .unwrap();
        assert_eq!(config.level, LogLevel::Warning);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.ignore_basic_fields);
        assert!(config.disable_caller);
        assert_eq!(config.output, OutputTarget::Stdout);
    }

    #[test]
    fn test_from_lookup_errors() {
        let err = LoggerConfig::from_lookup(lookup(&[("LOGGER_LEVEL", "loud")])).unwrap_err();
        assert!(matches!(err, LoggerError::UnrecognizedLevel(_)));

        let err = LoggerConfig::from_lookup(lookup(&[("LOGGER_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_build_with_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configured.log");
        let config = LoggerConfig {
            format: OutputFormat::Json,
            output: OutputTarget::File(path.clone()),
            ..LoggerConfig::default()
        };

        let logger = config.build().unwrap();
        logger.info(["configured"]);
        logger.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(record["message"], "configured");
        assert_eq!(logger.options().output.name(), "file");
    }

    #[test]
    fn test_empty_file_path_rejected() {
        let config = LoggerConfig {
            output: OutputTarget::File(PathBuf::new()),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            config.into_options(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
