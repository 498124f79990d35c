//! File sink implementation

use crate::core::{LogSink, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file through a buffered writer.
///
/// Buffered data is flushed on [`LogSink::flush`] and when the sink is dropped.
pub struct FileSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        self.writer.lock().write_all(bytes)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_appends() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("app.log");

        {
            let sink = FileSink::new(&path)?;
            sink.write(b"first\n")?;
            sink.flush()?;
        }
        {
            let sink = FileSink::new(&path)?;
            sink.write(b"second\n")?;
        }

        let content = fs::read_to_string(&path)?;
        assert_eq!(content, "first\nsecond\n");
        Ok(())
    }

    #[test]
    fn test_open_failure_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");
        let err = FileSink::new(&path).err().unwrap();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("app.log"));
    }
}
