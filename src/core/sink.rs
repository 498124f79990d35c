//! Sink trait for log output destinations

use super::error::Result;
use std::sync::Arc;

/// A destination for rendered log bytes.
///
/// Sinks are shared by every thread logging through a logger and receive
/// `&self`; a sink that is not naturally safe for concurrent writes must
/// synchronize internally. The logger never serializes writes on a sink's
/// behalf.
pub trait LogSink: Send + Sync {
    /// Write one rendered record
    fn write(&self, bytes: &[u8]) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
