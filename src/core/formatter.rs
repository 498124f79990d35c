//! Formatter trait for rendering entries

use super::{error::Result, log_entry::Entry};

/// Renders one entry into its own buffer.
///
/// Implementations append to `entry.buffer` and may use `entry.fields` as
/// scratch space; both are cleared before the entry is reused.
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &mut Entry) -> Result<()>;

    fn name(&self) -> &str;
}

/// Terminate a record with a newline unless it already ends with one
pub(crate) fn terminate_line(buffer: &mut Vec<u8>) {
    if buffer.last() != Some(&b'\n') {
        buffer.push(b'\n');
    }
}
