//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// Destination an encoded entry is written to.
///
/// Appenders are driven synchronously by the logger, one entry at a time.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
