//! JSON appender for structured logging

use crate::core::output_format::to_json_value;
use crate::core::{Appender, LogEntry, LoggerError, Result, TimestampFormat};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON appender for structured logging
///
/// Writes each log entry as a single-line JSON object (JSONL format) using
/// Cloud Logging field names (`severity`, `timestamp`, `message`).
pub struct JsonAppender {
    writer: Box<dyn Write + Send + Sync>,
    timestamp_format: TimestampFormat,
    pretty: bool,
}

impl JsonAppender {
    /// Create a JSON appender over any writer
    pub fn new<W: Write + Send + Sync + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
            timestamp_format: TimestampFormat::default(),
            pretty: false,
        }
    }

    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Append to the file at `path`, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self::new(BufWriter::new(file)))
    }

    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Appender for JsonAppender {
    fn name(&self) -> &str {
        "json"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let value = to_json_value(entry, &self.timestamp_format);

        let json = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };

        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
