//! Console appender implementation

use crate::core::output_format::render_text;
use crate::core::{Appender, LogEntry, LogLevel, Result, TimestampFormat};
use std::io::Write;

/// Human-readable appender, one line per entry.
///
/// Writes to stdout unless another writer is given.
pub struct ConsoleAppender {
    out: Box<dyn Write + Send + Sync>,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    exclude_timestamp: bool,
    fields_exclude: Vec<String>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Write to `out` instead of stdout
    pub fn with_writer<W: Write + Send + Sync + 'static>(out: W) -> Self {
        Self {
            out: Box::new(out),
            use_colors: true,
            timestamp_format: TimestampFormat::Rfc3339,
            exclude_timestamp: false,
            fields_exclude: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_log_bridge::appenders::ConsoleAppender;
    /// use rust_log_bridge::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Leave the timestamp out of each line even if the entry has one
    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.exclude_timestamp = true;
        self
    }

    /// Never print the named fields
    #[must_use]
    pub fn exclude_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields_exclude = fields.into_iter().map(Into::into).collect();
        self
    }

    fn format_text(&self, entry: &LogEntry) -> String {
        let timestamp = if self.exclude_timestamp {
            None
        } else {
            entry.timestamp.as_ref().map(|t| self.timestamp_format.format(t))
        };
        let level = self.level_label(entry.level);
        render_text(entry, timestamp.as_deref(), &level, &self.fields_exclude)
    }

    #[cfg(feature = "console")]
    fn level_label(&self, level: LogLevel) -> String {
        use colored::Colorize;
        if self.use_colors {
            level.abbrev().color(level.color_code()).to_string()
        } else {
            level.abbrev().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_label(&self, level: LogLevel) -> String {
        level.abbrev().to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.format_text(entry);
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
