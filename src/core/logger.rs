//! Core leveled logger
//!
//! The logger owns a minimum level and a list of appenders. Entries are built
//! with an [`Event`] and written synchronously; appender failures are counted
//! and reported on stderr, never returned to the code that logged.

use super::{
    appender::Appender,
    error::Result,
    event::Event,
    log_context::{FieldValue, LogContext},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::error::Error;

/// Renders the stack field for an error passed to [`Event::err`].
///
/// Returning `None` means the entry gets no stack field at all.
pub type StackMarshalerFn = fn(&(dyn Error + 'static)) -> Option<FieldValue>;

pub struct Logger {
    min_level: RwLock<LogLevel>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    metrics: LoggerMetrics,
    /// Stamp entries that carry no explicit time
    timestamp: bool,
    stack_marshaler: StackMarshalerFn,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: RwLock::new(LogLevel::Info),
            appenders: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
            timestamp: true,
            stack_marshaler: crate::stack::marshal_stack_field,
        }
    }

    /// Write one entry to every appender with per-appender panic isolation
    ///
    /// Returns true when at least one appender failed.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        entry: &LogEntry,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} ({}) failed: {}", idx, appender.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx, panic_msg
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }

        has_error
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Currently configured minimum level
    pub fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.is_enabled_at(*self.min_level.read())
    }

    pub fn timestamps_enabled(&self) -> bool {
        self.timestamp
    }

    pub fn stack_marshaler(&self) -> StackMarshalerFn {
        self.stack_marshaler
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Start an entry at `level`; the event is inert if the level is filtered
    #[inline]
    pub fn with_level(&self, level: LogLevel) -> Event<'_> {
        Event::new(self, level)
    }

    /// Dispatch a finished entry to the appenders
    pub(crate) fn write(&self, entry: LogEntry) {
        let mut appenders = self.appenders.write();
        Self::process_sync(&mut appenders, &entry, &self.metrics);
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }
        self.with_level(level).msg(message.into());
    }

    /// Log with structured context fields
    pub fn log_with_context(&self, level: LogLevel, message: impl Into<String>, context: LogContext) {
        if !self.is_enabled(level) {
            return;
        }
        self.with_level(level).fields(context.fields()).msg(message.into());
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Logs at `Panic` level. Does not unwind.
    #[inline]
    pub fn panic(&self, message: impl Into<String>) {
        self.log(LogLevel::Panic, message);
    }

    /// Logs at `Fatal` level. Does not exit the process.
    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Get the number of entries an appender failed to write
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_bridge::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(ConsoleAppender::new())
///     .timestamp(false)
///     .build();
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    timestamp: bool,
    stack_marshaler: StackMarshalerFn,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            timestamp: true,
            stack_marshaler: crate::stack::marshal_stack_field,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add an appender; entries go to every appender in insertion order
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Stamp entries with the current time when they carry none (default: on)
    #[must_use = "builder methods return a new value"]
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = enabled;
        self
    }

    /// Replace the function rendering the stack field of logged errors
    #[must_use = "builder methods return a new value"]
    pub fn stack_marshaler(mut self, marshaler: StackMarshalerFn) -> Self {
        self.stack_marshaler = marshaler;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut logger = Logger::new();
        logger.timestamp = self.timestamp;
        logger.stack_marshaler = self.stack_marshaler;
        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
