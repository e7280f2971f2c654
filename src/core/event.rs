//! Fluent construction of a single log entry
//!
//! An [`Event`] is started with [`Logger::with_level`] (or one of the
//! level-named shortcuts), decorated with fields, and finished with
//! [`Event::msg`], which hands the entry to the appenders.

use super::log_context::{FieldValue, Fields};
use super::log_entry::{Caller, LogEntry};
use super::log_level::LogLevel;
use super::logger::Logger;
use super::output_format::STACK_FIELD;
use super::tracing_context::TracingContext;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::panic::Location;

/// Builder for one log entry
///
/// When the level is filtered out the event holds no entry and every method
/// is a no-op, so a disabled call site costs a level comparison.
///
/// # Example
///
/// ```
/// use rust_log_bridge::prelude::*;
///
/// let logger = Logger::new();
///
/// logger.info_event()
///     .field("user_id", 12345)
///     .field("latency_ms", 42.5)
///     .msg("Request processed");
/// ```
#[must_use = "an event does nothing until `msg` is called"]
pub struct Event<'a> {
    logger: &'a Logger,
    entry: Option<LogEntry>,
    stack: bool,
}

impl<'a> Event<'a> {
    pub(crate) fn new(logger: &'a Logger, level: LogLevel) -> Self {
        let entry = if logger.is_enabled(level) {
            Some(LogEntry::new(level, String::new()))
        } else {
            None
        };
        Self {
            logger,
            entry,
            stack: false,
        }
    }

    /// Whether this event will be written
    pub fn enabled(&self) -> bool {
        self.entry.is_some()
    }

    /// Attach the ambient request context
    pub fn ctx(mut self, ctx: &TracingContext) -> Self {
        if let Some(ref mut entry) = self.entry {
            entry.tracing = Some(ctx.clone());
        }
        self
    }

    /// Report `location` as the call site of this entry
    pub fn caller(mut self, location: &Location<'_>) -> Self {
        if let Some(ref mut entry) = self.entry {
            entry.caller = Some(Caller {
                file: location.file().to_string(),
                line: location.line(),
                module_path: None,
            });
        }
        self
    }

    /// Set source location information
    pub fn location(mut self, file: &str, line: u32, module_path: &str) -> Self {
        if let Some(entry) = self.entry.take() {
            self.entry = Some(entry.with_location(file, line, module_path));
        }
        self
    }

    /// Set an explicit timestamp; suppresses the logger's automatic one
    pub fn time(mut self, timestamp: DateTime<Utc>) -> Self {
        if let Some(ref mut entry) = self.entry {
            entry.timestamp = Some(timestamp);
        }
        self
    }

    /// Add a structured field to the entry
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        if let Some(ref mut entry) = self.entry {
            entry.fields.add_field(key, value);
        }
        self
    }

    /// Add every field of `fields`, nested groups included
    pub fn fields(mut self, fields: &Fields) -> Self {
        if let Some(ref mut entry) = self.entry {
            entry.fields.extend(fields);
        }
        self
    }

    /// Render the stack of the next error passed to [`Event::err`]
    pub fn stack(mut self) -> Self {
        self.stack = true;
        self
    }

    /// Attach an error. With [`Event::stack`] set, the logger's stack
    /// marshaler adds a `stack` field when the error carries one.
    pub fn err(mut self, err: &(dyn Error + 'static)) -> Self {
        if let Some(ref mut entry) = self.entry {
            entry.error = Some(err.to_string());
            if self.stack {
                if let Some(stack) = (self.logger.stack_marshaler())(err) {
                    entry.fields.add_field(STACK_FIELD, stack);
                }
            }
        }
        self
    }

    /// Set the message and write the entry
    pub fn msg(self, message: impl AsRef<str>) {
        let Some(mut entry) = self.entry else {
            return;
        };
        entry.set_message(message.as_ref());
        if entry.timestamp.is_none() && self.logger.timestamps_enabled() {
            entry.timestamp = Some(Utc::now());
        }
        self.logger.write(entry);
    }

    /// Write the entry without a message
    pub fn send(self) {
        self.msg("");
    }
}

impl Logger {
    pub fn trace_event(&self) -> Event<'_> {
        self.with_level(LogLevel::Trace)
    }

    pub fn debug_event(&self) -> Event<'_> {
        self.with_level(LogLevel::Debug)
    }

    pub fn info_event(&self) -> Event<'_> {
        self.with_level(LogLevel::Info)
    }

    pub fn warn_event(&self) -> Event<'_> {
        self.with_level(LogLevel::Warn)
    }

    /// Create an error-level event
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_bridge::{traced_error, Logger};
    ///
    /// let logger = Logger::new();
    /// let err = traced_error!("connection to {} refused", "db-1");
    /// logger.error_event()
    ///     .stack()
    ///     .err(&err)
    ///     .msg("Database connection failed");
    /// ```
    pub fn error_event(&self) -> Event<'_> {
        self.with_level(LogLevel::Error)
    }

    pub fn fatal_event(&self) -> Event<'_> {
        self.with_level(LogLevel::Fatal)
    }
}
