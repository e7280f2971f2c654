//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod event;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod timestamp;
pub mod tracing_context;

pub use appender::Appender;
pub use config::{resolve_level, LoggerConfig, COMMON_ENV, LOG_LEVEL_ENV};
pub use error::{LoggerError, Result};
pub use event::Event;
pub use log_context::{FieldValue, Fields, LogContext};
pub use log_entry::{Caller, LogEntry};
pub use log_level::{parse_level, LogLevel};
pub use logger::{Logger, LoggerBuilder, StackMarshalerFn};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use timestamp::TimestampFormat;
pub use tracing_context::TracingContext;
