//! # Rust Log Bridge
//!
//! A structured-logging facade bridged onto a leveled core logger, with
//! errors that carry the call stack of the place they were raised.
//!
//! ## Features
//!
//! - **Facade bridge**: [`FacadeLogger`] and [`BridgeHandler`] translate a
//!   four-level facade with attributes and groups onto the core logger
//! - **Core logger**: fine-grained levels, console and JSON appenders,
//!   Cloud Logging field names
//! - **Traced errors**: [`TracedError`] captures a stack once; the logger
//!   renders it as a `stack` field, joined errors included
//! - **Explicit configuration**: [`LoggerConfig`], no global state

pub mod appenders;
pub mod core;
pub mod facade;
pub mod macros;
pub mod stack;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, JsonAppender};
    pub use crate::core::{
        parse_level, Appender, Event, FieldValue, Fields, LogContext, LogEntry, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result,
        TimestampFormat, TracingContext,
    };
    pub use crate::facade::{
        to_coarse, to_fine, Attr, AttrValue, BridgeHandler, FacadeLevel, FacadeLogger, Handler,
        Record,
    };
    pub use crate::stack::{marshal_stack, JoinedError, StackCapture, TracedError};
}

pub use crate::appenders::{ConsoleAppender, JsonAppender};
pub use crate::core::{
    parse_level, Appender, Event, FieldValue, Fields, LogContext, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result,
    TimestampFormat, TracingContext,
};
pub use crate::facade::{BridgeHandler, FacadeLevel, FacadeLogger, Handler};
pub use crate::stack::{JoinedError, TracedError};
