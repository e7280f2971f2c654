//! Logging macros for the core logger and for traced errors.
//!
//! The level macros format like `format!` and record the call site as the
//! entry's caller.
//!
//! # Examples
//!
//! ```
//! use rust_log_bridge::prelude::*;
//! use rust_log_bridge::{info, traced_error};
//!
//! let logger = Logger::new();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let err = traced_error!("bind to port {} failed", port);
//! assert_eq!(err.to_string(), "stacktraced: bind to port 8080 failed");
//! ```

/// Log a formatted message at the given level.
///
/// # Examples
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_bridge::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let event = $logger.with_level($level);
        if event.enabled() {
            event
                .location(file!(), line!(), module_path!())
                .msg(format!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # let mut logger = Logger::new();
/// # logger.set_min_level(LogLevel::Trace);
/// use rust_log_bridge::trace;
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_bridge::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message. The process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Build a [`TracedError`](crate::stack::TracedError) from a format string.
///
/// The captured stack starts at the code using the macro.
///
/// ```
/// use rust_log_bridge::traced_error;
///
/// let err = traced_error!("user {} not found", 42);
/// assert!(!err.stack().is_empty());
/// ```
#[macro_export]
macro_rules! traced_error {
    ($($arg:tt)+) => {
        $crate::stack::TracedError::msg(format!($($arg)+))
    };
}
