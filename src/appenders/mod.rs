//! Appender implementations

pub mod console;
pub mod json;

pub use console::ConsoleAppender;
pub use json::JsonAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
