//! Severity scale of the facade and its mapping onto the core scale

use crate::core::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four-level facade scale plus a `Disabled` marker.
///
/// `Disabled` sorts above `Error`, so a handler whose threshold is disabled
/// rejects every real level; a `Disabled` record is never enabled either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum FacadeLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Disabled,
}

impl FacadeLevel {
    /// Whether a record at this level passes a `threshold`
    #[inline]
    pub fn is_enabled_at(self, threshold: FacadeLevel) -> bool {
        self != FacadeLevel::Disabled && threshold != FacadeLevel::Disabled && self >= threshold
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FacadeLevel::Debug => "DEBUG",
            FacadeLevel::Info => "INFO",
            FacadeLevel::Warn => "WARN",
            FacadeLevel::Error => "ERROR",
            FacadeLevel::Disabled => "DISABLED",
        }
    }
}

impl fmt::Display for FacadeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse a core level onto the facade scale.
///
/// Order preserving: a higher core level never maps lower.
pub fn to_coarse(level: LogLevel) -> FacadeLevel {
    match level {
        LogLevel::Fatal | LogLevel::Panic | LogLevel::Error => FacadeLevel::Error,
        LogLevel::Warn => FacadeLevel::Warn,
        LogLevel::Info => FacadeLevel::Info,
        LogLevel::Debug | LogLevel::Trace | LogLevel::NoLevel => FacadeLevel::Debug,
        LogLevel::Disabled => FacadeLevel::Disabled,
    }
}

/// Map a facade level to the core level records are written at.
///
/// Lossy on purpose: nothing maps back to `Trace`, `Panic` or `Fatal`.
pub fn to_fine(level: FacadeLevel) -> LogLevel {
    match level {
        FacadeLevel::Error => LogLevel::Error,
        FacadeLevel::Warn => LogLevel::Warn,
        FacadeLevel::Info => LogLevel::Info,
        FacadeLevel::Debug => LogLevel::Debug,
        FacadeLevel::Disabled => LogLevel::Disabled,
    }
}

impl From<LogLevel> for FacadeLevel {
    fn from(level: LogLevel) -> Self {
        to_coarse(level)
    }
}

impl From<FacadeLevel> for LogLevel {
    fn from(level: FacadeLevel) -> Self {
        to_fine(level)
    }
}
