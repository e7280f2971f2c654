//! Log level definitions for the core logger

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity scale of the core logger.
///
/// Real severities are ordered `Trace < Debug < ... < Fatal`. `NoLevel` marks
/// an entry written without a severity and `Disabled` turns a logger off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Panic = 5,
    Fatal = 6,
    NoLevel = 7,
    Disabled = 8,
}

impl LogLevel {
    /// Every level, most verbose first
    pub const ALL: [LogLevel; 9] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Panic,
        LogLevel::Fatal,
        LogLevel::NoLevel,
        LogLevel::Disabled,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Panic => "PANIC",
            LogLevel::Fatal => "FATAL",
            LogLevel::NoLevel => "",
            LogLevel::Disabled => "DISABLED",
        }
    }

    /// Three-letter form used by the console appender
    pub fn abbrev(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRC",
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Panic => "PNC",
            LogLevel::Fatal => "FTL",
            LogLevel::NoLevel => "???",
            LogLevel::Disabled => "OFF",
        }
    }

    /// Value written to the `severity` field of JSON output
    pub fn json_value(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warning",
            LogLevel::Error => "error",
            LogLevel::Panic => "panic",
            LogLevel::Fatal => "fatal",
            LogLevel::NoLevel => "",
            LogLevel::Disabled => "disabled",
        }
    }

    /// Whether an entry at this level passes a logger whose minimum is `min`.
    ///
    /// `NoLevel` entries bypass the threshold; nothing passes a disabled logger.
    #[inline]
    pub fn is_enabled_at(&self, min: LogLevel) -> bool {
        match (self, min) {
            (LogLevel::Disabled, _) | (_, LogLevel::Disabled) => false,
            (LogLevel::NoLevel, _) => true,
            (level, min) => *level >= min,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Panic | LogLevel::Fatal => BrightRed,
            LogLevel::NoLevel | LogLevel::Disabled => White,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fatal" | "ftl" => Ok(LogLevel::Fatal),
            "panic" | "pnc" => Ok(LogLevel::Panic),
            "error" | "err" => Ok(LogLevel::Error),
            "warning" | "wrn" => Ok(LogLevel::Warn),
            "info" | "inf" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" | "trc" => Ok(LogLevel::Trace),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Parse a level name, falling back to `Trace` for anything unrecognized.
///
/// Only the listed long names and three-letter abbreviations are accepted,
/// case-insensitively and without surrounding whitespace. Configuration
/// typos must not silence output, so this never fails.
pub fn parse_level(s: &str) -> LogLevel {
    s.parse().unwrap_or(LogLevel::Trace)
}
