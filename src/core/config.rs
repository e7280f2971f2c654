//! Logger configuration
//!
//! [`LoggerConfig`] collects the options used to build a core [`Logger`] or
//! a facade [`BridgeHandler`]. Environment variables are read only when
//! [`LoggerConfig::from_env`] is called.

use super::appender::Appender;
use super::log_level::{parse_level, LogLevel};
use super::logger::{Logger, LoggerBuilder};
use super::output_format::OutputFormat;
use crate::appenders::{ConsoleAppender, JsonAppender};
use crate::facade::BridgeHandler;
use std::sync::Arc;

/// Variable holding an explicit level name
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
/// Variable naming the deployment tier (`dev`, `tst`, `prd`)
pub const COMMON_ENV: &str = "COMMON_ENV";

/// Level used in production when `LOG_LEVEL` is unset
const PRODUCTION_LEVEL: &str = "warning";

/// Options for building loggers and handlers
///
/// # Example
///
/// ```
/// use rust_log_bridge::core::{LoggerConfig, LogLevel, OutputFormat};
///
/// let config = LoggerConfig::default()
///     .with_level(LogLevel::Debug)
///     .with_format(OutputFormat::Json)
///     .without_timestamp();
///
/// let logger = config.build_logger();
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub no_timestamp: bool,
    /// Console output only
    pub no_color: bool,
    /// Console output only
    pub fields_exclude: Vec<String>,
    pub format: OutputFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            no_timestamp: false,
            no_color: false,
            fields_exclude: Vec::new(),
            format: OutputFormat::Json,
        }
    }
}

impl LoggerConfig {
    /// Configuration with the level taken from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration with the level resolved through `lookup`
    ///
    /// `LOG_LEVEL` wins when non-empty. Otherwise `COMMON_ENV=prd` selects
    /// `warning`; any other tier has no default. Unrecognized or missing
    /// names resolve to `Trace`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: resolve_level(lookup),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.no_timestamp = true;
        self
    }

    #[must_use]
    pub fn without_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    #[must_use]
    pub fn exclude_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields_exclude = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Core logger: JSON on stderr by default, or console text on stdout
    /// with [`OutputFormat::Text`]
    pub fn build_logger(&self) -> Logger {
        self.builder(!self.no_timestamp).build()
    }

    /// Facade handler over a fresh core logger.
    ///
    /// The handler owns the timestamp, so the core does not stamp entries.
    pub fn build_handler(&self) -> BridgeHandler {
        let core = self.builder(false).build();
        BridgeHandler::new(Arc::new(core), self.no_timestamp)
    }

    fn builder(&self, timestamp: bool) -> LoggerBuilder {
        Logger::builder()
            .min_level(self.level)
            .timestamp(timestamp)
            .boxed_appender(self.appender())
    }

    fn appender(&self) -> Box<dyn Appender> {
        match self.format {
            OutputFormat::Json => Box::new(JsonAppender::stderr()),
            OutputFormat::Text => {
                let console = ConsoleAppender::new()
                    .with_colors(!self.no_color)
                    .exclude_fields(self.fields_exclude.iter().cloned());
                if self.no_timestamp {
                    Box::new(console.without_timestamp())
                } else {
                    Box::new(console)
                }
            }
        }
    }
}

/// Resolve the configured level name; see [`LoggerConfig::from_lookup`]
pub fn resolve_level<F>(lookup: F) -> LogLevel
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = lookup(LOG_LEVEL_ENV).filter(|level| !level.is_empty());
    let name = explicit.or_else(|| {
        lookup(COMMON_ENV)
            .filter(|tier| tier.eq_ignore_ascii_case("prd"))
            .map(|_| PRODUCTION_LEVEL.to_string())
    });

    parse_level(name.as_deref().unwrap_or_default())
}
