//! Front-end for writing through a facade [`Handler`]

use super::attr::Attr;
use super::handler::{BridgeHandler, Handler};
use super::level::FacadeLevel;
use super::record::Record;
use crate::core::{Logger, TracingContext};
use std::sync::Arc;

/// Cheap-to-clone logger writing through a [`Handler`].
///
/// Every logging method is `#[track_caller]`: the reported caller is the
/// line that called `info`, `log` and so on.
///
/// # Example
///
/// ```
/// use rust_log_bridge::facade::{Attr, FacadeLogger};
/// use rust_log_bridge::Logger;
/// use std::sync::Arc;
///
/// let logger = FacadeLogger::bridge(Arc::new(Logger::new()), false);
/// let requests = logger.with(&[Attr::new("component", "http")]).with_group("request");
///
/// requests.info("served", &[Attr::new("status", 200)]);
/// ```
#[derive(Clone)]
pub struct FacadeLogger {
    handler: Arc<dyn Handler>,
}

impl FacadeLogger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    /// Logger over a [`BridgeHandler`] for `core`
    pub fn bridge(core: Arc<Logger>, no_timestamp: bool) -> Self {
        Self::new(Arc::new(BridgeHandler::new(core, no_timestamp)))
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Logger whose records also carry `attrs`
    #[must_use]
    pub fn with(&self, attrs: &[Attr]) -> Self {
        Self::new(Arc::clone(&self.handler).with_attrs(attrs))
    }

    /// Logger whose later attributes are nested under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self::new(Arc::clone(&self.handler).with_group(name))
    }

    #[inline]
    pub fn enabled(&self, level: FacadeLevel) -> bool {
        self.handler.enabled(level)
    }

    #[track_caller]
    pub fn log(&self, level: FacadeLevel, message: &str, attrs: &[Attr]) {
        self.log_ctx(None, level, message, attrs);
    }

    /// Log with the ambient tracing context of the current request
    #[track_caller]
    pub fn log_ctx(
        &self,
        ctx: Option<&TracingContext>,
        level: FacadeLevel,
        message: &str,
        attrs: &[Attr],
    ) {
        if !self.enabled(level) {
            return;
        }
        let record = Record::new(level, message).with_attrs(attrs.iter().cloned());
        if let Err(e) = self.handler.handle(ctx, &record) {
            eprintln!("[LOGGER ERROR] Handler failed: {}", e);
        }
    }

    #[track_caller]
    pub fn debug(&self, message: &str, attrs: &[Attr]) {
        self.log(FacadeLevel::Debug, message, attrs);
    }

    #[track_caller]
    pub fn info(&self, message: &str, attrs: &[Attr]) {
        self.log(FacadeLevel::Info, message, attrs);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, attrs: &[Attr]) {
        self.log(FacadeLevel::Warn, message, attrs);
    }

    #[track_caller]
    pub fn error(&self, message: &str, attrs: &[Attr]) {
        self.log(FacadeLevel::Error, message, attrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::JsonAppender;
    use crate::core::LogLevel;
    use crate::test_support::SharedBuffer;

    fn facade(level: LogLevel) -> (FacadeLogger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let core = Logger::builder()
            .min_level(level)
            .timestamp(false)
            .appender(JsonAppender::new(buffer.clone()))
            .build();
        (FacadeLogger::bridge(Arc::new(core), true), buffer)
    }

    #[test]
    fn test_reports_call_site() {
        let (logger, buffer) = facade(LogLevel::Info);

        logger.info("called", &[]);
        let line = line!() - 1;

        let json: serde_json::Value =
            serde_json::from_str(&buffer.lines()[0]).expect("valid JSON line");
        assert_eq!(json["caller"], format!("{}:{}", file!(), line));
    }

    #[test]
    fn test_filtered_levels_write_nothing() {
        let (logger, buffer) = facade(LogLevel::Warn);

        logger.debug("no", &[]);
        logger.info("no", &[]);
        logger.warn("yes", &[]);
        logger.error("yes", &[Attr::new("code", 7)]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.contains("\"yes\"")));
    }

    #[test]
    fn test_noop_derivations_share_handler() {
        let (logger, _) = facade(LogLevel::Info);

        let same = logger.with(&[]).with_group("");
        assert!(std::ptr::eq(
            Arc::as_ptr(logger.handler()) as *const (),
            Arc::as_ptr(same.handler()) as *const ()
        ));
    }

    #[test]
    fn test_group_and_call_attrs() {
        let (logger, buffer) = facade(LogLevel::Debug);

        logger
            .with(&[Attr::new("app", "demo")])
            .with_group("db")
            .log_ctx(
                Some(&TracingContext::new("t", "s")),
                FacadeLevel::Debug,
                "query",
                &[Attr::new("rows", 3)],
            );

        let json: serde_json::Value =
            serde_json::from_str(&buffer.lines()[0]).expect("valid JSON line");
        assert_eq!(json["app"], "demo");
        assert_eq!(json["db"]["rows"], 3);
        assert_eq!(json["trace_id"], "t");
    }
}
