//! Facade handler backed by the core logger
//!
//! A [`BridgeHandler`] is one node in a tree of derived handlers. Deriving
//! with [`Handler::with_attrs`] or [`Handler::with_group`] builds a new node
//! that shares the core logger and the parent's fields; the parent is never
//! modified, so handlers can be derived from any thread without locking.

use super::attr::{merge_attrs, nest_under, Attr};
use super::level::{to_coarse, to_fine, FacadeLevel};
use super::record::Record;
use crate::core::log_context::Fields;
use crate::core::{Logger, Result, TracingContext};
use std::borrow::Cow;
use std::sync::Arc;

/// The structured-logging handler contract of the facade
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be handled. Allocation free.
    fn enabled(&self, level: FacadeLevel) -> bool;

    /// Write one record. Sink failures are never returned.
    fn handle(&self, ctx: Option<&TracingContext>, record: &Record) -> Result<()>;

    /// Derive a handler carrying `attrs` as well.
    ///
    /// Returns the receiver itself when there is nothing to add.
    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// Derive a handler that namespaces later attributes under `name`.
    ///
    /// Returns the receiver itself when `name` is empty.
    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler>;
}

/// [`Handler`] forwarding records to a shared core [`Logger`]
#[derive(Clone)]
pub struct BridgeHandler {
    core: Arc<Logger>,
    level: FacadeLevel,
    no_timestamp: bool,
    groups: Vec<String>,
    attributes: Arc<Fields>,
}

impl BridgeHandler {
    /// Root handler whose threshold follows the core's configured level
    pub fn new(core: Arc<Logger>, no_timestamp: bool) -> Self {
        let level = to_coarse(core.level());
        Self {
            core,
            level,
            no_timestamp,
            groups: Vec::new(),
            attributes: Arc::new(Fields::new()),
        }
    }

    /// Override the enabled threshold
    #[must_use]
    pub fn with_level(mut self, level: FacadeLevel) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> FacadeLevel {
        self.level
    }

    pub fn core(&self) -> &Arc<Logger> {
        &self.core
    }

    /// Open groups, outermost first
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Accumulated attributes, groups nested as maps
    pub fn attributes(&self) -> &Fields {
        &self.attributes
    }

    fn record_fields<'a>(&'a self, record: &Record) -> Cow<'a, Fields> {
        if record.attrs.is_empty() {
            Cow::Borrowed(self.attributes.as_ref())
        } else {
            let attrs = nest_under(&self.groups, &record.attrs);
            Cow::Owned(merge_attrs(&self.attributes, &attrs))
        }
    }
}

impl Handler for BridgeHandler {
    #[inline]
    fn enabled(&self, level: FacadeLevel) -> bool {
        level.is_enabled_at(self.level)
    }

    fn handle(&self, ctx: Option<&TracingContext>, record: &Record) -> Result<()> {
        let mut event = self
            .core
            .with_level(to_fine(record.level))
            .caller(record.location);
        if !event.enabled() {
            return Ok(());
        }

        if let Some(ctx) = ctx {
            event = event.ctx(ctx);
        }
        event = event.fields(&self.record_fields(record));
        if !self.no_timestamp {
            event = event.time(record.time);
        }
        event.msg(&record.message);

        Ok(())
    }

    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
        if attrs.is_empty() {
            return self;
        }

        let nested = nest_under(&self.groups, attrs);
        let attributes = merge_attrs(&self.attributes, &nested);
        if attributes.is_empty() || attributes == *self.attributes {
            return self;
        }

        Arc::new(BridgeHandler {
            core: Arc::clone(&self.core),
            level: self.level,
            no_timestamp: self.no_timestamp,
            groups: self.groups.clone(),
            attributes: Arc::new(attributes),
        })
    }

    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
        if name.is_empty() {
            return self;
        }

        let mut groups = self.groups.clone();
        groups.push(name.to_string());

        Arc::new(BridgeHandler {
            core: Arc::clone(&self.core),
            level: self.level,
            no_timestamp: self.no_timestamp,
            groups,
            attributes: Arc::clone(&self.attributes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::JsonAppender;
    use crate::core::{Appender, LogEntry, LogLevel, LoggerError};
    use crate::test_support::SharedBuffer;
    use chrono::{DateTime, Utc};

    fn root(level: LogLevel, no_timestamp: bool) -> (Arc<dyn Handler>, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let core = Logger::builder()
            .min_level(level)
            .timestamp(false)
            .appender(JsonAppender::new(buffer.clone()))
            .build();
        let handler = BridgeHandler::new(Arc::new(core), no_timestamp);
        (Arc::new(handler), buffer)
    }

    fn same(a: &Arc<dyn Handler>, b: &Arc<dyn Handler>) -> bool {
        std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
    }

    fn last_json(buffer: &SharedBuffer) -> serde_json::Value {
        let lines = buffer.lines();
        let line = lines.last().expect("a line was written");
        serde_json::from_str(line).expect("valid JSON line")
    }

    #[test]
    fn test_threshold_follows_core_level() {
        let (handler, _) = root(LogLevel::Warn, false);

        assert!(handler.enabled(FacadeLevel::Warn));
        assert!(handler.enabled(FacadeLevel::Error));
        assert!(!handler.enabled(FacadeLevel::Info));
    }

    #[test]
    fn test_disabled_core_disables_handler() {
        let (handler, _) = root(LogLevel::Disabled, false);

        assert!(!handler.enabled(FacadeLevel::Error));
        assert!(!handler.enabled(FacadeLevel::Disabled));
    }

    #[test]
    fn test_identity_fast_path() {
        let (handler, _) = root(LogLevel::Info, false);

        let same_attrs = Arc::clone(&handler).with_attrs(&[]);
        let same_group = Arc::clone(&handler).with_group("");
        let empty_group = Arc::clone(&handler).with_attrs(&[Attr::group("g", Vec::new())]);
        let derived = Arc::clone(&handler).with_attrs(&[Attr::new("k", "v")]);

        assert!(same(&handler, &same_attrs));
        assert!(same(&handler, &same_group));
        assert!(same(&handler, &empty_group));
        assert!(!same(&handler, &derived));
    }

    #[test]
    fn test_child_at_threshold_is_written() {
        let (handler, buffer) = root(LogLevel::Info, false);
        let child = Arc::clone(&handler).with_attrs(&[Attr::new("k", "v")]);

        assert!(child.enabled(FacadeLevel::Info));
        assert!(!child.enabled(FacadeLevel::Debug));

        child
            .handle(None, &Record::new(FacadeLevel::Info, "boundary"))
            .expect("handle never fails");

        let json = last_json(&buffer);
        assert_eq!(json["message"], "boundary");
        assert_eq!(json["severity"], "info");
        assert_eq!(json["k"], "v");
    }

    #[test]
    fn test_parent_is_not_modified() {
        let (handler, buffer) = root(LogLevel::Info, false);
        let _child = Arc::clone(&handler).with_attrs(&[Attr::new("k", "v")]);

        handler
            .handle(None, &Record::new(FacadeLevel::Info, "parent"))
            .expect("handle never fails");

        assert!(last_json(&buffer).get("k").is_none());
    }

    #[test]
    fn test_group_nests_following_attrs() {
        let (handler, buffer) = root(LogLevel::Debug, false);
        let derived = handler
            .with_attrs(&[Attr::new("service", "api")])
            .with_group("request")
            .with_attrs(&[Attr::new("method", "GET")])
            .with_attrs(&[Attr::new("path", "/")]);

        let record = Record::new(FacadeLevel::Debug, "grouped").with_attrs([Attr::new("status", 200)]);
        derived.handle(None, &record).expect("handle never fails");

        let json = last_json(&buffer);
        assert_eq!(json["service"], "api");
        assert_eq!(json["request"]["method"], "GET");
        assert_eq!(json["request"]["path"], "/");
        assert_eq!(json["request"]["status"], 200);
        assert_eq!(json["severity"], "debug");
    }

    #[test]
    fn test_levels_forwarded_through_reverse_map() {
        let (handler, buffer) = root(LogLevel::Trace, false);

        for (level, expected) in [
            (FacadeLevel::Debug, "debug"),
            (FacadeLevel::Info, "info"),
            (FacadeLevel::Warn, "warning"),
            (FacadeLevel::Error, "error"),
        ] {
            handler
                .handle(None, &Record::new(level, "lvl"))
                .expect("handle never fails");
            assert_eq!(last_json(&buffer)["severity"], expected);
        }
    }

    #[test]
    fn test_timestamp_owned_by_handler() {
        let time: DateTime<Utc> = DateTime::parse_from_rfc3339("2025-01-08T10:30:45.5Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);

        let (handler, buffer) = root(LogLevel::Info, false);
        let child = handler.with_attrs(&[Attr::new("timestamp", "user")]);
        child
            .handle(None, &Record::new(FacadeLevel::Info, "t").with_time(time))
            .expect("handle never fails");
        assert_eq!(last_json(&buffer)["timestamp"], "2025-01-08T10:30:45.500000000Z");

        let (handler, buffer) = root(LogLevel::Info, true);
        handler
            .handle(None, &Record::new(FacadeLevel::Info, "t"))
            .expect("handle never fails");
        assert!(last_json(&buffer).get("timestamp").is_none());
    }

    #[test]
    fn test_caller_and_context() {
        let (handler, buffer) = root(LogLevel::Info, false);
        let ctx = TracingContext::new("trace-9", "span-3");

        let record = Record::new(FacadeLevel::Warn, "from here");
        let line = line!() - 1;
        handler.handle(Some(&ctx), &record).expect("handle never fails");

        let json = last_json(&buffer);
        assert_eq!(json["caller"], format!("{}:{}", file!(), line));
        assert_eq!(json["trace_id"], "trace-9");
        assert_eq!(json["span_id"], "span-3");
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::writer("sink down"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let core = Arc::new(Logger::builder().appender(Failing).build());
        let handler = BridgeHandler::new(Arc::clone(&core), true);

        let result = handler.handle(None, &Record::new(FacadeLevel::Error, "lost"));

        assert!(result.is_ok());
        assert_eq!(core.dropped_count(), 1);
    }

    #[test]
    fn test_concurrent_derivation() {
        let (handler, buffer) = root(LogLevel::Info, true);

        let threads: Vec<_> = (0..8)
            .map(|i| {
                let parent = Arc::clone(&handler);
                std::thread::spawn(move || {
                    let child = parent.with_group("worker").with_attrs(&[Attr::new("id", i)]);
                    child
                        .handle(None, &Record::new(FacadeLevel::Info, "tick"))
                        .expect("handle never fails");
                })
            })
            .collect();
        for t in threads {
            t.join().expect("worker thread");
        }

        let mut ids: Vec<i64> = buffer
            .lines()
            .iter()
            .map(|line| {
                let json: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
                json["worker"]["id"].as_i64().expect("numeric id")
            })
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..8).collect::<Vec<_>>());
    }
}
