//! Output encodings for log entries
//!
//! - Text: human-readable single line
//! - Json: one JSON object per entry, with Cloud Logging field names

use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;

/// JSON key holding the entry severity
pub const LEVEL_FIELD: &str = "severity";
/// JSON key holding the entry timestamp
pub const TIMESTAMP_FIELD: &str = "timestamp";
pub const MESSAGE_FIELD: &str = "message";
pub const CALLER_FIELD: &str = "caller";
pub const ERROR_FIELD: &str = "error";
/// Field holding the rendered stack of a traced error
pub const STACK_FIELD: &str = "stack";

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45Z] [INF] src/main.rs:10 - Request processed id=7`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"message":"Request processed","severity":"info","timestamp":"2025-01-08T10:30:45Z"}`
    Json,
}

impl OutputFormat {
    /// Format a log entry according to this output format
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => format_text(entry, timestamp_format, &[]),
            OutputFormat::Json => format_json(entry, timestamp_format),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "console" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}

/// Format as human-readable text, skipping the `exclude`d field keys
pub fn format_text(entry: &LogEntry, timestamp_format: &TimestampFormat, exclude: &[String]) -> String {
    let timestamp = entry.timestamp.as_ref().map(|t| timestamp_format.format(t));
    render_text(entry, timestamp.as_deref(), entry.level.abbrev(), exclude)
}

/// Assemble a text line from pre-rendered timestamp and level label
pub(crate) fn render_text(
    entry: &LogEntry,
    timestamp: Option<&str>,
    level_label: &str,
    exclude: &[String],
) -> String {
    let mut line = String::with_capacity(64 + entry.message.len());

    if let Some(timestamp) = timestamp {
        line.push('[');
        line.push_str(timestamp);
        line.push_str("] ");
    }
    line.push('[');
    line.push_str(level_label);
    line.push_str("] ");
    if let Some(ref caller) = entry.caller {
        line.push_str(&caller.to_string());
        line.push(' ');
    }
    line.push_str("- ");
    line.push_str(&entry.message);

    let fields = entry.fields.format_fields_excluding(exclude);
    if !fields.is_empty() {
        line.push(' ');
        line.push_str(&fields);
    }
    if let Some(ref tracing) = entry.tracing {
        line.push_str(&format!(" trace_id={} span_id={}", tracing.trace_id, tracing.span_id));
    }
    if let Some(ref error) = entry.error {
        line.push_str(&format!(" {}={:?}", ERROR_FIELD, error));
    }

    line
}

/// Build the JSON object for an entry.
///
/// User fields are written first so the logger-owned keys always win.
pub fn to_json_value(entry: &LogEntry, timestamp_format: &TimestampFormat) -> serde_json::Value {
    let mut json_obj = serde_json::Map::new();

    for (key, value) in entry.fields.fields() {
        json_obj.insert(key.clone(), value.to_json_value());
    }

    if let Some(ref tracing) = entry.tracing {
        for (key, value) in tracing.to_fields() {
            json_obj.insert(key, value.to_json_value());
        }
    }

    if entry.level != super::LogLevel::NoLevel {
        json_obj.insert(
            LEVEL_FIELD.to_string(),
            serde_json::Value::String(entry.level.json_value().to_string()),
        );
    }

    if let Some(ref timestamp) = entry.timestamp {
        let value = if timestamp_format.is_numeric() {
            serde_json::Value::Number(timestamp.timestamp_millis().into())
        } else {
            serde_json::Value::String(timestamp_format.format(timestamp))
        };
        json_obj.insert(TIMESTAMP_FIELD.to_string(), value);
    }

    if let Some(ref caller) = entry.caller {
        json_obj.insert(
            CALLER_FIELD.to_string(),
            serde_json::Value::String(caller.to_string()),
        );
    }

    if let Some(ref error) = entry.error {
        json_obj.insert(ERROR_FIELD.to_string(), serde_json::Value::String(error.clone()));
    }

    if !entry.message.is_empty() {
        json_obj.insert(
            MESSAGE_FIELD.to_string(),
            serde_json::Value::String(entry.message.clone()),
        );
    }

    serde_json::Value::Object(json_obj)
}

fn format_json(entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
    serde_json::to_string(&to_json_value(entry, timestamp_format)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, LogContext, LogLevel, TracingContext};
    use chrono::TimeZone;

    fn create_test_entry() -> LogEntry {
        let timestamp = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        LogEntry::new(LogLevel::Info, "Test message".to_string()).with_timestamp(timestamp)
    }

    #[test]
    fn test_text_format() {
        let entry = create_test_entry().with_location("src/lib.rs", 7, "app");
        let output = OutputFormat::Text.format(&entry, &TimestampFormat::Rfc3339);

        assert_eq!(output, "[2025-01-08T10:30:45Z] [INF] src/lib.rs:7 - Test message");
    }

    #[test]
    fn test_text_format_without_timestamp() {
        let entry = LogEntry::new(LogLevel::Warn, "careful".to_string());
        let output = OutputFormat::Text.format(&entry, &TimestampFormat::default());

        assert_eq!(output, "[WRN] - careful");
    }

    #[test]
    fn test_text_format_with_context_and_error() {
        let mut entry = create_test_entry()
            .with_context(LogContext::new().with_field("user_id", 123));
        entry.error = Some("boom".to_string());

        let output = OutputFormat::Text.format(&entry, &TimestampFormat::Rfc3339);
        assert!(output.ends_with("Test message user_id=123 error=\"boom\""));
    }

    #[test]
    fn test_json_format() {
        let entry = create_test_entry();
        let output = OutputFormat::Json.format(&entry, &TimestampFormat::Rfc3339);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");

        assert_eq!(parsed["severity"], "info");
        assert_eq!(parsed["message"], "Test message");
        assert_eq!(parsed["timestamp"], "2025-01-08T10:30:45Z");
    }

    #[test]
    fn test_json_reserved_keys_win() {
        let mut entry = create_test_entry().with_context(
            LogContext::new()
                .with_field("timestamp", "user supplied")
                .with_field("nested", FieldValue::Map(Default::default())),
        );
        entry.tracing = Some(TracingContext::new("t-1", "s-1"));

        let value = to_json_value(&entry, &TimestampFormat::Rfc3339);
        assert_eq!(value["timestamp"], "2025-01-08T10:30:45Z");
        assert_eq!(value["trace_id"], "t-1");
        assert!(value["nested"].is_object());
    }

    #[test]
    fn test_json_warn_and_nolevel() {
        let entry = LogEntry::new(LogLevel::Warn, "w".to_string());
        assert_eq!(to_json_value(&entry, &TimestampFormat::default())["severity"], "warning");

        let entry = LogEntry::new(LogLevel::NoLevel, "n".to_string());
        assert!(to_json_value(&entry, &TimestampFormat::default())
            .get("severity")
            .is_none());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("console".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
