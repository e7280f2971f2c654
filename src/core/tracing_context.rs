//! Ambient request context attached to log entries

use super::log_context::Fields;
use serde::{Deserialize, Serialize};

/// Tracing context for distributed tracing
///
/// Passed alongside a log call the way a request-scoped context would be;
/// its identifiers are written next to the entry's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingContext {
    /// Trace ID for request correlation
    pub trace_id: String,

    /// Span ID for this operation
    pub span_id: String,

    /// Parent span ID (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
}

impl TracingContext {
    /// Create a new tracing context
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
            parent_span_id: None,
        }
    }

    /// Set parent span ID
    pub fn with_parent(mut self, parent_span_id: impl Into<String>) -> Self {
        self.parent_span_id = Some(parent_span_id.into());
        self
    }

    /// Fields this context contributes to an entry
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("trace_id".to_string(), self.trace_id.as_str().into());
        fields.insert("span_id".to_string(), self.span_id.as_str().into());
        if let Some(ref parent) = self.parent_span_id {
            fields.insert("parent_span_id".to_string(), parent.as_str().into());
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_context() {
        let tracing = TracingContext::new("trace-abc", "span-123").with_parent("span-000");

        assert_eq!(tracing.trace_id, "trace-abc");
        assert_eq!(tracing.span_id, "span-123");
        assert_eq!(tracing.parent_span_id, Some("span-000".to_string()));
    }

    #[test]
    fn test_to_fields_skips_missing_parent() {
        let fields = TracingContext::new("t", "s").to_fields();
        assert_eq!(fields.len(), 2);
        assert!(!fields.contains_key("parent_span_id"));
    }
}
