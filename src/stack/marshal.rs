//! Rendering traced error stacks into a log field
//!
//! The rendered field is a list of stack entries, one per traced error found,
//! each a list of `{"file", "function", "line"}` objects.

use super::capture::{Frame, StackCapture};
use super::traced::{find_traced, JoinedError};
use crate::core::log_context::{FieldValue, Fields};
use serde::Serialize;
use std::error::Error;

/// One rendered frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameInfo {
    /// Empty when the frame has no debug info
    pub file: String,
    /// Function name without its module path
    pub function: String,
    /// Decimal line number
    pub line: String,
}

/// Rendered frames of one captured stack, innermost first
pub type StackInfo = Vec<FrameInfo>;

impl From<&Frame> for FrameInfo {
    fn from(frame: &Frame) -> Self {
        Self {
            file: frame.file.clone(),
            function: frame.short_name().to_string(),
            line: frame.line.to_string(),
        }
    }
}

impl From<FrameInfo> for FieldValue {
    fn from(info: FrameInfo) -> Self {
        let mut map = Fields::new();
        map.insert("file".to_string(), FieldValue::String(info.file));
        map.insert("function".to_string(), FieldValue::String(info.function));
        map.insert("line".to_string(), FieldValue::String(info.line));
        FieldValue::Map(map)
    }
}

fn stack_info(stack: &StackCapture) -> StackInfo {
    stack.frames().iter().map(FrameInfo::from).collect()
}

/// Render the stacks carried by `err`.
///
/// Returns `None` when `err` holds no [`TracedError`](super::TracedError)
/// anywhere, meaning no stack field should be written. A [`JoinedError`] is
/// rendered constituent by constituent in join order, skipping the ones that
/// are not traced. Any other error renders exactly one entry.
///
/// Only this crate's [`JoinedError`] is expanded. A composite error from
/// elsewhere is seen through its [`Error::source`] chain alone, so it renders
/// the single entry of the first traced error that chain reaches.
///
/// # Example
///
/// ```
/// use rust_log_bridge::stack::{marshal_stack, TracedError};
///
/// let plain = std::io::Error::new(std::io::ErrorKind::Other, "plain");
/// assert!(marshal_stack(&plain).is_none());
///
/// let traced = TracedError::msg("boom");
/// assert_eq!(marshal_stack(&traced).map(|s| s.len()), Some(1));
/// ```
pub fn marshal_stack(err: &(dyn Error + 'static)) -> Option<Vec<StackInfo>> {
    let traced = find_traced(err)?;

    match err.downcast_ref::<JoinedError>() {
        Some(joined) => Some(
            joined
                .errors()
                .filter_map(find_traced)
                .map(|t| stack_info(t.stack()))
                .collect(),
        ),
        None => Some(vec![stack_info(traced.stack())]),
    }
}

/// [`marshal_stack`] as a field value; the logger's default stack marshaler
pub fn marshal_stack_field(err: &(dyn Error + 'static)) -> Option<FieldValue> {
    marshal_stack(err).map(FieldValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::traced::{BoxError, TracedError};

    #[test]
    fn test_plain_error_has_no_stack() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "wrong error");
        assert!(marshal_stack(&err).is_none());
        assert!(marshal_stack_field(&err).is_none());
    }

    #[test]
    fn test_single_traced_error() {
        let err = TracedError::msg("valid error");
        let line = line!() - 1;

        let stacks = marshal_stack(&err).expect("traced error renders");
        assert_eq!(stacks.len(), 1);

        let first = &stacks[0][0];
        assert!(first.file.ends_with("marshal.rs"), "file was {}", first.file);
        assert_eq!(first.function, "test_single_traced_error");
        assert_eq!(first.line, line.to_string());
    }

    #[test]
    fn test_joined_errors_skip_untraced() {
        let first_line = line!() + 2;
        let joined = JoinedError::join(vec![
            Box::new(TracedError::msg("valid error 1")) as BoxError,
            Box::new(std::io::Error::new(std::io::ErrorKind::Other, "wrong error")),
            Box::new(TracedError::msg("valid error 2")),
        ])
        .expect("non-empty join");

        let stacks = marshal_stack(&joined).expect("joined error renders");
        assert_eq!(stacks.len(), 2);
        assert_eq!(stacks[0][0].line, first_line.to_string());
        assert_eq!(stacks[1][0].line, (first_line + 2).to_string());
        for stack in &stacks {
            assert_eq!(stack[0].function, "test_joined_errors_skip_untraced");
        }
    }

    #[test]
    fn test_joined_without_traced_is_none() {
        let joined = JoinedError::join(vec![
            Box::new(std::io::Error::new(std::io::ErrorKind::Other, "a")) as BoxError,
        ])
        .expect("non-empty join");

        assert!(marshal_stack(&joined).is_none());
    }

    #[derive(Debug)]
    struct Batch {
        failures: Vec<TracedError>,
    }

    impl std::fmt::Display for Batch {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{} failures", self.failures.len())
        }
    }

    impl Error for Batch {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.failures.first().map(|e| e as &(dyn Error + 'static))
        }
    }

    #[test]
    fn test_other_composites_render_one_entry() {
        let first_line = line!() + 3;
        let batch = Batch {
            failures: vec![
                TracedError::msg("first"),
                TracedError::msg("second"),
            ],
        };

        let stacks = marshal_stack(&batch).expect("traced source renders");
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0][0].line, first_line.to_string());
    }

    #[test]
    fn test_empty_capture_is_an_empty_entry() {
        let err = TracedError::from_parts("no frames".into(), StackCapture::empty());
        assert_eq!(marshal_stack(&err), Some(vec![Vec::new()]));
    }

    #[test]
    fn test_field_value_shape() {
        let err = TracedError::msg("shape");
        let field = marshal_stack_field(&err).expect("traced error renders");
        let json = field.to_json_value();

        let frame = &json[0][0];
        assert!(frame["file"].is_string());
        assert_eq!(frame["function"], "test_field_value_shape");
        assert!(frame["line"]
            .as_str()
            .is_some_and(|line| line.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn test_frame_info_serializes() {
        let info = FrameInfo {
            file: "src/db.rs".to_string(),
            function: "connect".to_string(),
            line: "12".to_string(),
        };
        let json = serde_json::to_string(&info).expect("serializable");
        assert_eq!(json, r#"{"file":"src/db.rs","function":"connect","line":"12"}"#);
    }
}
