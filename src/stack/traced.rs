//! Errors that remember where they were raised

use super::capture::StackCapture;
use std::error::Error;
use std::fmt;

/// Boxed error type used for wrapped causes
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Skip depth landing on the caller of a `TracedError` constructor
const TRACED_SKIP: usize = 3;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

/// An error carrying the call stack of the point it was constructed.
///
/// The stack is captured once, in the constructor. Logging the error later,
/// from anywhere, reports the fault site at no extra cost.
#[derive(Debug)]
pub struct TracedError {
    inner: BoxError,
    stack: StackCapture,
}

impl TracedError {
    /// Create a traced error from a message
    ///
    /// Prefer [`traced_error!`](crate::traced_error) for formatted messages.
    #[inline(never)]
    pub fn msg(message: impl fmt::Display) -> Self {
        let stack = StackCapture::capture(TRACED_SKIP);
        std::hint::black_box(Self {
            inner: Box::new(Message(message.to_string())),
            stack,
        })
    }

    /// Wrap an existing error, capturing the current stack
    #[inline(never)]
    pub fn wrap<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        let stack = StackCapture::capture(TRACED_SKIP);
        std::hint::black_box(Self {
            inner: err.into(),
            stack,
        })
    }

    /// Assemble a traced error from an already captured stack
    pub fn from_parts(inner: BoxError, stack: StackCapture) -> Self {
        Self { inner, stack }
    }

    pub fn stack(&self) -> &StackCapture {
        &self.stack
    }

    /// The wrapped cause
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stacktraced: {}", self.inner)
    }
}

impl Error for TracedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

/// Several independent errors reported as one.
///
/// This is the aggregate the stack marshaler looks through: each constituent
/// is inspected separately, in join order.
#[derive(Debug)]
pub struct JoinedError {
    errors: Vec<BoxError>,
}

impl JoinedError {
    /// Join errors; `None` when there is nothing to join
    pub fn join<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = BoxError>,
    {
        let errors: Vec<BoxError> = errors.into_iter().collect();
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Constituent errors in join order
    pub fn errors(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        self.errors.iter().map(|e| e.as_ref() as &(dyn Error + 'static))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl Error for JoinedError {}

/// Find the first `TracedError` in `err`, its source chain, or, for a
/// `JoinedError`, any of its constituents
pub fn find_traced<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a TracedError> {
    if let Some(traced) = err.downcast_ref::<TracedError>() {
        return Some(traced);
    }
    if let Some(joined) = err.downcast_ref::<JoinedError>() {
        return joined.errors().find_map(find_traced);
    }
    err.source().and_then(find_traced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("query failed")]
    struct QueryError {
        #[source]
        source: TracedError,
    }

    #[test]
    fn test_display_and_source() {
        let err = TracedError::msg("disk full");
        assert_eq!(err.to_string(), "stacktraced: disk full");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk full"));
    }

    #[test]
    fn test_stack_starts_at_constructor_caller() {
        let err = TracedError::msg("here");
        let first = &err.stack().frames()[0];

        assert!(first.file.ends_with("traced.rs"), "file was {}", first.file);
        assert_eq!(first.short_name(), "test_stack_starts_at_constructor_caller");
    }

    #[test]
    fn test_wrap_keeps_inner() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = TracedError::wrap(io);

        assert_eq!(err.to_string(), "stacktraced: missing");
        assert!(err.inner().downcast_ref::<std::io::Error>().is_some());
        assert_eq!(err.stack().frames()[0].short_name(), "test_wrap_keeps_inner");
    }

    #[test]
    fn test_find_traced_through_source_chain() {
        let err = QueryError {
            source: TracedError::msg("timeout"),
        };

        let found = find_traced(&err).expect("traced error in chain");
        assert_eq!(found.to_string(), "stacktraced: timeout");
    }

    #[test]
    fn test_find_traced_absent() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "plain");
        assert!(find_traced(&err).is_none());
    }

    #[test]
    fn test_join() {
        assert!(JoinedError::join(Vec::new()).is_none());

        let joined = JoinedError::join(vec![
            Box::new(Message("first".to_string())) as BoxError,
            Box::new(TracedError::msg("second")),
        ])
        .expect("non-empty join");

        assert_eq!(joined.len(), 2);
        assert_eq!(joined.to_string(), "first\nstacktraced: second");
        assert!(find_traced(&joined).is_some());
    }
}
