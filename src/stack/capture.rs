//! Call-stack snapshots
//!
//! Depth is counted from the frame walker: depth 0 is the walker itself,
//! depth 1 is [`StackCapture::capture`], depth 2 is whoever called it, and so
//! on. Inlined calls count as frames of their own.
//!
//! A function whose last action is returning `capture`'s result may be
//! compiled into a tail call, in which case it has no frame of its own and
//! the capture starts at its caller. Callers that must appear in the stack
//! bind the result first and pass it through [`std::hint::black_box`].

use std::fmt;

/// Maximum number of frames kept by a capture
pub const MAX_FRAMES: usize = 32;

const UNKNOWN_FUNCTION: &str = "<unknown>";

/// One resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Fully qualified function name, without the symbol hash
    pub function: String,
    /// Source file; empty when the frame has no debug info
    pub file: String,
    /// Source line; 0 when unknown
    pub line: u32,
}

impl Frame {
    /// Function name with its module path stripped
    pub fn short_name(&self) -> &str {
        match self.function.rfind("::") {
            Some(idx) => &self.function[idx + 2..],
            None => &self.function,
        }
    }

    fn from_symbol(symbol: &backtrace::Symbol) -> Self {
        Self {
            function: symbol
                .name()
                .map(|name| format!("{:#}", name))
                .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string()),
            file: symbol
                .filename()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            line: symbol.lineno().unwrap_or(0),
        }
    }

    fn unresolved() -> Self {
        Self {
            function: UNKNOWN_FUNCTION.to_string(),
            file: String::new(),
            line: 0,
        }
    }
}

/// Immutable snapshot of the call stack, innermost frame first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackCapture {
    frames: Vec<Frame>,
}

impl StackCapture {
    /// Capture up to [`MAX_FRAMES`] frames, starting `skip` frames deep.
    ///
    /// `capture(2)` starts at the function that called `capture`; `0` and `1`
    /// both start at `capture` itself. A caller that tail-calls `capture`
    /// has no frame in optimized builds.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self {
        let anchor = Self::capture as fn(usize) -> Self as usize;
        let start = skip.max(1);
        let mut frames = Vec::with_capacity(MAX_FRAMES);
        let mut depth = 0usize;

        backtrace::trace(|raw| {
            let mut logical = Vec::new();
            backtrace::resolve_frame(raw, |symbol| logical.push(Frame::from_symbol(symbol)));
            if logical.is_empty() {
                logical.push(Frame::unresolved());
            }

            if depth == 0 {
                // Walker internals until the physical frame of `capture`;
                // anything inlined into it is not a caller.
                let is_anchor = raw.symbol_address() as usize == anchor
                    || logical.iter().any(|f| is_capture_fn(&f.function));
                if is_anchor {
                    depth = 1;
                    if start == 1 {
                        if let Some(own) = logical.pop() {
                            frames.push(own);
                        }
                    }
                }
                return true;
            }

            for frame in logical {
                depth += 1;
                if depth >= start {
                    frames.push(frame);
                    if frames.len() == MAX_FRAMES {
                        return false;
                    }
                }
            }
            true
        });

        Self { frames }
    }

    /// A capture with no frames
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_frames(mut frames: Vec<Frame>) -> Self {
        frames.truncate(MAX_FRAMES);
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// One `function\n\tfile:line\n` block per frame
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StackCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            write!(f, "{}\n\t{}:{}\n", frame.function, frame.file, frame.line)?;
        }
        Ok(())
    }
}

fn is_capture_fn(name: &str) -> bool {
    name.contains("StackCapture") && name.ends_with("::capture")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(function: &str, file: &str, line: u32) -> Frame {
        Frame {
            function: function.to_string(),
            file: file.to_string(),
            line,
        }
    }

    #[test]
    fn test_nested_capture_reports_call_site() {
        let inner = || (StackCapture::capture(2), line!());
        let outer = || (inner(), line!());

        let ((stack, inner_line), outer_line) = outer();
        let frames = stack.frames();
        assert!(frames.len() >= 2, "captured {} frames", frames.len());

        assert!(frames[0].file.ends_with("capture.rs"), "file was {}", frames[0].file);
        assert!(frames[0].short_name().contains("closure"), "{}", frames[0].function);
        assert_eq!(frames[0].line, inner_line);

        assert!(frames[1].file.ends_with("capture.rs"));
        assert!(frames[1].short_name().contains("closure"), "{}", frames[1].function);
        assert_eq!(frames[1].line, outer_line);

        assert!(!stack.render().is_empty());
    }

    #[inline(never)]
    fn named_helper() -> StackCapture {
        let stack = StackCapture::capture(2);
        std::hint::black_box(stack)
    }

    #[test]
    fn test_capture_starts_at_caller_function() {
        let stack = named_helper();
        let frames = stack.frames();

        assert_eq!(frames[0].short_name(), "named_helper");
        assert_eq!(frames[1].short_name(), "test_capture_starts_at_caller_function");
    }

    #[test]
    fn test_skip_one_includes_capture_itself() {
        let stack = StackCapture::capture(1);
        assert_eq!(stack.frames()[0].short_name(), "capture");
        assert_eq!(
            stack.frames()[1].short_name(),
            "test_skip_one_includes_capture_itself"
        );
    }

    #[test]
    fn test_capture_is_bounded() {
        #[inline(never)]
        fn recurse(n: usize) -> StackCapture {
            if n == 0 {
                let stack = StackCapture::capture(2);
                std::hint::black_box(stack)
            } else {
                let stack = recurse(n - 1);
                std::hint::black_box(n);
                stack
            }
        }

        let stack = recurse(MAX_FRAMES * 2);
        assert_eq!(stack.len(), MAX_FRAMES);
    }

    #[test]
    fn test_render_format() {
        let stack = StackCapture::from_frames(vec![
            frame("app::db::connect", "src/db.rs", 12),
            frame("app::main", "src/main.rs", 3),
        ]);

        assert_eq!(
            stack.render(),
            "app::db::connect\n\tsrc/db.rs:12\napp::main\n\tsrc/main.rs:3\n"
        );
    }

    #[test]
    fn test_short_name() {
        assert_eq!(frame("a::b::c", "", 0).short_name(), "c");
        assert_eq!(frame("main", "", 0).short_name(), "main");
        assert_eq!(frame("app::run::{{closure}}", "", 0).short_name(), "{{closure}}");
    }

    #[test]
    fn test_empty_capture() {
        let stack = StackCapture::empty();
        assert!(stack.is_empty());
        assert_eq!(stack.render(), "");
    }
}
