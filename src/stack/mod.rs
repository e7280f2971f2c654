//! Stack-traced errors
//!
//! A [`TracedError`] snapshots the call stack when it is built; the logger
//! renders that snapshot with [`marshal_stack`] when the error is logged.

pub mod capture;
pub mod marshal;
pub mod traced;

pub use capture::{Frame, StackCapture, MAX_FRAMES};
pub use marshal::{marshal_stack, marshal_stack_field, FrameInfo, StackInfo};
pub use traced::{find_traced, BoxError, JoinedError, TracedError};
