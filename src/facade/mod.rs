//! Structured-logging facade bridged onto the core logger
//!
//! Callers log through [`FacadeLogger`] or any [`Handler`]; [`BridgeHandler`]
//! translates facade levels, attributes and groups for the core [`Logger`].
//!
//! [`Logger`]: crate::core::Logger

pub mod attr;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;

pub use attr::{merge_attrs, Attr, AttrValue};
pub use handler::{BridgeHandler, Handler};
pub use level::{to_coarse, to_fine, FacadeLevel};
pub use logger::FacadeLogger;
pub use record::Record;
