#![forbid(unsafe_code)]

//! Core: viewport geometry, host input events, and logging.

pub mod event;
pub mod geometry;
pub mod logging;

#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
