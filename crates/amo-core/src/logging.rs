#![forbid(unsafe_code)]

//! Event logging for overlay components.
//!
//! Components log through `amo_core::debug!`, `amo_core::trace!` and
//! `amo_core::warn!`. With the `tracing` feature these are the `tracing`
//! macros; without it they expand to nothing, arguments included, so a
//! default build carries no logging code at all.
//!
//! Spans are not shimmed. Code that opens one guards it with
//! `#[cfg(feature = "tracing")]` and names `tracing` directly.
//!
//! Field conventions: `instance` is the [`Display`](std::fmt::Display) of
//! the component's id, transitions carry `from` and `to`, and fallbacks log
//! the value that was kept (`last_known`) or rejected.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

/// Default filter for [`init_json_logging`]: component debug output only.
#[cfg(feature = "tracing-json")]
pub const DEFAULT_FILTER: &str = "warn,amo_dropdown=debug";

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Discards a debug record.
    #[macro_export]
    macro_rules! debug {
        ($($record:tt)*) => {};
    }

    /// Discards a trace record.
    #[macro_export]
    macro_rules! trace {
        ($($record:tt)*) => {};
    }

    /// Discards a warning.
    #[macro_export]
    macro_rules! warn {
        ($($record:tt)*) => {};
    }
}

/// Install a process-wide subscriber writing one JSON object per record.
///
/// The filter comes from `RUST_LOG`, or `filter` when that is unset or
/// invalid. Returns `false` when a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(filter: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
