#![forbid(unsafe_code)]

//! Public facade for the headless dropdown overlay.
//!
//! Re-exports the types most hosts need from the internal crates and offers
//! a small prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use amo_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, PointerButton, PointerEvent, PointerEventKind,
};
pub use amo_core::geometry::{Rect, Size};

#[cfg(feature = "tracing-json")]
pub use amo_core::logging::init_json_logging;

// --- Dropdown re-exports ---------------------------------------------------

pub use amo_dropdown::placement::{ParsePlacementError, PanelEstimate, ResolvedPlacement};
pub use amo_dropdown::{
    CloseHandle, ContentProps, Dismissal, Document, Dropdown, DropdownBuilder, DropdownConfig,
    DropdownEvent, DropdownOptions, DropdownView, InstanceId, ListenerGuard, ListenerKind,
    Measure, OptionsError, OverlayState, PanelStyle, PanelView, PlacementPreference,
    SharedGeometry, Side, TriggerProps,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hosts that read configuration.
#[derive(Debug)]
pub enum Error {
    /// Options could not be parsed.
    Options(OptionsError),
    /// A placement string was not `auto`, `top` or `bottom`.
    Placement(ParsePlacementError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options(err) => write!(f, "{err}"),
            Self::Placement(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Options(err) => Some(err),
            Self::Placement(err) => Some(err),
        }
    }
}

impl From<OptionsError> for Error {
    fn from(err: OptionsError) -> Self {
        Self::Options(err)
    }
}

impl From<ParsePlacementError> for Error {
    fn from(err: ParsePlacementError) -> Self {
        Self::Placement(err)
    }
}

/// Standard result type for facade APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Read a [`DropdownConfig`] from host-supplied JSON options.
///
/// Unknown placement strings fall back to `auto`; only malformed JSON fails.
pub fn config_from_json(json: &str) -> Result<DropdownConfig> {
    Ok(DropdownOptions::from_json(json)?.into())
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CloseHandle, ContentProps, Document, Dropdown, DropdownBuilder, DropdownConfig,
        DropdownEvent, Error, Event, KeyCode, Measure, PlacementPreference, Rect, Result,
        SharedGeometry, Side, Size, TriggerProps,
    };

    pub use amo_core;
    pub use amo_dropdown;
}
