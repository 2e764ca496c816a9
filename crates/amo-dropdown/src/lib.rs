#![forbid(unsafe_code)]

//! Headless dropdown overlay.
//!
//! A [`Dropdown`] owns a trigger renderer, a content renderer, and the state
//! that decides whether the panel is shown and where. The host supplies
//! geometry through [`measure::Measure`], feeds input through
//! [`Dropdown::handle_event`], and draws whatever [`Dropdown::render`]
//! returns.
//!
//! ```
//! use amo_core::event::Event;
//! use amo_core::geometry::{Rect, Size};
//! use amo_dropdown::{DropdownBuilder, DropdownEvent, Document, SharedGeometry};
//!
//! let document = Document::new();
//! let geometry = SharedGeometry::with(Rect::new(20.0, 20.0, 100.0, 32.0), Size::new(800.0, 600.0));
//! let mut menu = DropdownBuilder::new(&document)
//!     .measure(geometry.clone())
//!     .mount(|t| format!("Menu ({})", t.open), |_c| "Profile".to_owned());
//!
//! menu.handle_event(&Event::press(30.0, 30.0));
//! assert!(menu.is_open());
//! menu.handle_event(&Event::press(700.0, 500.0));
//! assert_eq!(menu.drain_events(), vec![DropdownEvent::Opened, DropdownEvent::Closed]);
//! ```

pub mod config;
pub mod dropdown;
pub mod measure;
pub mod placement;
pub mod watcher;

pub use config::{DropdownConfig, DropdownOptions, OptionsError, PanelStyle};
pub use dropdown::{
    CloseHandle, ContentProps, Dropdown, DropdownBuilder, DropdownEvent, DropdownView,
    OverlayState, PanelView, TriggerProps,
};
pub use measure::{Measure, SharedGeometry};
pub use placement::{PlacementPreference, Side};
pub use watcher::{Dismissal, Document, InstanceId, ListenerGuard, ListenerKind};
