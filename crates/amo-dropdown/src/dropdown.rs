#![forbid(unsafe_code)]

//! The dropdown overlay: a trigger, a floating panel, and the state machine
//! tying them together.
//!
//! # Lifecycle
//!
//! - Mount: [`DropdownBuilder::mount`] allocates an instance id and starts
//!   closed, with no global listeners.
//! - Open: trigger geometry is captured, placement resolved, the listener
//!   pair attached, then [`DropdownEvent::Opened`] is queued.
//! - Close: the listener pair is detached, placement cleared, then
//!   [`DropdownEvent::Closed`] is queued.
//! - Unmount: dropping the instance (or [`Dropdown::unmount`]) releases the
//!   listener pair if still open.
//!
//! Notifications are queued and read with [`Dropdown::drain_events`]. A
//! caller reacting to one may call [`Dropdown::toggle`] straight away; the
//! toggle is an ordinary new transition.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use amo_core::event::Event;
use amo_core::geometry::Rect;

use crate::config::{DropdownConfig, PanelStyle};
use crate::measure::{GeometryCache, Measure, SharedGeometry};
use crate::placement::{self, PlacementInput, ResolvedPlacement, Side};
use crate::watcher::{Dismissal, DismissalWatcher, Document, InstanceId};

/// Lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownEvent {
    Opened,
    Closed,
}

/// State owned by one dropdown instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    is_open: bool,
    placement: Option<ResolvedPlacement>,
    trigger_bounds: Rect,
    viewport_bounds: Rect,
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The side the panel is on. `None` whenever closed.
    pub fn resolved_placement(&self) -> Option<Side> {
        self.placement.map(|p| p.side)
    }

    /// Panel rectangle. `None` whenever closed.
    pub fn panel_bounds(&self) -> Option<Rect> {
        self.placement.map(|p| p.panel)
    }

    /// Trigger geometry captured at open or on the last geometry change.
    pub fn trigger_bounds(&self) -> Rect {
        self.trigger_bounds
    }

    pub fn viewport_bounds(&self) -> Rect {
        self.viewport_bounds
    }
}

/// Argument to the trigger renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerProps {
    pub open: bool,
}

/// Argument to the content renderer.
#[derive(Debug, Clone)]
pub struct ContentProps {
    pub close: CloseHandle,
}

/// Capability handed to content so it can close its own dropdown.
///
/// A request is recorded immediately and applied by the dropdown on its next
/// [`Dropdown::flush`] or [`Dropdown::handle_event`].
#[derive(Debug, Clone, Default)]
pub struct CloseHandle {
    requested: Rc<Cell<bool>>,
}

impl CloseHandle {
    /// Ask the dropdown to close.
    pub fn close(&self) {
        self.requested.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }

    fn take(&self) -> bool {
        self.requested.replace(false)
    }
}

/// The floating panel as rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView<V> {
    pub content: V,
    pub side: Side,
    /// Where to draw the panel, viewport-relative.
    pub bounds: Rect,
    pub style: PanelStyle,
}

/// One render pass: the trigger, plus the panel when open.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownView<V> {
    pub trigger: V,
    pub panel: Option<PanelView<V>>,
}

type TriggerSlot<V> = Box<dyn FnMut(TriggerProps) -> V>;
type ContentSlot<V> = Box<dyn FnMut(ContentProps) -> V>;

/// Configures a dropdown before mounting it into a [`Document`].
pub struct DropdownBuilder {
    document: Document,
    config: DropdownConfig,
    measure: Box<dyn Measure>,
}

impl DropdownBuilder {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
            config: DropdownConfig::default(),
            measure: Box::new(SharedGeometry::new()),
        }
    }

    #[must_use]
    pub fn config(mut self, config: DropdownConfig) -> Self {
        self.config = config;
        self
    }

    /// Geometry source for trigger, viewport and panel.
    #[must_use]
    pub fn measure(mut self, measure: impl Measure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Mount with the given trigger and content renderers.
    pub fn mount<V>(
        self,
        trigger: impl FnMut(TriggerProps) -> V + 'static,
        content: impl FnMut(ContentProps) -> V + 'static,
    ) -> Dropdown<V> {
        let id = self.document.register_instance();
        amo_core::debug!(instance = %id, placement = %self.config.placement, "dropdown mounted");
        Dropdown {
            id,
            geometry: GeometryCache::new(self.config.panel_estimate),
            config: self.config,
            state: OverlayState::default(),
            measure: self.measure,
            document: self.document,
            watcher: DismissalWatcher::new(),
            close_handle: CloseHandle::default(),
            trigger_slot: Box::new(trigger),
            content_slot: Box::new(content),
            events: Vec::new(),
        }
    }
}

/// A mounted dropdown overlay.
pub struct Dropdown<V> {
    id: InstanceId,
    config: DropdownConfig,
    state: OverlayState,
    geometry: GeometryCache,
    measure: Box<dyn Measure>,
    document: Document,
    watcher: DismissalWatcher,
    close_handle: CloseHandle,
    trigger_slot: TriggerSlot<V>,
    content_slot: ContentSlot<V>,
    events: Vec<DropdownEvent>,
}

impl<V> fmt::Debug for Dropdown<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("watching", &self.watcher.is_active())
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl<V> Dropdown<V> {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Whether the global listener pair is attached.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_active()
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) {
        if self.state.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Open unless already open.
    pub fn request_open(&mut self) {
        if !self.state.is_open {
            self.open();
        }
    }

    /// Close unless already closed.
    pub fn request_close(&mut self) {
        if self.state.is_open {
            self.close();
        }
    }

    /// Apply a pending close request from the content's [`CloseHandle`].
    pub fn flush(&mut self) {
        if self.close_handle.take() {
            amo_core::debug!(instance = %self.id, "close requested by content");
            self.request_close();
        }
    }

    /// Take queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<DropdownEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed one host event.
    ///
    /// Returns `true` when the event (or a pending close request applied
    /// first) changed open state or placement.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let was_open = self.state.is_open;
        self.flush();
        let flushed = was_open != self.state.is_open;

        if event.is_geometry_change() {
            return self.reposition() || flushed;
        }

        // Toggle and dismissal must agree on where the trigger is.
        let trigger = self.geometry.trigger_for_hit_test(self.measure.as_ref());
        if let Event::Pointer(pointer) = event
            && pointer.is_press()
        {
            let (x, y) = pointer.position();
            if trigger.contains(x, y) {
                self.toggle();
                return true;
            }
        }

        let panel = self.state.panel_bounds().unwrap_or_default();
        match self
            .watcher
            .inspect(event, &trigger, &panel, self.config.close_on_content_click)
        {
            Some(reason) => {
                self.dismiss(reason);
                true
            }
            None => flushed,
        }
    }

    /// Re-measure the panel after a paint and correct placement if needed.
    ///
    /// Hosts call this whenever the panel has been laid out, including after
    /// its content grew or shrank. The panel stays on its settled side unless
    /// at the new size it would clip there. Returns `true` when the panel
    /// moved or changed size.
    pub fn settle(&mut self) -> bool {
        if !self.state.is_open {
            return false;
        }
        let resized = self.geometry.refresh_panel(self.measure.as_ref());
        let stale = self.state.panel_bounds().map(|panel| panel.size())
            != Some(self.geometry.panel().size());
        if !resized && !stale {
            return false;
        }
        self.refine_placement()
    }

    /// Render the trigger and, when open, the panel.
    pub fn render(&mut self) -> DropdownView<V> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("dropdown.render", instance = %self.id, open = self.state.is_open)
            .entered();

        let trigger = (self.trigger_slot)(TriggerProps {
            open: self.state.is_open,
        });
        let placement = self.state.placement.filter(|_| self.state.is_open);
        let panel = placement.map(|placement| PanelView {
            content: (self.content_slot)(ContentProps {
                close: self.close_handle.clone(),
            }),
            side: placement.side,
            bounds: placement.panel,
            style: self.config.style.clone(),
        });
        DropdownView { trigger, panel }
    }

    /// Tear down, releasing any attached listeners.
    pub fn unmount(self) {
        amo_core::debug!(instance = %self.id, open = self.state.is_open, "dropdown unmounted");
    }

    fn open(&mut self) {
        self.close_handle.take();
        self.geometry.refresh(self.measure.as_ref());
        let placement = placement::resolve(&self.placement_input());
        self.state.trigger_bounds = self.geometry.trigger();
        self.state.viewport_bounds = self.geometry.viewport();
        self.state.placement = Some(placement);
        self.state.is_open = true;
        self.watcher.activate(&self.document, self.id);
        amo_core::debug!(
            instance = %self.id,
            from = "closed",
            to = "open",
            side = %placement.side,
            "dropdown transition"
        );
        self.events.push(DropdownEvent::Opened);
    }

    fn close(&mut self) {
        self.watcher.deactivate();
        self.state.is_open = false;
        self.state.placement = None;
        self.close_handle.take();
        amo_core::debug!(instance = %self.id, from = "open", to = "closed", "dropdown transition");
        self.events.push(DropdownEvent::Closed);
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn dismiss(&mut self, reason: Dismissal) {
        amo_core::debug!(instance = %self.id, ?reason, "dismissal");
        self.request_close();
    }

    fn reposition(&mut self) -> bool {
        if !self.state.is_open {
            return false;
        }
        let refresh = self.geometry.refresh(self.measure.as_ref());
        self.state.trigger_bounds = self.geometry.trigger();
        self.state.viewport_bounds = self.geometry.viewport();
        if refresh.panel_first_measured {
            return self.refine_placement();
        }
        self.apply_placement(placement::resolve(&self.placement_input()))
    }

    fn refine_placement(&mut self) -> bool {
        let Some(settled) = self.state.resolved_placement() else {
            return false;
        };
        self.apply_placement(placement::refine(settled, &self.placement_input()))
    }

    fn apply_placement(&mut self, placement: ResolvedPlacement) -> bool {
        let changed = self.state.placement != Some(placement);
        self.state.placement = Some(placement);
        changed
    }

    fn placement_input(&self) -> PlacementInput {
        PlacementInput {
            trigger: self.geometry.trigger(),
            viewport: self.geometry.viewport(),
            preference: self.config.placement,
            offset: self.config.offset,
            panel: self.geometry.panel().size(),
        }
    }
}
