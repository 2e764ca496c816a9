#![forbid(unsafe_code)]

//! Host geometry source and the last-known-good cache in front of it.
//!
//! Measurement can fail at any time (element detached, not yet laid out,
//! host returned garbage). Failures never propagate: the cache keeps the
//! last good value, or [`Rect::ZERO`] if there never was one, and the next
//! geometry tick measures again.

use std::cell::RefCell;
use std::rc::Rc;

use amo_core::geometry::{Rect, Size};

use crate::placement::PanelEstimate;

/// Reads live geometry from the host UI tree.
///
/// Every method returns `None` when the value cannot be read right now.
pub trait Measure {
    /// Trigger bounds, viewport-relative.
    fn trigger_bounds(&self) -> Option<Rect>;

    /// Viewport size.
    fn viewport(&self) -> Option<Size>;

    /// Size of the rendered panel, once it has been painted.
    fn panel_size(&self) -> Option<Size>;
}

#[derive(Debug, Clone, Default)]
struct GeometrySlots {
    trigger: Option<Rect>,
    viewport: Option<Size>,
    panel: Option<Size>,
}

/// Host-writable geometry shared between the host and a dropdown.
///
/// Cloning yields another handle to the same values, so a host (or a test)
/// can keep one handle and give another to [`crate::Dropdown`].
#[derive(Debug, Clone, Default)]
pub struct SharedGeometry {
    slots: Rc<RefCell<GeometrySlots>>,
}

impl SharedGeometry {
    /// Empty geometry: every read fails until set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry with a known trigger and viewport.
    pub fn with(trigger: Rect, viewport: Size) -> Self {
        let geometry = Self::new();
        geometry.set_trigger(Some(trigger));
        geometry.set_viewport(Some(viewport));
        geometry
    }

    pub fn set_trigger(&self, trigger: Option<Rect>) {
        self.slots.borrow_mut().trigger = trigger;
    }

    pub fn set_viewport(&self, viewport: Option<Size>) {
        self.slots.borrow_mut().viewport = viewport;
    }

    pub fn set_panel(&self, panel: Option<Size>) {
        self.slots.borrow_mut().panel = panel;
    }
}

impl Measure for SharedGeometry {
    fn trigger_bounds(&self) -> Option<Rect> {
        self.slots.borrow().trigger
    }

    fn viewport(&self) -> Option<Size> {
        self.slots.borrow().viewport
    }

    fn panel_size(&self) -> Option<Size> {
        self.slots.borrow().panel
    }
}

/// What a refresh managed to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refresh {
    pub trigger_fresh: bool,
    pub viewport_fresh: bool,
    /// The panel went from assumed to measured during this refresh.
    pub panel_first_measured: bool,
}

/// Last known good geometry for one dropdown.
#[derive(Debug, Clone)]
pub struct GeometryCache {
    trigger: Rect,
    viewport: Rect,
    panel: PanelEstimate,
}

impl GeometryCache {
    /// Start from zero rects and the given panel assumption.
    pub fn new(assumed_panel: Size) -> Self {
        Self {
            trigger: Rect::ZERO,
            viewport: Rect::ZERO,
            panel: PanelEstimate::Assumed(assumed_panel),
        }
    }

    pub fn trigger(&self) -> Rect {
        self.trigger
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn panel(&self) -> PanelEstimate {
        self.panel
    }

    /// Re-read trigger, viewport and panel size, keeping old values on failure.
    pub fn refresh(&mut self, measure: &dyn Measure) -> Refresh {
        let mut report = Refresh::default();

        match measure.trigger_bounds().filter(Rect::is_finite) {
            Some(trigger) => {
                self.trigger = trigger;
                report.trigger_fresh = true;
            }
            None => {
                amo_core::warn!(last_known = ?self.trigger, "trigger measurement failed");
            }
        }

        match measure.viewport().filter(Size::is_valid) {
            Some(size) => {
                self.viewport = size.to_rect();
                report.viewport_fresh = true;
            }
            None => {
                amo_core::warn!(last_known = ?self.viewport, "viewport measurement failed");
            }
        }

        let was_measured = self.panel.is_measured();
        self.refresh_panel(measure);
        report.panel_first_measured = !was_measured && self.panel.is_measured();
        report
    }

    /// Re-read only the panel size. Returns true when the panel size in use
    /// changed: the first real measurement, or any later one that differs.
    pub fn refresh_panel(&mut self, measure: &dyn Measure) -> bool {
        let Some(size) = measure
            .panel_size()
            .filter(|s| s.is_valid() && s.height > 0.0)
        else {
            return false;
        };
        let changed = self.panel != PanelEstimate::Measured(size);
        self.panel = PanelEstimate::Measured(size);
        changed
    }

    /// Trigger bounds for hit-testing: live if readable, else last known.
    pub fn trigger_for_hit_test(&self, measure: &dyn Measure) -> Rect {
        measure
            .trigger_bounds()
            .filter(Rect::is_finite)
            .unwrap_or(self.trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_reads_keep_last_known() {
        let geometry = SharedGeometry::with(
            Rect::new(10.0, 20.0, 30.0, 40.0),
            Size::new(800.0, 600.0),
        );
        let mut cache = GeometryCache::new(Size::new(180.0, 120.0));
        let report = cache.refresh(&geometry);
        assert!(report.trigger_fresh && report.viewport_fresh);

        geometry.set_trigger(None);
        geometry.set_viewport(None);
        let report = cache.refresh(&geometry);
        assert!(!report.trigger_fresh && !report.viewport_fresh);
        assert_eq!(cache.trigger(), Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(cache.viewport(), Rect::from_size(800.0, 600.0));
    }

    #[test]
    fn never_measured_is_zero() {
        let mut cache = GeometryCache::new(Size::new(180.0, 120.0));
        cache.refresh(&SharedGeometry::new());
        assert_eq!(cache.trigger(), Rect::ZERO);
        assert_eq!(cache.viewport(), Rect::ZERO);
        assert!(!cache.panel().is_measured());
    }

    #[test]
    fn non_finite_trigger_is_a_failure() {
        let geometry = SharedGeometry::new();
        geometry.set_trigger(Some(Rect::new(f32::NAN, 0.0, 1.0, 1.0)));
        let mut cache = GeometryCache::new(Size::new(180.0, 120.0));
        assert!(!cache.refresh(&geometry).trigger_fresh);
        assert_eq!(cache.trigger(), Rect::ZERO);
    }

    #[test]
    fn panel_refresh_reports_size_changes() {
        let geometry = SharedGeometry::new();
        let mut cache = GeometryCache::new(Size::new(180.0, 120.0));
        assert!(!cache.refresh_panel(&geometry));

        geometry.set_panel(Some(Size::new(200.0, 90.0)));
        assert!(cache.refresh_panel(&geometry));
        assert!(!cache.refresh_panel(&geometry));
        assert_eq!(cache.panel(), PanelEstimate::Measured(Size::new(200.0, 90.0)));

        geometry.set_panel(Some(Size::new(200.0, 400.0)));
        assert!(cache.refresh_panel(&geometry));
        assert_eq!(cache.panel(), PanelEstimate::Measured(Size::new(200.0, 400.0)));
    }

    #[test]
    fn first_measurement_flagged_only_once_by_refresh() {
        let geometry = SharedGeometry::with(Rect::new(0.0, 0.0, 10.0, 10.0), Size::new(100.0, 100.0));
        let mut cache = GeometryCache::new(Size::new(180.0, 120.0));
        assert!(!cache.refresh(&geometry).panel_first_measured);

        geometry.set_panel(Some(Size::new(50.0, 60.0)));
        assert!(cache.refresh(&geometry).panel_first_measured);

        geometry.set_panel(Some(Size::new(50.0, 90.0)));
        assert!(!cache.refresh(&geometry).panel_first_measured);
    }

    #[test]
    fn zero_height_panel_is_not_a_measurement() {
        let geometry = SharedGeometry::new();
        geometry.set_panel(Some(Size::new(200.0, 0.0)));
        let mut cache = GeometryCache::new(Size::new(180.0, 120.0));
        assert!(!cache.refresh_panel(&geometry));
    }

    #[test]
    fn hit_test_prefers_live_bounds() {
        let geometry = SharedGeometry::with(Rect::new(0.0, 0.0, 10.0, 10.0), Size::new(100.0, 100.0));
        let mut cache = GeometryCache::new(Size::new(180.0, 120.0));
        cache.refresh(&geometry);
        geometry.set_trigger(Some(Rect::new(50.0, 50.0, 10.0, 10.0)));
        assert_eq!(cache.trigger_for_hit_test(&geometry), Rect::new(50.0, 50.0, 10.0, 10.0));
        geometry.set_trigger(None);
        assert_eq!(cache.trigger_for_hit_test(&geometry), Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
