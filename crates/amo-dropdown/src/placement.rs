#![forbid(unsafe_code)]

//! Placement resolution for the floating panel.
//!
//! Given the trigger's bounds, the viewport, the caller's preference, the
//! trigger/panel gap and a panel height, decide which side of the trigger the
//! panel goes on and where exactly it lands.
//!
//! # Algorithm
//!
//! - `Top` / `Bottom` preferences are honoured unconditionally, even when the
//!   panel clips.
//! - `Auto` measures `space_below = viewport.bottom - trigger.bottom` and
//!   `space_above = trigger.top - viewport.top`, and flips to `Top` only when
//!   below is insufficient (`space_below < panel_height + offset`) *and* there
//!   is strictly more room above. Ties go to `Bottom`.
//! - The panel is left-aligned with the trigger. Vertically it sits `offset`
//!   pixels below the trigger's bottom edge, or `offset` pixels above its top
//!   edge with its own height subtracted.
//!
//! # Failure Modes
//!
//! - Non-finite geometry makes every comparison false, so `Auto` lands on
//!   `Bottom`.
//! - An empty viewport (never measured) also resolves `Auto` to `Bottom`.
//! - Horizontal overflow is not corrected: the panel stays anchored to the
//!   trigger's left edge.

use std::fmt;
use std::str::FromStr;

use amo_core::geometry::{Rect, Size};

/// Panel height assumed before the panel has been measured.
pub const ASSUMED_PANEL_HEIGHT: f32 = 120.0;

/// Panel width assumed before the panel has been measured.
pub const ASSUMED_PANEL_WIDTH: f32 = 180.0;

/// Caller-requested side for the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlacementPreference {
    /// Pick a side from the available space.
    #[default]
    Auto,
    /// Always above the trigger.
    Top,
    /// Always below the trigger.
    Bottom,
}

impl PlacementPreference {
    /// Parse a host-supplied value, treating anything unrecognised as `Auto`.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn parse_lenient(value: &str) -> Self {
        match value.parse() {
            Ok(pref) => pref,
            Err(err) => {
                amo_core::warn!(error = %err, "invalid placement, falling back to auto");
                Self::Auto
            }
        }
    }

    /// The lowercase name used by host options.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for PlacementPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlacementPreference {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if trimmed.eq_ignore_ascii_case("top") {
            Ok(Self::Top)
        } else if trimmed.eq_ignore_ascii_case("bottom") {
            Ok(Self::Bottom)
        } else {
            Err(ParsePlacementError {
                value: s.to_owned(),
            })
        }
    }
}

/// A placement string that is not one of `auto`, `top`, `bottom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlacementError {
    value: String,
}

impl ParsePlacementError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown placement {:?} (expected auto, top, or bottom)",
            self.value
        )
    }
}

impl std::error::Error for ParsePlacementError {}

/// The side the panel is actually rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

/// Panel size used for placement, and whether it came from a real measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEstimate {
    /// Not yet painted; a conservative assumption.
    Assumed(Size),
    /// Measured from the rendered panel.
    Measured(Size),
}

impl PanelEstimate {
    /// The size either way.
    pub const fn size(&self) -> Size {
        match *self {
            Self::Assumed(size) | Self::Measured(size) => size,
        }
    }

    /// Whether the size came from the rendered panel.
    pub const fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

impl Default for PanelEstimate {
    fn default() -> Self {
        Self::Assumed(Size::new(ASSUMED_PANEL_WIDTH, ASSUMED_PANEL_HEIGHT))
    }
}

/// Everything the resolver looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    pub trigger: Rect,
    pub viewport: Rect,
    pub preference: PlacementPreference,
    /// Gap between trigger and panel.
    pub offset: f32,
    pub panel: Size,
}

impl PlacementInput {
    /// Room between the trigger's bottom edge and the viewport's bottom edge.
    pub fn space_below(&self) -> f32 {
        self.viewport.bottom() - self.trigger.bottom()
    }

    /// Room between the viewport's top edge and the trigger's top edge.
    pub fn space_above(&self) -> f32 {
        self.trigger.top() - self.viewport.top()
    }
}

/// Result of a placement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPlacement {
    pub side: Side,
    /// Final panel rectangle in viewport coordinates.
    pub panel: Rect,
}

impl ResolvedPlacement {
    /// Whether the panel runs past the top or bottom of the viewport.
    pub fn clips_vertically(&self, viewport: &Rect) -> bool {
        self.panel.top() < viewport.top() || self.panel.bottom() > viewport.bottom()
    }
}

/// Pick a side for the panel.
pub fn choose_side(input: &PlacementInput) -> Side {
    match input.preference {
        PlacementPreference::Top => Side::Top,
        PlacementPreference::Bottom => Side::Bottom,
        PlacementPreference::Auto => {
            if input.viewport.is_empty() {
                return Side::Bottom;
            }
            let space_below = input.space_below();
            let space_above = input.space_above();
            let needed = input.panel.height + input.offset;
            if space_below < needed && space_above > space_below {
                Side::Top
            } else {
                Side::Bottom
            }
        }
    }
}

/// Panel rectangle for a given side.
pub fn panel_rect(input: &PlacementInput, side: Side) -> Rect {
    let y = match side {
        Side::Bottom => input.trigger.bottom() + input.offset,
        Side::Top => input.trigger.top() - input.panel.height - input.offset,
    };
    Rect::new(input.trigger.left(), y, input.panel.width, input.panel.height)
}

/// Run the full placement algorithm.
pub fn resolve(input: &PlacementInput) -> ResolvedPlacement {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "dropdown.resolve",
        preference = %input.preference,
        space_above = input.space_above(),
        space_below = input.space_below(),
    )
    .entered();

    let side = choose_side(input);
    amo_core::trace!(resolved = %side, "placement resolved");
    ResolvedPlacement {
        side,
        panel: panel_rect(input, side),
    }
}

/// Re-run placement after the panel's real size became known.
///
/// The panel keeps the side it already settled on unless, at its measured
/// size, it would clip on that side. Explicit preferences go through
/// [`resolve`] as usual.
pub fn refine(settled: Side, input: &PlacementInput) -> ResolvedPlacement {
    if input.preference != PlacementPreference::Auto {
        return resolve(input);
    }
    let kept = ResolvedPlacement {
        side: settled,
        panel: panel_rect(input, settled),
    };
    if !kept.clips_vertically(&input.viewport) {
        return kept;
    }
    let fresh = resolve(input);
    if fresh.side != settled {
        amo_core::debug!(from = %settled, to = %fresh.side, "measured panel clips, flipping");
    }
    fresh
}
