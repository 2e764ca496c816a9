#![forbid(unsafe_code)]

//! Construction options.
//!
//! [`DropdownOptions`] is the loose, host-facing shape (strings, camelCase
//! JSON keys). [`DropdownConfig`] is what an instance actually runs with;
//! converting never fails; bad values fall back to defaults with a warning.

use std::fmt;

use amo_core::geometry::Size;
use serde::{Deserialize, Serialize};

use crate::placement::{ASSUMED_PANEL_HEIGHT, ASSUMED_PANEL_WIDTH, PlacementPreference};

/// Default gap between trigger and panel, in pixels.
pub const DEFAULT_OFFSET: f32 = 8.0;

/// Default CSS minimum width of the panel.
pub const DEFAULT_MIN_WIDTH: &str = "180px";

const PANEL_BASE_CLASS: &str = "amo-dropdown__panel";

/// Host-facing construction options, as written in markup or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DropdownOptions {
    /// `auto`, `top` or `bottom`.
    pub placement: String,
    /// Close when the panel content is clicked.
    pub close_on_click: bool,
    /// Width token, e.g. `"96"` for a `w-96` panel.
    pub width: Option<String>,
    /// CSS minimum width.
    pub min_width: String,
    /// Extra classes for the panel.
    pub content_class: String,
    /// Gap between trigger and panel, in pixels.
    pub offset: f32,
}

impl Default for DropdownOptions {
    fn default() -> Self {
        Self {
            placement: PlacementPreference::Auto.as_str().to_owned(),
            close_on_click: false,
            width: None,
            min_width: DEFAULT_MIN_WIDTH.to_owned(),
            content_class: String::new(),
            offset: DEFAULT_OFFSET,
        }
    }
}

impl DropdownOptions {
    /// Parse options from a JSON object. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(json).map_err(OptionsError::Json)
    }
}

/// Options that could not be read at all.
#[derive(Debug)]
pub enum OptionsError {
    /// Malformed JSON or a value of the wrong type.
    Json(serde_json::Error),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid dropdown options: {err}"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

/// Cosmetic panel settings, passed through to the rendered panel untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelStyle {
    pub width: Option<String>,
    pub min_width: String,
    pub content_class: String,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            width: None,
            min_width: DEFAULT_MIN_WIDTH.to_owned(),
            content_class: String::new(),
        }
    }
}

impl PanelStyle {
    /// Classes for the panel element: base class, width class, extras.
    pub fn class_list(&self) -> Vec<String> {
        let mut classes = vec![PANEL_BASE_CLASS.to_owned()];
        if let Some(width) = self.width.as_deref().map(str::trim).filter(|w| !w.is_empty()) {
            classes.push(format!("w-{width}"));
        }
        classes.extend(self.content_class.split_whitespace().map(str::to_owned));
        classes
    }

    /// `min_width` in pixels, when it is written as a plain `px` value.
    pub fn min_width_px(&self) -> Option<f32> {
        self.min_width
            .trim()
            .strip_suffix("px")
            .and_then(|n| n.trim().parse::<f32>().ok())
            .filter(|n| n.is_finite() && *n >= 0.0)
    }
}

/// Immutable per-instance configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownConfig {
    pub placement: PlacementPreference,
    pub close_on_content_click: bool,
    /// Gap between trigger and panel, in pixels.
    pub offset: f32,
    /// Panel size assumed until the panel has been measured.
    pub panel_estimate: Size,
    pub style: PanelStyle,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            placement: PlacementPreference::Auto,
            close_on_content_click: false,
            offset: DEFAULT_OFFSET,
            panel_estimate: Size::new(ASSUMED_PANEL_WIDTH, ASSUMED_PANEL_HEIGHT),
            style: PanelStyle::default(),
        }
    }
}

impl DropdownConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn placement(mut self, placement: PlacementPreference) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn close_on_content_click(mut self, close: bool) -> Self {
        self.close_on_content_click = close;
        self
    }

    /// Set the trigger/panel gap. Negative values clamp to zero; non-finite
    /// values keep the default.
    #[must_use]
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = sanitize_offset(offset);
        self
    }

    /// Set the panel size assumed before first measurement.
    #[must_use]
    pub fn panel_estimate(mut self, estimate: Size) -> Self {
        if estimate.is_valid() {
            self.panel_estimate = estimate;
        } else {
            amo_core::warn!(?estimate, "invalid panel estimate ignored");
        }
        self
    }

    #[must_use]
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.style.width = Some(width.into());
        self
    }

    #[must_use]
    pub fn min_width(mut self, min_width: impl Into<String>) -> Self {
        self.style.min_width = min_width.into();
        self
    }

    #[must_use]
    pub fn content_class(mut self, class: impl Into<String>) -> Self {
        self.style.content_class = class.into();
        self
    }
}

impl From<DropdownOptions> for DropdownConfig {
    fn from(options: DropdownOptions) -> Self {
        let style = PanelStyle {
            width: options.width,
            min_width: options.min_width,
            content_class: options.content_class,
        };
        let estimate_width = style.min_width_px().unwrap_or(ASSUMED_PANEL_WIDTH);
        Self {
            placement: PlacementPreference::parse_lenient(&options.placement),
            close_on_content_click: options.close_on_click,
            offset: sanitize_offset(options.offset),
            panel_estimate: Size::new(estimate_width, ASSUMED_PANEL_HEIGHT),
            style,
        }
    }
}

fn sanitize_offset(offset: f32) -> f32 {
    if !offset.is_finite() {
        amo_core::warn!(offset, "non-finite offset, using default");
        DEFAULT_OFFSET
    } else if offset < 0.0 {
        amo_core::warn!(offset, "negative offset clamped to zero");
        0.0
    } else {
        offset
    }
}
