#![forbid(unsafe_code)]

//! Canonical host input events.
//!
//! The host UI tree (browser document, native window, test harness) converts
//! its own events into these types before handing them to components.
//!
//! # Design Notes
//!
//! - Pointer coordinates are viewport-relative CSS pixels.
//! - `KeyEventKind` defaults to `Press` when the host cannot tell.
//! - Modifier keys are not carried: no overlay behaviour depends on them.

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse, pen, touch) event.
    Pointer(PointerEvent),

    /// The viewport was resized.
    Resize {
        /// New viewport width in pixels.
        width: f32,
        /// New viewport height in pixels.
        height: f32,
    },

    /// The document or an ancestor scroll container scrolled.
    Scroll,

    /// Layout changed without a resize (element moved, content reflowed).
    Layout,
}

impl Event {
    /// Shorthand for a key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Shorthand for a primary-button press at the given position.
    #[must_use]
    pub const fn press(x: f32, y: f32) -> Self {
        Self::Pointer(PointerEvent::new(
            PointerEventKind::Down(PointerButton::Primary),
            x,
            y,
        ))
    }

    /// Whether this event changes geometry rather than expressing user intent.
    #[must_use]
    pub const fn is_geometry_change(&self) -> bool {
        matches!(self, Self::Resize { .. } | Self::Scroll | Self::Layout)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event of Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a press (or auto-repeat) of Escape.
    #[must_use]
    pub const fn is_escape(&self) -> bool {
        matches!(self.code, KeyCode::Escape)
            && matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Space bar.
    Space,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// X coordinate, viewport-relative.
    pub x: f32,

    /// Y coordinate, viewport-relative.
    pub y: f32,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Whether this is a button press, the event that counts as a click for
    /// toggling and dismissal.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down(_))
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Button released.
    Up(PointerButton),

    /// Pointer moved.
    Moved,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch.
    Primary,

    /// Right mouse button.
    Secondary,

    /// Middle mouse button.
    Auxiliary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_release_is_not_escape() {
        assert!(KeyEvent::new(KeyCode::Escape).is_escape());
        assert!(
            KeyEvent::new(KeyCode::Escape)
                .with_kind(KeyEventKind::Repeat)
                .is_escape()
        );
        assert!(
            !KeyEvent::new(KeyCode::Escape)
                .with_kind(KeyEventKind::Release)
                .is_escape()
        );
        assert!(!KeyEvent::new(KeyCode::Enter).is_escape());
    }

    #[test]
    fn press_shorthand() {
        let Event::Pointer(p) = Event::press(3.0, 4.0) else {
            panic!("expected pointer event");
        };
        assert!(p.is_press());
        assert_eq!(p.position(), (3.0, 4.0));
        assert_eq!(p.kind, PointerEventKind::Down(PointerButton::Primary));
    }

    #[test]
    fn moved_and_up_are_not_presses() {
        assert!(!PointerEvent::new(PointerEventKind::Moved, 0.0, 0.0).is_press());
        assert!(
            !PointerEvent::new(PointerEventKind::Up(PointerButton::Primary), 0.0, 0.0).is_press()
        );
    }

    #[test]
    fn geometry_changes() {
        assert!(
            Event::Resize {
                width: 10.0,
                height: 10.0
            }
            .is_geometry_change()
        );
        assert!(Event::Scroll.is_geometry_change());
        assert!(Event::Layout.is_geometry_change());
        assert!(!Event::key(KeyCode::Escape).is_geometry_change());
    }
}
