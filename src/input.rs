//! Input model: pointer kinds, mouse buttons, and the press state machine.
//!
//! Mouse and touch events are both reduced to a list of [`Pointer`]s in
//! canvas-local CSS pixels. Only the first entry, the primary pointer, drives
//! panning, hover and click detection. `InputState` is the gesture being
//! tracked between press and release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::viewport::Point;

/// Which device produced a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// One active pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Mouse, x, y }
    }

    #[must_use]
    pub fn touch(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Touch, x, y }
    }

    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button, or any touch.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Internal state for the press state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No pointer is down.
    #[default]
    Idle,
    /// A primary pointer is down.
    Pressed {
        /// Pointers seen by the most recent event, primary first.
        pointers: Vec<Pointer>,
        /// Pointers at the moment of the press, used to measure drag distance.
        initial: Vec<Pointer>,
    },
}

impl InputState {
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        matches!(self, Self::Pressed { .. })
    }

    /// Primary pointer from the most recent event while pressed.
    #[must_use]
    pub fn primary(&self) -> Option<Pointer> {
        match self {
            Self::Idle => None,
            Self::Pressed { pointers, .. } => pointers.first().copied(),
        }
    }

    /// Primary pointer at the moment of the press.
    #[must_use]
    pub fn initial_primary(&self) -> Option<Pointer> {
        match self {
            Self::Idle => None,
            Self::Pressed { initial, .. } => initial.first().copied(),
        }
    }
}
