//! Input model: normalized events, buttons, keys, and the gesture state machine.
//!
//! Hosts translate their platform events into [`InputEvent`]s so the engine
//! never sees a DOM object. [`GestureState`] is the active gesture being
//! tracked between the events that start and end it, carrying the context
//! captured at its start.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::{Point, Size};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or pen contact).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"+"`, `"ArrowLeft"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    ZoomIn,
    ZoomOut,
    Reset,
    /// Move the image by whole key-pan steps along each axis.
    Pan { dx: f64, dy: f64 },
}

impl Key {
    /// Map the key to a viewer command, if it has one.
    #[must_use]
    pub fn command(&self) -> Option<KeyCommand> {
        match self.0.as_str() {
            "+" | "=" => Some(KeyCommand::ZoomIn),
            "-" | "_" => Some(KeyCommand::ZoomOut),
            "0" | "Home" => Some(KeyCommand::Reset),
            "ArrowLeft" => Some(KeyCommand::Pan { dx: 1.0, dy: 0.0 }),
            "ArrowRight" => Some(KeyCommand::Pan { dx: -1.0, dy: 0.0 }),
            "ArrowUp" => Some(KeyCommand::Pan { dx: 0.0, dy: 1.0 }),
            "ArrowDown" => Some(KeyCommand::Pan { dx: 0.0, dy: -1.0 }),
            _ => None,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// A host event, already classified and with interactive-control hits
/// filtered out.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Point, button: Button },
    PointerMove { position: Point },
    PointerUp { position: Point },
    /// Touches active after a finger went down.
    TouchStart { touches: Vec<Point> },
    /// Touches active after fingers moved.
    TouchMove { touches: Vec<Point> },
    /// Touches still active after a finger lifted.
    TouchEnd { touches: Vec<Point> },
    Wheel { position: Point, delta: WheelDelta },
    Key(Key),
    Resize(Size),
}

/// Context captured when a two-finger pinch starts.
///
/// Stays fixed for the whole pinch so the same image point remains under the
/// fingers even as their distance and midpoint drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSession {
    /// Screen-space midpoint of the two touches at pinch start.
    pub initial_center_screen: Point,
    /// Image-percent point under that midpoint at pinch start.
    pub initial_image_percent: Point,
    /// Committed zoom at pinch start.
    pub initial_zoom: f64,
    /// Finger separation at pinch start; zero until a real separation is seen.
    pub initial_distance: f64,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The user is panning with a mouse button or a single finger.
    Dragging {
        /// Pointer position minus translation at drag start.
        anchor: Point,
    },
    /// The user is zooming with two fingers.
    Pinching(PinchSession),
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching(_))
    }
}
