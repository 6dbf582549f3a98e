//! Shared numeric constants for the viewer crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Ceiling for the dynamic minimum zoom. The effective minimum is lowered to
/// the cover scale when the image is smaller than this at its initial view.
pub const DEFAULT_MIN_ZOOM: f64 = 0.5;

/// Largest zoom factor reachable by any gesture.
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;

/// Hard floor for the dynamic minimum zoom.
pub const DEFAULT_ABSOLUTE_MIN_ZOOM: f64 = 0.1;

/// Zoom delta applied per wheel notch, button press, or key press.
pub const DEFAULT_ZOOM_STEP: f64 = 0.25;

// ── Panning ─────────────────────────────────────────────────────

/// Screen pixels of image that must stay visible on every panned axis.
pub const MIN_VISIBLE_MARGIN_PX: f64 = 100.0;

/// Translation applied per arrow-key press, in screen pixels.
pub const KEY_PAN_STEP_PX: f64 = 50.0;

// ── Gestures ────────────────────────────────────────────────────

/// Finger separations at or below this are treated as zero.
pub const MIN_PINCH_DISTANCE_PX: f64 = 1e-6;

/// Zoom changes smaller than this are treated as no change.
pub const ZOOM_EPSILON: f64 = 1e-9;
