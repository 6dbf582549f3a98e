//! Screen/image coordinate mapping.
//!
//! Screen space is CSS pixels with the origin at the viewport's top-left
//! corner. Image-percent space is relative to the image's natural extent:
//! `(0, 0)` is the image's top-left corner, `(0.5, 0.5)` its center, and
//! `(1, 1)` its bottom-right corner, independent of zoom.
//!
//! Translation is measured from the viewport center to the image center, so
//! a [`Transform`] with zero translation shows the image centered.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in screen space or image-percent space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point { x: (self.x + other.x) * 0.5, y: (self.y + other.y) * 0.5 }
    }
}

/// Width/height pair for the image's natural size or the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both extents are finite and positive.
    ///
    /// An image reports `0 × 0` until it has loaded; none of the mapping math
    /// is meaningful before then.
    #[must_use]
    pub fn is_measured(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Screen-space center of a viewport of this size.
    #[must_use]
    pub fn center(self) -> Point {
        Point { x: self.width * 0.5, y: self.height * 0.5 }
    }
}

/// Zoom and translation as applied by the renderer.
///
/// `zoom` is a scale factor over the image's natural size.
/// `translate_x` / `translate_y` are the screen-pixel offset of the image
/// center from the viewport center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub zoom: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { zoom: 1.0, translate_x: 0.0, translate_y: 0.0 }
    }
}

impl Transform {
    #[must_use]
    pub fn new(zoom: f64, translate_x: f64, translate_y: f64) -> Self {
        Self { zoom, translate_x, translate_y }
    }
}

/// Convert a screen point to image-percent coordinates under `transform`.
///
/// Returns `None` when the image has not been measured yet or the zoom is
/// not positive; callers treat that as "nothing to anchor to".
#[must_use]
pub fn screen_to_image_percent(screen: Point, transform: Transform, viewport: Size, image: Size) -> Option<Point> {
    if !image.is_measured() || transform.zoom <= 0.0 {
        return None;
    }
    let center = viewport.center();
    let local_x = (screen.x - center.x - transform.translate_x) / transform.zoom;
    let local_y = (screen.y - center.y - transform.translate_y) / transform.zoom;
    Some(Point { x: local_x / image.width + 0.5, y: local_y / image.height + 0.5 })
}

/// Convert image-percent coordinates to a screen point under a hypothetical
/// `transform`.
///
/// The transform does not have to be the committed one, so callers can ask
/// where an image point would land before deciding to apply a change.
#[must_use]
pub fn image_percent_to_screen(percent: Point, transform: Transform, viewport: Size, image: Size) -> Point {
    let center = viewport.center();
    Point {
        x: (percent.x - 0.5) * image.width * transform.zoom + transform.translate_x + center.x,
        y: (percent.y - 0.5) * image.height * transform.zoom + transform.translate_y + center.y,
    }
}

/// Translation that puts image point `percent` at `screen` when drawn at `zoom`.
///
/// Solves [`image_percent_to_screen`] for the translation. The result is not
/// clamped; the caller commits it through the transform state.
#[must_use]
pub fn translation_for_anchor(percent: Point, screen: Point, zoom: f64, viewport: Size, image: Size) -> (f64, f64) {
    let center = viewport.center();
    (
        screen.x - center.x - (percent.x - 0.5) * image.width * zoom,
        screen.y - center.y - (percent.y - 0.5) * image.height * zoom,
    )
}
