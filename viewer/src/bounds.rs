//! Translation bounds for a given zoom level.
//!
//! Bounds are a pure function of the current scaled image size against the
//! viewport, never of gesture history. An axis where the scaled image fits
//! inside the viewport is locked at zero (centered). An axis where it
//! overflows may pan until the image edge is `min_visible_margin` pixels
//! short of lining up with the matching viewport edge.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::geometry::Size;

/// Legal translation range, in screen pixels, on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds that allow no panning at all.
    #[must_use]
    pub fn centered() -> Self {
        Self { min_x: 0.0, max_x: 0.0, min_y: 0.0, max_y: 0.0 }
    }

    /// Clamp a translation into these bounds.
    #[must_use]
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
    }

    /// Whether a translation already lies inside these bounds.
    #[cfg(test)]
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::centered()
    }
}

/// Compute the translation bounds for `image` drawn at `zoom` in `viewport`.
#[must_use]
pub fn compute_bounds(zoom: f64, image: Size, viewport: Size, min_visible_margin: f64) -> Bounds {
    let limit_x = axis_limit(image.width * zoom, viewport.width, min_visible_margin);
    let limit_y = axis_limit(image.height * zoom, viewport.height, min_visible_margin);
    Bounds { min_x: -limit_x, max_x: limit_x, min_y: -limit_y, max_y: limit_y }
}

/// Half-range of legal translation along one axis.
fn axis_limit(scaled_extent: f64, viewport_extent: f64, min_visible_margin: f64) -> f64 {
    if scaled_extent <= viewport_extent {
        return 0.0;
    }
    let max_distance = scaled_extent * 0.5 - viewport_extent * 0.5;
    (max_distance - min_visible_margin).max(0.0)
}
