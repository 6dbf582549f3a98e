//! Zoom/translation state and its invariant-preserving mutator.
//!
//! [`TransformState`] is the only place the committed [`Transform`] changes.
//! Every change goes through [`TransformState::apply_transform`], which clamps
//! zoom first and translation second (against the bounds of the clamped
//! zoom), then commits both in one assignment.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::bounds::{Bounds, compute_bounds};
use crate::config::ViewerConfig;
use crate::geometry::{Size, Transform};

/// Geometry that cannot back a transform.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The image has no natural size yet (still loading, or broken).
    #[error("image natural size {width}x{height} is not measurable")]
    UnmeasuredImage { width: f64, height: f64 },
    /// The viewport has collapsed to nothing (hidden, or not laid out).
    #[error("viewport size {width}x{height} is not measurable")]
    UnmeasuredViewport { width: f64, height: f64 },
}

/// Committed zoom/translation plus the limits derived for the current
/// image and viewport.
#[derive(Debug, Clone)]
pub struct TransformState {
    config: ViewerConfig,
    transform: Transform,
    initial_scale: f64,
    min_zoom: f64,
    max_zoom: f64,
    image: Size,
    viewport: Size,
}

impl TransformState {
    /// Build the state for a measured image and viewport, starting at the
    /// cover view, centered.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if either size is not measurable.
    pub fn new(config: ViewerConfig, image: Size, viewport: Size) -> Result<Self, GeometryError> {
        check_geometry(image, viewport)?;
        let mut state = Self {
            config,
            transform: Transform::default(),
            initial_scale: 1.0,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            image,
            viewport,
        };
        state.recompute_initial_scale(viewport, image)?;
        state.reset();
        Ok(state)
    }

    /// Clamp and commit a new zoom and translation.
    ///
    /// Zoom is clamped to `[min_zoom, max_zoom]`; translation is clamped to
    /// the bounds of the clamped zoom. Non-finite inputs keep the current
    /// value for that component. Returns the committed transform.
    pub fn apply_transform(&mut self, zoom: f64, translate_x: f64, translate_y: f64) -> Transform {
        let zoom = if zoom.is_finite() { zoom } else { self.transform.zoom };
        let translate_x = if translate_x.is_finite() { translate_x } else { self.transform.translate_x };
        let translate_y = if translate_y.is_finite() { translate_y } else { self.transform.translate_y };

        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        let (translate_x, translate_y) = self.bounds_at(zoom).clamp(translate_x, translate_y);
        self.transform = Transform { zoom, translate_x, translate_y };
        self.transform
    }

    /// Recompute the cover scale and zoom limits for new geometry.
    ///
    /// Sets zoom to the new cover scale and re-clamps the current
    /// translation. Unmeasurable geometry leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if either size is not measurable.
    pub fn recompute_initial_scale(&mut self, viewport: Size, image: Size) -> Result<(), GeometryError> {
        check_geometry(image, viewport)?;
        let initial_scale = (viewport.width / image.width).max(viewport.height / image.height);

        self.image = image;
        self.viewport = viewport;
        self.initial_scale = initial_scale;
        self.min_zoom = initial_scale
            .min(self.config.min_zoom)
            .max(self.config.absolute_min_zoom);
        self.max_zoom = self.config.max_zoom.max(initial_scale).max(self.min_zoom);

        let Transform { translate_x, translate_y, .. } = self.transform;
        self.apply_transform(initial_scale, translate_x, translate_y);
        Ok(())
    }

    /// Return to the cover view, centered.
    pub fn reset(&mut self) -> Transform {
        self.apply_transform(self.initial_scale, 0.0, 0.0)
    }

    /// Bounds that apply to translation at `zoom` for the current geometry.
    #[must_use]
    pub fn bounds_at(&self, zoom: f64) -> Bounds {
        compute_bounds(zoom, self.image, self.viewport, self.config.min_visible_margin)
    }

    /// Bounds for the committed zoom.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds_at(self.transform.zoom)
    }

    /// Clamp a candidate zoom without committing it.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Committed zoom as a whole percentage of the cover scale.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn zoom_percent_of_initial(&self) -> u32 {
        (self.transform.zoom / self.initial_scale * 100.0).round().max(0.0) as u32
    }

    /// Whether zooming in would change anything.
    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.transform.zoom < self.max_zoom
    }

    /// Whether zooming out would change anything.
    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.transform.zoom > self.min_zoom
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn initial_scale(&self) -> f64 {
        self.initial_scale
    }

    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    #[cfg(test)]
    #[must_use]
    pub fn absolute_min_zoom(&self) -> f64 {
        self.config.absolute_min_zoom
    }

    #[must_use]
    pub fn zoom_step(&self) -> f64 {
        self.config.zoom_step
    }

    #[must_use]
    pub fn image(&self) -> Size {
        self.image
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }
}

fn check_geometry(image: Size, viewport: Size) -> Result<(), GeometryError> {
    if !image.is_measured() {
        return Err(GeometryError::UnmeasuredImage { width: image.width, height: image.height });
    }
    if !viewport.is_measured() {
        return Err(GeometryError::UnmeasuredViewport { width: viewport.width, height: viewport.height });
    }
    Ok(())
}
