//! Zoom limits and step configuration.
//!
//! The host can override any field from JSON (for example a `data-config`
//! attribute); missing fields fall back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_ABSOLUTE_MIN_ZOOM, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM_STEP, KEY_PAN_STEP_PX,
    MIN_VISIBLE_MARGIN_PX,
};

/// Reasons a [`ViewerConfig`] is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed into a config.
    #[error("failed to parse viewer config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field that must be a positive, finite number is not.
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    /// A field that must be a non-negative, finite number is not.
    #[error("{field} must be a non-negative finite number, got {value}")]
    Negative { field: &'static str, value: f64 },
    /// The zoom limits are out of order.
    #[error("zoom limits out of order: absolute_min_zoom {absolute_min} <= min_zoom {min} <= max_zoom {max} is required")]
    ZoomRange { absolute_min: f64, min: f64, max: f64 },
}

/// Tunable zoom limits for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Ceiling for the dynamic minimum zoom.
    pub min_zoom: f64,
    /// Largest zoom factor; raised to the cover scale if that is larger.
    pub max_zoom: f64,
    /// Hard floor for the dynamic minimum zoom.
    pub absolute_min_zoom: f64,
    /// Zoom delta per wheel notch, button press, or key press.
    pub zoom_step: f64,
    /// Screen pixels of image kept in view on each panned axis.
    pub min_visible_margin: f64,
    /// Translation per arrow-key press.
    pub key_pan_step: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            absolute_min_zoom: DEFAULT_ABSOLUTE_MIN_ZOOM,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_visible_margin: MIN_VISIBLE_MARGIN_PX,
            key_pan_step: KEY_PAN_STEP_PX,
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a config from JSON. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// errors of [`ViewerConfig::validate`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_zoom", self.min_zoom)?;
        positive("max_zoom", self.max_zoom)?;
        positive("absolute_min_zoom", self.absolute_min_zoom)?;
        positive("zoom_step", self.zoom_step)?;
        non_negative("min_visible_margin", self.min_visible_margin)?;
        non_negative("key_pan_step", self.key_pan_step)?;
        if self.absolute_min_zoom > self.min_zoom || self.min_zoom > self.max_zoom {
            return Err(ConfigError::ZoomRange {
                absolute_min: self.absolute_min_zoom,
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 { Ok(()) } else { Err(ConfigError::Negative { field, value }) }
}
