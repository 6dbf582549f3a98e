//! Viewer telemetry used by the zoom controls.
//!
//! ARCHITECTURE
//! ============
//! `ImageViewer` owns the engine and publishes a snapshot through this struct
//! after every action batch, so `ZoomControls` can render button enablement
//! and the status line without touching the engine.

#[cfg(test)]
#[path = "viewer_view_test.rs"]
mod viewer_view_test;

use viewer::engine::EngineCore;

/// Image load progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// Live viewer snapshot consumed by chrome.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerViewState {
    pub load: LoadStatus,
    /// Whether the engine has both sizes and is handling input.
    pub ready: bool,
    /// Committed zoom as a percentage of the cover scale.
    pub zoom_percent: u32,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
}

impl Default for ViewerViewState {
    fn default() -> Self {
        Self { load: LoadStatus::Loading, ready: false, zoom_percent: 100, can_zoom_in: false, can_zoom_out: false }
    }
}

impl ViewerViewState {
    /// Copy the engine-derived fields from `core`, keeping the load status.
    pub fn sync_from(&mut self, core: &EngineCore) {
        self.ready = core.is_ready();
        self.zoom_percent = core.zoom_percent_of_initial().unwrap_or(100);
        self.can_zoom_in = core.can_zoom_in();
        self.can_zoom_out = core.can_zoom_out();
    }

    /// Text for the `aria-live` status region.
    #[must_use]
    pub fn status_text(&self) -> String {
        match (self.load, self.ready) {
            (LoadStatus::Failed, _) => "Image failed to load".to_owned(),
            (_, false) => "Loading image".to_owned(),
            (_, true) => format!("Zoom {}%", self.zoom_percent),
        }
    }

    /// Reset is only useful once something can be moved.
    #[must_use]
    pub fn can_reset(&self) -> bool {
        self.ready
    }
}
