//! Page configuration: which image to show and how the viewer behaves.
//!
//! The image comes from the `?src=` (and optional `?alt=`) query parameters.
//! Viewer limits come from an optional inline JSON block
//! (`<script id="viewer-config" type="application/json">`) in `index.html`.
//! Anything missing or malformed falls back to the defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use viewer::config::ViewerConfig;

/// Image shown when the page has no usable `?src=`.
pub const DEFAULT_IMAGE_SRC: &str = "/images/default.jpg";

/// Alt text used when the page has no `?alt=`.
pub const DEFAULT_IMAGE_ALT: &str = "Image";

/// Element id of the inline viewer config block.
pub const VIEWER_CONFIG_ELEMENT_ID: &str = "viewer-config";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub image_src: String,
    pub image_alt: String,
    pub viewer: ViewerConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            image_src: DEFAULT_IMAGE_SRC.to_owned(),
            image_alt: DEFAULT_IMAGE_ALT.to_owned(),
            viewer: ViewerConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Build from raw page inputs, substituting defaults for anything
    /// missing or rejected.
    #[must_use]
    pub fn from_inputs(src: Option<&str>, alt: Option<&str>, viewer_json: Option<&str>) -> Self {
        let image_src = match src.map(str::trim) {
            Some(src) if is_allowed_src(src) => src.to_owned(),
            Some(src) => {
                log::warn!("ignoring image source {src:?}; using {DEFAULT_IMAGE_SRC}");
                DEFAULT_IMAGE_SRC.to_owned()
            }
            None => DEFAULT_IMAGE_SRC.to_owned(),
        };
        let image_alt = alt
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .unwrap_or(DEFAULT_IMAGE_ALT)
            .to_owned();
        let viewer = match viewer_json.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => ViewerConfig::from_json(raw).unwrap_or_else(|err| {
                log::warn!("invalid viewer config, using defaults: {err}");
                ViewerConfig::default()
            }),
            None => ViewerConfig::default(),
        };
        Self { image_src, image_alt, viewer }
    }

    /// Read the current page's query string and inline config block.
    #[cfg(feature = "csr")]
    pub fn from_page() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let params = window
            .location()
            .search()
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search));
        let (src, alt) = match params {
            Ok(params) => (params.get("src"), params.get("alt")),
            Err(err) => {
                log::warn!("unreadable query string: {err:?}");
                (None, None)
            }
        };
        let viewer_json = window
            .document()
            .and_then(|doc| doc.get_element_by_id(VIEWER_CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_inputs(src.as_deref(), alt.as_deref(), viewer_json.as_deref())
    }
}

/// Accept site-relative paths and http(s) URLs; reject other schemes.
#[must_use]
pub fn is_allowed_src(src: &str) -> bool {
    if src.is_empty() || src.starts_with("//") {
        return false;
    }
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        return true;
    }
    let lower = src.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return true;
    }
    // A bare relative path has no scheme separator before its first slash.
    match src.find(':') {
        None => true,
        Some(colon) => src.find('/').is_some_and(|slash| slash < colon),
    }
}
