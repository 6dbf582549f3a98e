//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves the built viewer client as static files. Trunk writes the HTML
//! shell and its hashed `.js`/`.wasm` bundle to the site root, and those are
//! revalidated on every load. `assets/` holds content-addressed files copied
//! in at deploy time and is cached as immutable. `images/` is cached for a
//! configurable time.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Router;
use axum::http::header::{self, HeaderValue, InvalidHeaderValue};
use axum::http::{Response, StatusCode};
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::{MakeHeaderValue, SetResponseHeader};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// `Cache-Control` value for `max_age_secs`, marked immutable for
/// content-addressed files.
#[must_use]
pub fn cache_control(max_age_secs: u64, immutable: bool) -> String {
    if immutable {
        format!("public, max-age={max_age_secs}, immutable")
    } else {
        format!("public, max-age={max_age_secs}")
    }
}

/// Sets `Cache-Control` only on successful responses so misses are never
/// pinned in browser caches.
#[derive(Clone)]
struct CacheOnSuccess(HeaderValue);

impl<B> MakeHeaderValue<Response<B>> for CacheOnSuccess {
    fn make_header_value(&mut self, response: &Response<B>) -> Option<HeaderValue> {
        response.status().is_success().then(|| self.0.clone())
    }
}

fn cached_dir(dir: std::path::PathBuf, cache_control: HeaderValue) -> SetResponseHeader<ServeDir, CacheOnSuccess> {
    SetResponseHeader::overriding(ServeDir::new(dir), header::CACHE_CONTROL, CacheOnSuccess(cache_control))
}

/// Build the application router.
///
/// # Errors
///
/// Returns an error if a configured max-age cannot be encoded as a header.
pub fn app(config: &ServerConfig) -> Result<Router, InvalidHeaderValue> {
    let site = &config.site_dir;
    let assets = cached_dir(
        site.join("assets"),
        HeaderValue::from_str(&cache_control(config.asset_cache_max_age_secs, true))?,
    );
    let images = cached_dir(
        site.join("images"),
        HeaderValue::from_str(&cache_control(config.image_cache_max_age_secs, false))?,
    );
    let pages = SetResponseHeader::overriding(
        ServeDir::new(site).append_index_html_on_directories(true),
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache"),
    );

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/assets", assets)
        .nest_service("/images", images)
        .fallback_service(pages)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
