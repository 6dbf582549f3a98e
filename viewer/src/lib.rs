//! Pan/zoom engine for the full-viewport image viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but the
//! interesting part is host-independent: [`engine::EngineCore`] owns the
//! transform state and the gesture state machine and can be driven entirely
//! from tests. The host (the `client` crate) is responsible only for turning
//! DOM events into [`input::InputEvent`]s and for applying the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine, zoom operations, and testable [`engine::EngineCore`] |
//! | [`transform`] | Zoom/translation state and its single clamping mutator |
//! | [`bounds`] | Legal translation range for a zoom level and viewport |
//! | [`geometry`] | Points, sizes, and screen ↔ image-percent conversions |
//! | [`input`] | Normalized input events and the gesture state machine |
//! | [`config`] | Zoom limits and step configuration |
//! | [`consts`] | Shared numeric defaults |

pub mod bounds;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod transform;
