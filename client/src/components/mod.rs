//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the viewer stage and its chrome while reading/writing
//! shared state from Leptos context providers.

pub mod image_viewer;
pub mod zoom_controls;
