//! DOM event to viewer input mapping.
//!
//! All positions handed to the engine are relative to the stage element's
//! top-left corner, computed from client coordinates so events targeting the
//! image (a child of the stage) land in the same space.

#[cfg(test)]
#[path = "viewer_input_test.rs"]
mod viewer_input_test;

use viewer::geometry::Point;
use viewer::input::{Button, Key};

/// CSS selector for interactive chrome that must never start a drag.
pub const CONTROL_SELECTOR: &str = ".viewer-control";

pub fn map_button(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

/// Touch pointers are handled by the touch listeners instead.
pub fn is_touch_pointer(pointer_type: &str) -> bool {
    pointer_type == "touch"
}

/// Map a key press to an engine key, unless a modifier hands it to the
/// browser (e.g. Ctrl/Cmd + `+` page zoom).
pub fn viewer_key(key: &str, ctrl: bool, meta: bool, alt: bool) -> Option<Key> {
    if ctrl || meta || alt {
        return None;
    }
    let key = Key(key.to_owned());
    key.command().map(|_| key)
}

/// Keys the viewer consumes; the browser must not also scroll the page.
pub fn should_prevent_default_key(key: &str) -> bool {
    Key(key.to_owned()).command().is_some()
}

pub fn local_point(client_x: f64, client_y: f64, origin_left: f64, origin_top: f64) -> Point {
    Point::new(client_x - origin_left, client_y - origin_top)
}

#[cfg(feature = "csr")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent, stage: &web_sys::Element) -> Point {
    let rect = stage.get_bounding_client_rect();
    local_point(f64::from(ev.client_x()), f64::from(ev.client_y()), rect.left(), rect.top())
}

#[cfg(feature = "csr")]
pub fn wheel_point(ev: &leptos::ev::WheelEvent, stage: &web_sys::Element) -> Point {
    let rect = stage.get_bounding_client_rect();
    local_point(f64::from(ev.client_x()), f64::from(ev.client_y()), rect.left(), rect.top())
}

/// Active touches, in list order, relative to the stage.
#[cfg(feature = "csr")]
pub fn touch_points(ev: &leptos::ev::TouchEvent, stage: &web_sys::Element) -> Vec<Point> {
    let rect = stage.get_bounding_client_rect();
    let touches = ev.touches();
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| local_point(f64::from(t.client_x()), f64::from(t.client_y()), rect.left(), rect.top()))
        .collect()
}

#[cfg(feature = "csr")]
pub fn event_hits_control(ev: &web_sys::Event, selector: &str) -> bool {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

/// Stage size in CSS pixels.
#[cfg(feature = "csr")]
pub fn element_size(el: &web_sys::Element) -> viewer::geometry::Size {
    viewer::geometry::Size::new(f64::from(el.client_width()), f64::from(el.client_height()))
}
