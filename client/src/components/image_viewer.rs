//! Bridge component between Leptos state and the imperative `viewer::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The viewer crate owns all transform math and gesture state. This host
//! measures the stage and image, maps DOM events into `InputEvent`s, applies
//! the returned actions, and publishes a `ViewerViewState` snapshot for the
//! controls.
//!
//! Mouse and pen arrive as pointer events; touch arrives as touch events so
//! all active fingers are visible at once. Touch-type pointer events are
//! ignored to avoid feeding the same finger twice.

use leptos::prelude::*;

use viewer::config::ViewerConfig;

use crate::components::zoom_controls::ZoomControls;
use crate::state::viewer_view::ViewerViewState;
#[cfg(feature = "csr")]
use crate::state::viewer_view::LoadStatus;
#[cfg(feature = "csr")]
use crate::util::viewer_input::{
    CONTROL_SELECTOR, element_size, event_hits_control, is_touch_pointer, map_button, pointer_point,
    should_prevent_default_key, touch_points, viewer_key, wheel_point,
};

#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use viewer::engine::{Action, Engine};
#[cfg(feature = "csr")]
use viewer::geometry::Size;
#[cfg(feature = "csr")]
use viewer::input::{InputEvent, WheelDelta};

#[cfg(feature = "csr")]
type SharedEngine = Rc<RefCell<Option<Engine>>>;

#[cfg(feature = "csr")]
fn apply_actions(
    actions: Vec<Action>,
    engine: &Engine,
    stage: &web_sys::HtmlElement,
    view_state: RwSignal<ViewerViewState>,
) {
    let mut render = false;
    let mut publish = false;
    for action in actions {
        match action {
            Action::RenderNeeded => {
                render = true;
                publish = true;
            }
            Action::SetCursor(cursor) => {
                if let Err(err) = stage.style().set_property("cursor", &cursor) {
                    log::warn!("failed to set cursor: {err:?}");
                }
            }
            Action::ZoomChanged { percent } => {
                log::debug!("zoom {percent}%");
                publish = true;
            }
        }
    }
    if render {
        if let Err(err) = engine.render() {
            log::warn!("render failed: {err:?}");
        }
    }
    if publish {
        view_state.update(|view| view.sync_from(&engine.core));
    }
}

/// Run `op` against the mounted engine and apply what it returns.
#[cfg(feature = "csr")]
fn dispatch(
    engine: &SharedEngine,
    stage: &web_sys::HtmlElement,
    view_state: RwSignal<ViewerViewState>,
    op: impl FnOnce(&mut Engine) -> Vec<Action>,
) {
    let mut slot = engine.borrow_mut();
    let Some(engine) = slot.as_mut() else {
        return;
    };
    let actions = op(engine);
    apply_actions(actions, engine, stage, view_state);
}

#[cfg(feature = "csr")]
fn natural_size(image: &web_sys::HtmlImageElement) -> Size {
    Size::new(f64::from(image.natural_width()), f64::from(image.natural_height()))
}

/// Full-viewport pan/zoom stage for a single image.
///
/// The image stays hidden until both its natural size and the stage size are
/// known, then opens at the cover view.
#[component]
pub fn ImageViewer(src: String, alt: String, config: ViewerConfig) -> impl IntoView {
    let view_state = expect_context::<RwSignal<ViewerViewState>>();
    let stage_ref = NodeRef::<leptos::html::Div>::new();
    let image_ref = NodeRef::<leptos::html::Img>::new();
    #[cfg(feature = "csr")]
    let engine: SharedEngine = Rc::new(RefCell::new(None));

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let (Some(stage), Some(image)) = (stage_ref.get(), image_ref.get()) else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }

            let mut instance = Engine::new(web_sys::HtmlElement::from(image.clone()), config);
            let mut actions = instance.on_viewport_resize(element_size(&stage));
            // A cached image may finish loading before the engine exists.
            if image.complete() && image.natural_width() > 0 {
                view_state.update(|view| view.load = LoadStatus::Loaded);
                actions.extend(instance.set_image_size(natural_size(&image)));
            }
            if let Err(err) = instance.render() {
                log::warn!("initial render failed: {err:?}");
            }
            apply_actions(actions, &instance, &stage, view_state);
            *engine.borrow_mut() = Some(instance);
        });
    }

    #[cfg(feature = "csr")]
    {
        let engine_for_resize = Rc::clone(&engine);
        let resize = window_event_listener(leptos::ev::resize, move |_| {
            let Some(stage) = stage_ref.get() else {
                return;
            };
            let viewport = element_size(&stage);
            dispatch(&engine_for_resize, &stage, view_state, |e| e.handle(InputEvent::Resize(viewport)));
        });

        let engine_for_keys = Rc::clone(&engine);
        let keydown = window_event_listener(leptos::ev::keydown, move |ev| {
            let name = ev.key();
            let Some(key) = viewer_key(&name, ev.ctrl_key(), ev.meta_key(), ev.alt_key()) else {
                return;
            };
            let Some(stage) = stage_ref.get() else {
                return;
            };
            if should_prevent_default_key(&name) {
                ev.prevent_default();
            }
            dispatch(&engine_for_keys, &stage, view_state, |e| e.handle(InputEvent::Key(key)));
        });

        on_cleanup(move || {
            resize.remove();
            keydown.remove();
        });
    }

    let on_image_load = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |_ev: leptos::ev::Event| {
                let (Some(stage), Some(image)) = (stage_ref.get(), image_ref.get()) else {
                    return;
                };
                let size = natural_size(&image);
                log::debug!("image loaded: {}x{}", size.width, size.height);
                view_state.update(|view| view.load = LoadStatus::Loaded);
                dispatch(&engine, &stage, view_state, |e| e.set_image_size(size));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::Event| {}
        }
    };

    let on_image_error = {
        #[cfg(feature = "csr")]
        {
            move |_ev: leptos::ev::ErrorEvent| {
                log::warn!("image failed to load");
                view_state.update(|view| view.load = LoadStatus::Failed);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::ErrorEvent| {}
        }
    };

    let on_pointer_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if is_touch_pointer(&ev.pointer_type()) || event_hits_control(&ev, CONTROL_SELECTOR) {
                    return;
                }
                let Some(stage) = stage_ref.get() else {
                    return;
                };
                ev.prevent_default();
                if let Err(err) = stage.set_pointer_capture(ev.pointer_id()) {
                    log::debug!("pointer capture unavailable: {err:?}");
                }
                let event = InputEvent::PointerDown { position: pointer_point(&ev, &stage), button: map_button(ev.button()) };
                dispatch(&engine, &stage, view_state, |e| e.handle(event));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if is_touch_pointer(&ev.pointer_type()) {
                    return;
                }
                let Some(stage) = stage_ref.get() else {
                    return;
                };
                let event = InputEvent::PointerMove { position: pointer_point(&ev, &stage) };
                dispatch(&engine, &stage, view_state, |e| e.handle(event));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if is_touch_pointer(&ev.pointer_type()) {
                    return;
                }
                let Some(stage) = stage_ref.get() else {
                    return;
                };
                if stage.has_pointer_capture(ev.pointer_id()) {
                    if let Err(err) = stage.release_pointer_capture(ev.pointer_id()) {
                        log::debug!("pointer release failed: {err:?}");
                    }
                }
                let event = InputEvent::PointerUp { position: pointer_point(&ev, &stage) };
                dispatch(&engine, &stage, view_state, |e| e.handle(event));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::WheelEvent| {
                if event_hits_control(&ev, CONTROL_SELECTOR) {
                    return;
                }
                let Some(stage) = stage_ref.get() else {
                    return;
                };
                ev.prevent_default();
                let event = InputEvent::Wheel {
                    position: wheel_point(&ev, &stage),
                    delta: WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() },
                };
                dispatch(&engine, &stage, view_state, |e| e.handle(event));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    let on_touch_start = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::TouchEvent| {
                // Leave taps on buttons to the browser so they still click.
                if event_hits_control(&ev, CONTROL_SELECTOR) {
                    return;
                }
                let Some(stage) = stage_ref.get() else {
                    return;
                };
                ev.prevent_default();
                let event = InputEvent::TouchStart { touches: touch_points(&ev, &stage) };
                dispatch(&engine, &stage, view_state, |e| e.handle(event));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::TouchEvent| {}
        }
    };

    let on_touch_move = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::TouchEvent| {
                let Some(stage) = stage_ref.get() else {
                    return;
                };
                ev.prevent_default();
                let event = InputEvent::TouchMove { touches: touch_points(&ev, &stage) };
                dispatch(&engine, &stage, view_state, |e| e.handle(event));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::TouchEvent| {}
        }
    };

    // Shared by touchend and touchcancel: both report the touches still down.
    let on_touch_end = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::TouchEvent| {
                let Some(stage) = stage_ref.get() else {
                    return;
                };
                let event = InputEvent::TouchEnd { touches: touch_points(&ev, &stage) };
                dispatch(&engine, &stage, view_state, |e| e.handle(event));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::TouchEvent| {}
        }
    };
    let on_touch_cancel = on_touch_end.clone();

    let on_zoom_in = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move || {
                if let Some(stage) = stage_ref.get() {
                    dispatch(&engine, &stage, view_state, Engine::zoom_in);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move || {}
        }
    };

    let on_zoom_out = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move || {
                if let Some(stage) = stage_ref.get() {
                    dispatch(&engine, &stage, view_state, Engine::zoom_out);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move || {}
        }
    };

    let on_reset = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move || {
                if let Some(stage) = stage_ref.get() {
                    dispatch(&engine, &stage, view_state, Engine::reset);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move || {}
        }
    };

    view! {
        <div
            class="viewer-stage"
            node_ref=stage_ref
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up.clone()
            on:pointercancel=on_pointer_up
            on:wheel=on_wheel
            on:touchstart=on_touch_start
            on:touchmove=on_touch_move
            on:touchend=on_touch_end
            on:touchcancel=on_touch_cancel
        >
            <img
                class="viewer-image"
                node_ref=image_ref
                src=src
                alt=alt
                draggable="false"
                on:load=on_image_load
                on:error=on_image_error
            />
            <ZoomControls on_zoom_in=on_zoom_in on_zoom_out=on_zoom_out on_reset=on_reset />
        </div>
    }
}
