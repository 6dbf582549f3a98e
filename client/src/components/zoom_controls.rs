//! Zoom buttons and the live zoom status line.
//!
//! Every element here carries the `viewer-control` class so presses on it are
//! never mistaken for the start of a drag on the stage underneath.

use leptos::prelude::*;

use crate::state::viewer_view::ViewerViewState;

/// Zoom in / zoom out / reset buttons, enabled from `ViewerViewState`.
#[component]
pub fn ZoomControls(
    on_zoom_in: impl Fn() + 'static,
    on_zoom_out: impl Fn() + 'static,
    on_reset: impl Fn() + 'static,
) -> impl IntoView {
    let view_state = expect_context::<RwSignal<ViewerViewState>>();

    view! {
        <div class="viewer-controls viewer-control" role="toolbar" aria-label="Zoom">
            <button
                type="button"
                class="viewer-controls__button viewer-control"
                title="Zoom out (-)"
                aria-label="Zoom out"
                disabled=move || !view_state.get().can_zoom_out
                on:click=move |_| on_zoom_out()
            >
                "\u{2212}"
            </button>
            <button
                type="button"
                class="viewer-controls__button viewer-control"
                title="Reset view (0)"
                aria-label="Reset view"
                disabled=move || !view_state.get().can_reset()
                on:click=move |_| on_reset()
            >
                "Reset"
            </button>
            <button
                type="button"
                class="viewer-controls__button viewer-control"
                title="Zoom in (+)"
                aria-label="Zoom in"
                disabled=move || !view_state.get().can_zoom_in
                on:click=move |_| on_zoom_in()
            >
                "+"
            </button>
        </div>
        <div class="viewer-status viewer-control" role="status" aria-live="polite">
            {move || view_state.get().status_text()}
        </div>
    }
}
