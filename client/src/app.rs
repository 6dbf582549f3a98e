//! Root component: reads page config, provides shared state, mounts the stage.

use leptos::prelude::*;

use crate::components::image_viewer::ImageViewer;
use crate::config::ClientConfig;
use crate::state::viewer_view::ViewerViewState;

fn page_config() -> ClientConfig {
    #[cfg(feature = "csr")]
    {
        ClientConfig::from_page()
    }
    #[cfg(not(feature = "csr"))]
    {
        ClientConfig::default()
    }
}

#[component]
pub fn App() -> impl IntoView {
    let ClientConfig { image_src, image_alt, viewer } = page_config();
    provide_context(RwSignal::new(ViewerViewState::default()));

    view! {
        <main class="viewer-app">
            <ImageViewer src=image_src alt=image_alt config=viewer />
        </main>
    }
}
