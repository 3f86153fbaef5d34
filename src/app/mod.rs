use crate::api::EnvConfig;
use crate::pages::DocumentPage;
use crate::state::{tab_title, AppContext, AppState};
use crate::util::set_document_title;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App(config: EnvConfig) -> impl IntoView {
    let state = AppState::new(config);
    provide_context(AppContext(state.clone()));

    // Browser tab mirrors the document title, including while it animates.
    let title = state.title;
    Effect::new(move |_| set_document_title(&tab_title(&title.get())));

    state.start_title_animation();

    // Leptos CSR needs the `csr` feature; router hooks need a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <DocumentPage /> }>
                <Route path=path!(":section") view=DocumentPage />
                <Route path=path!("") view=DocumentPage />
            </Routes>
        </Router>
    }
}
