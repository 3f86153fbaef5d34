use icons::Loader;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <Loader class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Centered "Loading..." row shown while a section slot is empty and in flight.
#[component]
pub fn LoadingRow(#[prop(into, optional)] label: Option<String>) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Loading...".to_string());
    view! {
        <div class="flex items-center gap-2 py-8 text-sm text-muted-foreground">
            <Spinner />
            <span>{label}</span>
        </div>
    }
}
