use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Text input bound to a signal; Enter runs `on_enter` when given.
#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] aria_label: String,
    #[prop(into, optional)] disabled: MaybeProp<bool>,
    #[prop(optional)] maxlength: Option<u32>,

    // Manual wiring instead of `bind:value` keeps the input stable across macro changes.
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(optional, into)] on_enter: Option<Callback<()>>,
    #[prop(optional)] on_escape: Option<Callback<()>>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:opacity-50",
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        class
    );

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                bind_value.set(input.value());
            }
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            if let Some(cb) = on_enter {
                ev.prevent_default();
                cb.run(());
            }
        }
        "Escape" => {
            if let Some(cb) = on_escape {
                cb.run(());
            }
        }
        _ => {}
    };

    view! {
        <input
            data-name="Input"
            type="text"
            class=merged_class
            placeholder=placeholder
            aria-label=aria_label
            maxlength=maxlength.map(|m| m.to_string())
            disabled=move || disabled.get().unwrap_or(false)
            prop:value=move || bind_value.get()
            on:input=on_input
            on:keydown=on_keydown
            node_ref=node_ref
        />
    }
    .into_any()
}
