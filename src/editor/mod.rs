#[cfg(test)]
mod buffer;
mod dom;
mod surface;
mod toolbar;

#[cfg(test)]
pub(crate) use buffer::BufferSurface;
pub(crate) use dom::DomSurface;
pub(crate) use surface::{EditableTextSurface, FormatCommand, FONT_FAMILIES, FONT_SIZES};
pub(crate) use toolbar::Toolbar;

use crate::html::text_stats;
use crate::models::{FormatState, TextStats};
use crate::util::open_in_new_tab;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub(crate) const PLACEHOLDER: &str = "Start typing...";

/// Editing rules layered over a surface: read-only fields ignore commands,
/// an unfocused field reports no active formats, and re-rendering identical
/// markup leaves the surface (and its caret) alone.
pub(crate) struct RichTextField<S> {
    surface: S,
    editable: bool,
}

impl<S: EditableTextSurface> RichTextField<S> {
    pub fn new(surface: S, editable: bool) -> Self {
        Self { surface, editable }
    }

    /// Returns whether the surface markup was replaced.
    pub fn render(&mut self, html: &str, editable: bool) -> bool {
        self.editable = editable;
        if self.surface.html() == html {
            return false;
        }
        self.surface.set_html(html);
        true
    }

    /// The new markup when the command changed the document.
    pub fn apply_format_command(&mut self, command: &FormatCommand) -> Option<String> {
        if !self.editable {
            return None;
        }
        self.surface
            .apply(command)
            .then(|| self.surface.html())
    }

    pub fn insert_text(&mut self, text: &str) -> Option<String> {
        if !self.editable {
            return None;
        }
        self.surface
            .insert_at_cursor(text)
            .then(|| self.surface.html())
    }

    pub fn active_formats(&self) -> FormatState {
        if !self.editable || !self.surface.has_selection() {
            return FormatState::default();
        }
        self.surface.active_formats()
    }

    pub fn plain_text_stats(&self) -> TextStats {
        text_stats(&self.surface.plain_text())
    }

    pub fn html(&self) -> String {
        self.surface.html()
    }

    #[cfg(test)]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

pub(crate) fn dom_field(node: NodeRef<html::Div>, editable: bool) -> Option<RichTextField<DomSurface>> {
    let el: web_sys::HtmlElement = node.get_untracked()?.into();
    Some(RichTextField::new(DomSurface::new(el), editable))
}

/// Open anchor clicks inside rendered content in a new tab instead of navigating away.
///
/// Returns whether the click was consumed.
pub(crate) fn intercept_link_click(ev: &web_sys::MouseEvent) -> bool {
    let Some(anchor) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest("a").ok().flatten())
    else {
        return false;
    };
    let Some(href) = anchor
        .get_attribute("href")
        .filter(|h| !h.trim().is_empty() && !h.starts_with('#'))
    else {
        return false;
    };
    ev.prevent_default();
    open_in_new_tab(&href);
    true
}

#[component]
pub fn RichTextEditor(
    #[prop(into)] html: Signal<String>,
    #[prop(into)] editable: Signal<bool>,
    node_ref: NodeRef<html::Div>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] on_formats: Callback<FormatState>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    // Push store markup into the element only when it differs, so typing keeps the caret.
    Effect::new(move |_| {
        let html = html.get();
        let editable = editable.get();
        if let Some(mut field) = dom_field(node_ref, editable) {
            field.render(&html, editable);
        }
    });

    let query_formats = move || {
        if !editable.get_untracked() {
            return;
        }
        if let Some(field) = dom_field(node_ref, true) {
            on_formats.run(field.active_formats());
        }
    };

    let class = format!(
        "outline-none min-h-[1.5em] empty:before:content-[attr(data-placeholder)] empty:before:text-muted-foreground {class}"
    );

    view! {
        <div
            node_ref=node_ref
            class=class
            contenteditable=move || if editable.get() { "true" } else { "false" }
            data-placeholder=move || editable.get().then_some(PLACEHOLDER)
            spellcheck="true"
            on:input=move |_| {
                if let Some(field) = dom_field(node_ref, true) {
                    on_change.run(field.html());
                }
                query_formats();
            }
            on:keyup=move |_| query_formats()
            on:mouseup=move |_| query_formats()
            on:focus=move |_| query_formats()
            on:paste=move |ev: web_sys::ClipboardEvent| {
                // Pasted markup would carry foreign styles; keep only the text.
                let Some(text) = ev.clipboard_data().and_then(|d| d.get_data("text/plain").ok())
                else {
                    return;
                };
                ev.prevent_default();
                if let Some(mut field) = dom_field(node_ref, editable.get_untracked()) {
                    if let Some(html) = field.insert_text(&text) {
                        on_change.run(html);
                    }
                }
            }
            on:click=move |ev: web_sys::MouseEvent| {
                intercept_link_click(&ev);
            }
        ></div>
    }
}
