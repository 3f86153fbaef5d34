use super::surface::{EditableTextSurface, FormatCommand};
use crate::models::FormatState;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement};

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

fn query_state(doc: &HtmlDocument, command: &str) -> bool {
    doc.query_command_state(command).unwrap_or(false)
}

/// A contenteditable element driven through `document.execCommand`.
///
/// Built on demand from a mounted node; never stored across renders.
pub(crate) struct DomSurface {
    el: HtmlElement,
}

impl DomSurface {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }

    pub fn focus(&self) {
        if let Err(e) = self.el.focus() {
            log::debug!("editor: focus failed: {e:?}");
        }
    }

    fn exec(&self, name: &str, value: Option<&str>) -> bool {
        let Some(doc) = html_document() else {
            return false;
        };
        let res = match value {
            Some(v) => doc.exec_command_with_show_ui_and_value(name, false, v),
            None => doc.exec_command(name),
        };
        match res {
            Ok(applied) => applied,
            Err(e) => {
                log::warn!("editor: {name} failed: {e:?}");
                false
            }
        }
    }
}

impl EditableTextSurface for DomSurface {
    fn html(&self) -> String {
        self.el.inner_html()
    }

    fn set_html(&mut self, html: &str) {
        self.el.set_inner_html(html);
    }

    fn plain_text(&self) -> String {
        self.el.inner_text()
    }

    fn has_selection(&self) -> bool {
        let Some(selection) = web_sys::window().and_then(|w| w.get_selection().ok().flatten())
        else {
            return false;
        };
        if selection.range_count() == 0 {
            return false;
        }
        selection
            .anchor_node()
            .is_some_and(|node| self.el.contains(Some(&node)))
    }

    fn apply(&mut self, command: &FormatCommand) -> bool {
        if command.keeps_focus() {
            self.focus();
        }
        let value = command.value();
        self.exec(command.exec_name(), value.as_deref())
    }

    fn active_formats(&self) -> FormatState {
        let Some(doc) = html_document() else {
            return FormatState::default();
        };
        FormatState {
            bold: query_state(&doc, "bold"),
            italic: query_state(&doc, "italic"),
            underline: query_state(&doc, "underline"),
            align_left: query_state(&doc, "justifyLeft"),
            align_center: query_state(&doc, "justifyCenter"),
            list_ordered: query_state(&doc, "insertOrderedList"),
            list_bullet: query_state(&doc, "insertUnorderedList"),
        }
    }

    fn insert_at_cursor(&mut self, text: &str) -> bool {
        self.focus();
        self.exec("insertText", Some(text))
    }
}
