use super::{dom_field, FormatCommand, FONT_FAMILIES, FONT_SIZES};
use crate::models::FormatState;
use crate::state::AppContext;
use leptos::prelude::*;

const TOOL_BASE: &str = "inline-flex h-7 min-w-7 items-center justify-center rounded px-1.5 text-sm text-foreground hover:bg-accent disabled:opacity-40 disabled:pointer-events-none";

fn prompt_url(message: &str) -> Option<String> {
    web_sys::window()?.prompt_with_message(message).ok().flatten()
}

#[component]
fn ToolButton(
    label: &'static str,
    title: &'static str,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(optional, into)] active: Option<Signal<bool>>,
    on_press: Callback<()>,
    /// Print leaves the caret alone; it does not need the field focused.
    #[prop(optional)]
    allow_blur: bool,
) -> impl IntoView {
    view! {
        <button
            type="button"
            title=title
            aria-label=title
            disabled=move || disabled.get()
            class=move || {
                if active.is_some_and(|a| a.get()) {
                    format!("{TOOL_BASE} bg-accent font-semibold")
                } else {
                    TOOL_BASE.to_string()
                }
            }
            on:mousedown=move |ev: web_sys::MouseEvent| {
                if !allow_blur {
                    ev.prevent_default();
                }
            }
            on:click=move |_| on_press.run(())
        >
            {label}
        </button>
    }
}

#[component]
fn Divider() -> impl IntoView {
    view! { <span class="mx-1 h-5 w-px bg-border"></span> }
}

/// Formatting toolbar. Drives whichever rich-text field is on screen.
#[component]
pub fn Toolbar() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0.clone();

    let disabled = {
        let state = state.clone();
        Signal::derive(move || !state.editor_active())
    };
    let formats = {
        let mode = state.mode;
        Signal::derive(move || mode.with(|m| m.formats()))
    };
    let flag = move |get: fn(&FormatState) -> bool| Signal::derive(move || get(&formats.get()));

    let run = {
        let state = state.clone();
        Callback::new(move |cmd: FormatCommand| {
            if !state.editor_active_untracked() {
                return;
            }
            let Some(mut field) = dom_field(state.editor_ref, true) else {
                return;
            };
            if let Some(html) = field.apply_format_command(&cmd) {
                state.edit_rich_text(html);
            }
            state.update_formats(field.active_formats());
        })
    };
    let press = move |cmd: FormatCommand| Callback::new(move |_: ()| run.run(cmd.clone()));
    let press_prompt = move |message: &'static str, build: fn(Option<String>) -> Option<FormatCommand>| {
        Callback::new(move |_: ()| {
            if let Some(cmd) = build(prompt_url(message)) {
                run.run(cmd);
            }
        })
    };

    let print = {
        let state = state.clone();
        Callback::new(move |_: ()| state.print())
    };

    view! {
        <div
            class="flex flex-wrap items-center gap-0.5 border-b bg-muted/40 px-3 py-1 print:hidden"
            role="toolbar"
            aria-label="Formatting"
        >
            <ToolButton label="↶" title="Undo" disabled=disabled on_press=press(FormatCommand::Undo) />
            <ToolButton label="↷" title="Redo" disabled=disabled on_press=press(FormatCommand::Redo) />
            <ToolButton label="⎙" title="Print" disabled=false on_press=print allow_blur=true />
            <Divider />

            <select
                class="h-7 rounded border-none bg-transparent px-1 text-sm"
                title="Font"
                disabled=move || disabled.get()
                on:change=move |ev: web_sys::Event| {
                    let font = event_target_value(&ev);
                    if !font.is_empty() {
                        run.run(FormatCommand::FontName(font));
                    }
                }
            >
                {FONT_FAMILIES
                    .iter()
                    .map(|f| view! { <option value=*f>{*f}</option> })
                    .collect_view()}
            </select>
            <select
                class="h-7 w-16 rounded border-none bg-transparent px-1 text-sm"
                title="Font size"
                disabled=move || disabled.get()
                on:change=move |ev: web_sys::Event| {
                    if let Ok(level) = event_target_value(&ev).parse::<u8>() {
                        run.run(FormatCommand::font_size(level));
                    }
                }
            >
                {FONT_SIZES
                    .iter()
                    .map(|(level, px)| {
                        view! {
                            <option value=level.to_string() selected=*level == 3>
                                {*px}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <Divider />

            <ToolButton label="B" title="Bold" disabled=disabled active=flag(|f| f.bold) on_press=press(FormatCommand::Bold) />
            <ToolButton label="I" title="Italic" disabled=disabled active=flag(|f| f.italic) on_press=press(FormatCommand::Italic) />
            <ToolButton label="U" title="Underline" disabled=disabled active=flag(|f| f.underline) on_press=press(FormatCommand::Underline) />

            // Colour inputs take focus, so the caret is not preserved for them.
            <label class=TOOL_BASE title="Text color">
                "A"
                <input
                    type="color"
                    class="ml-0.5 h-4 w-4 cursor-pointer border-none bg-transparent p-0"
                    disabled=move || disabled.get()
                    on:input=move |ev: web_sys::Event| run.run(FormatCommand::ForeColor(event_target_value(&ev)))
                />
            </label>
            <label class=TOOL_BASE title="Highlight color">
                "H"
                <input
                    type="color"
                    value="#ffff00"
                    class="ml-0.5 h-4 w-4 cursor-pointer border-none bg-transparent p-0"
                    disabled=move || disabled.get()
                    on:input=move |ev: web_sys::Event| run.run(FormatCommand::HiliteColor(event_target_value(&ev)))
                />
            </label>
            <Divider />

            <ToolButton label="🔗" title="Insert link" disabled=disabled on_press=press_prompt("Enter URL:", FormatCommand::link) />
            <ToolButton label="🖼" title="Insert image" disabled=disabled on_press=press_prompt("Enter image URL:", FormatCommand::image) />
            <Divider />

            <ToolButton label="⫷" title="Align left" disabled=disabled active=flag(|f| f.align_left) on_press=press(FormatCommand::AlignLeft) />
            <ToolButton label="≡" title="Align center" disabled=disabled active=flag(|f| f.align_center) on_press=press(FormatCommand::AlignCenter) />
            <ToolButton label="⫸" title="Align right" disabled=disabled on_press=press(FormatCommand::AlignRight) />
            <ToolButton label="1." title="Numbered list" disabled=disabled active=flag(|f| f.list_ordered) on_press=press(FormatCommand::OrderedList) />
            <ToolButton label="•" title="Bulleted list" disabled=disabled active=flag(|f| f.list_bullet) on_press=press(FormatCommand::BulletList) />
            <ToolButton label="⇤" title="Decrease indent" disabled=disabled on_press=press(FormatCommand::Outdent) />
            <ToolButton label="⇥" title="Increase indent" disabled=disabled on_press=press(FormatCommand::Indent) />
            <ToolButton label="Tx" title="Clear formatting" disabled=disabled on_press=press(FormatCommand::RemoveFormat) />
        </div>
    }
}
