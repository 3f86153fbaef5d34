mod sections;

use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, CardTitle};
use crate::editor::Toolbar;
use crate::models::{SaveStatus, Section, ViewMode};
use icons::{Check, ChevronDown, X};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::use_navigate;
use leptos_router::params::Params;
use wasm_bindgen::JsCast;

use sections::{use_app, AboutView, CraftsView, QuotesView, RecommendationsView, ThoughtsView};

#[derive(Params, PartialEq, Clone, Debug)]
pub struct SectionRouteParams {
    pub section: Option<String>,
}

pub(crate) fn save_status_label(status: SaveStatus) -> &'static str {
    match status {
        SaveStatus::Saved => "All changes saved",
        SaveStatus::Saving => "Saving...",
        SaveStatus::Error => "Unable to save",
    }
}

fn mode_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Editing => "Editing",
        ViewMode::Viewing => "Viewing",
    }
}

fn mode_hint(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Editing => "Edit document directly",
        ViewMode::Viewing => "Read or print final document",
    }
}

const OUTLINE_ITEM: &str =
    "flex h-8 w-full items-center rounded-r-full px-4 text-left text-sm transition-colors";

fn section_path(section: Section) -> String {
    format!("/{}", section.slug())
}

/// Whether a DOM event started inside `container`.
fn event_inside(ev: &web_sys::Event, container: &web_sys::Element) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|node| container.contains(Some(&node)))
}

#[component]
fn ModeMenu() -> impl IntoView {
    let app = use_app();
    let mode = Memo::new(move |_| app.with_value(|s| s.mode.with(|m| m.mode())));
    let open: RwSignal<bool> = RwSignal::new(false);
    let menu_ref: NodeRef<html::Div> = NodeRef::new();

    // Close on outside click or Escape.
    let _click_handle = window_event_listener(ev::mousedown, move |e: web_sys::MouseEvent| {
        if !open.get_untracked() {
            return;
        }
        let inside = menu_ref
            .get_untracked()
            .is_some_and(|el| event_inside(&e, &el));
        if !inside {
            open.set(false);
        }
    });
    let _key_handle = window_event_listener(ev::keydown, move |e: web_sys::KeyboardEvent| {
        if e.key() == "Escape" && open.get_untracked() {
            open.set(false);
        }
    });

    let choose = move |m: ViewMode| {
        app.with_value(|s| s.set_mode(m));
        open.set(false);
    };

    view! {
        <div class="relative print:hidden" node_ref=menu_ref>
            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                attr:aria-haspopup="menu"
                attr:aria-expanded=move || open.get().to_string()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                {move || mode_label(mode.get())}
                <ChevronDown />
            </Button>
            <Show when=move || open.get()>
                <div
                    role="menu"
                    class="absolute right-0 z-30 mt-1 w-60 rounded-md border bg-popover p-1 shadow-md"
                >
                    {[ViewMode::Editing, ViewMode::Viewing]
                        .into_iter()
                        .map(|m| {
                            view! {
                                <button
                                    type="button"
                                    role="menuitemradio"
                                    aria-checked=move || (mode.get() == m).to_string()
                                    class="flex w-full items-start gap-2 rounded px-2 py-1.5 text-left hover:bg-accent"
                                    on:click=move |_| choose(m)
                                >
                                    <span class="mt-0.5 size-4">
                                        <Show when=move || mode.get() == m>
                                            <Check />
                                        </Show>
                                    </span>
                                    <span class="flex flex-col">
                                        <span class="text-sm font-medium">{mode_label(m)}</span>
                                        <span class="text-xs text-muted-foreground">{mode_hint(m)}</span>
                                    </span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let app = use_app();
    let title = app.with_value(|s| s.title);
    let animating = app.with_value(|s| s.title_animating);
    let nav = app.with_value(|s| s.nav);
    let status = Memo::new(move |_| app.with_value(|s| s.save_status()));

    view! {
        <header class="flex items-center gap-3 border-b bg-background px-3 py-2 print:hidden">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                class="md:hidden"
                attr:title="Document outline"
                on:click=move |_| nav.update(|n| {
                    let open = n.is_drawer_open();
                    n.set_drawer_open(!open);
                })
            >
                <span aria-hidden="true">"☰"</span>
            </Button>
            <div class="flex size-9 items-center justify-center rounded bg-primary text-primary-foreground font-bold">
                "D"
            </div>
            <div class="flex min-w-0 flex-1 flex-col">
                <input
                    type="text"
                    aria-label="Document title"
                    class="w-full min-w-0 truncate rounded border border-transparent bg-transparent px-1 text-lg outline-none hover:border-border focus:border-primary"
                    prop:value=move || title.get()
                    on:input=move |e: web_sys::Event| {
                        animating.set(false);
                        if let Some(input) = e
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                        {
                            title.set(input.value());
                        }
                    }
                />
                <span
                    class=move || {
                        if status.get() == SaveStatus::Error {
                            "px-1 text-xs text-destructive"
                        } else {
                            "px-1 text-xs text-muted-foreground"
                        }
                    }
                    aria-live="polite"
                >
                    {move || save_status_label(status.get())}
                </span>
            </div>
            <ModeMenu />
        </header>
    }
}

#[component]
fn Outline(on_select: Callback<Section>) -> impl IntoView {
    let app = use_app();
    let active = Memo::new(move |_| app.with_value(|s| s.nav.with(|n| n.active())));

    view! {
        <nav aria-label="Document outline" class="space-y-1">
            <div class="px-4 pb-2 text-xs font-medium uppercase tracking-wide text-muted-foreground">
                "Document outline"
            </div>
            {Section::all()
                .into_iter()
                .map(|section| {
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if active.get() == section {
                                    format!("{OUTLINE_ITEM} bg-primary/10 font-semibold text-primary")
                                } else {
                                    format!("{OUTLINE_ITEM} text-muted-foreground hover:bg-accent/60")
                                }
                            }
                            aria-current=move || (active.get() == section).then_some("page")
                            on:click=move |_| on_select.run(section)
                        >
                            {section.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
fn Sidebar(on_select: Callback<Section>) -> impl IntoView {
    let app = use_app();
    let nav = app.with_value(|s| s.nav);
    let drawer_open = Memo::new(move |_| nav.with(|n| n.is_drawer_open()));

    view! {
        <aside class="hidden w-60 shrink-0 overflow-y-auto py-4 md:block print:hidden">
            <Outline on_select=on_select />
        </aside>

        <Show when=move || drawer_open.get()>
            <div class="fixed inset-0 z-40 md:hidden print:hidden">
                <div
                    class="absolute inset-0 bg-black/30"
                    on:click=move |_| nav.update(|n| n.set_drawer_open(false))
                ></div>
                <div class="absolute inset-y-0 left-0 w-64 bg-background py-4 shadow-lg">
                    <div class="flex justify-end px-2">
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:title="Close outline"
                            on:click=move |_| nav.update(|n| n.set_drawer_open(false))
                        >
                            <X />
                        </Button>
                    </div>
                    <Outline on_select=on_select />
                </div>
            </div>
        </Show>
    }
}

#[component]
fn WordStatsDialog() -> impl IntoView {
    let app = use_app();
    let open = app.with_value(|s| s.word_stats_open);
    let stats = Memo::new(move |_| app.get_value().view_stats());

    view! {
        <Show when=move || open.get()>
            <div
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 print:hidden"
                on:click=move |_| open.set(false)
            >
                <div on:click=|e: web_sys::MouseEvent| e.stop_propagation()>
                    <Card class="w-72">
                        <div class="flex items-center justify-between">
                            <CardTitle>"Word count"</CardTitle>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Icon
                                attr:title="Close"
                                on:click=move |_| open.set(false)
                            >
                                <X />
                            </Button>
                        </div>
                        <dl class="grid grid-cols-[1fr_auto] gap-y-1 text-sm">
                            <dt class="text-muted-foreground">"Words"</dt>
                            <dd>{move || stats.get().words}</dd>
                            <dt class="text-muted-foreground">"Characters"</dt>
                            <dd>{move || stats.get().chars}</dd>
                            <dt class="text-muted-foreground">"Characters excluding spaces"</dt>
                            <dd>{move || stats.get().chars_no_space}</dd>
                        </dl>
                    </Card>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn StatusBar() -> impl IntoView {
    let app = use_app();
    let words = Memo::new(move |_| app.get_value().word_count());
    let stats_open = app.with_value(|s| s.word_stats_open);

    view! {
        <footer class="flex items-center gap-4 border-t bg-muted/40 px-4 py-1 text-xs text-muted-foreground print:hidden">
            <span>"Last edited today"</span>
            <button
                type="button"
                class="hover:text-foreground hover:underline"
                title="Show word count details"
                on:click=move |_| stats_open.set(true)
            >
                {move || format!("{} words", words.get())}
            </button>
            <span class="ml-auto">"UTF-8"</span>
        </footer>
        <WordStatsDialog />
    }
}

#[component]
pub fn DocumentPage() -> impl IntoView {
    let app = use_app();
    let params = leptos_router::hooks::use_params::<SectionRouteParams>();
    let navigate = StoredValue::new(use_navigate());

    let route_section = move || {
        params
            .get()
            .ok()
            .and_then(|p| p.section)
            .map(|s| Section::from_slug(&s))
            .unwrap_or_default()
    };

    // The URL is the source of truth for the active section; back/forward lands here too.
    Effect::new(move |prev: Option<Section>| {
        let section = route_section();
        let state = app.get_value();
        if prev.is_none() || section != untrack(|| state.active_section()) {
            state.navigate(section);
        }
        section
    });

    let on_select = Callback::new(move |section: Section| {
        app.with_value(|s| s.navigate(section));
        navigate.with_value(|nav| nav(&section_path(section), Default::default()));
    });

    let active = Memo::new(move |_| app.with_value(|s| s.nav.with(|n| n.active())));
    let editing = Memo::new(move |_| app.with_value(|s| s.is_editing()));

    let scroll_ref: NodeRef<html::Main> = NodeRef::new();
    let scroll_epoch = app.with_value(|s| s.scroll_epoch);
    Effect::new(move |_| {
        scroll_epoch.track();
        if let Some(el) = scroll_ref.get_untracked() {
            el.set_scroll_top(0);
        }
    });

    view! {
        <div class="flex h-screen flex-col bg-muted/20 print:h-auto print:bg-white">
            <Header />
            <Show when=move || editing.get()>
                <Toolbar />
            </Show>
            <div class="flex min-h-0 flex-1">
                <Sidebar on_select=on_select />
                <main node_ref=scroll_ref class="min-w-0 flex-1 overflow-y-auto print:overflow-visible">
                    <article class="mx-auto my-6 min-h-[calc(100%-3rem)] max-w-3xl bg-background px-6 py-10 shadow-sm sm:px-14 print:m-0 print:max-w-none print:shadow-none">
                        {move || match active.get() {
                            Section::About => view! { <AboutView /> }.into_any(),
                            Section::Thoughts => view! { <ThoughtsView /> }.into_any(),
                            Section::Quotes => view! { <QuotesView /> }.into_any(),
                            Section::Crafts => view! { <CraftsView /> }.into_any(),
                            Section::Recommendations => view! { <RecommendationsView /> }.into_any(),
                        }}
                    </article>
                </main>
            </div>
            <StatusBar />
        </div>
    }
}
