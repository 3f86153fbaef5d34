use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardDescription, CardTitle,
    Input, LoadingRow, Spinner, ALERT_ERROR, ALERT_SUCCESS, ALERT_WARNING,
};
use crate::editor::{intercept_link_click, RichTextEditor};
use crate::models::{FormatState, RecommendationSection, Section};
use crate::state::{AppContext, AppState, ListItem};
use icons::X;
use leptos::html;
use leptos::prelude::*;

const PREVIEW_CHARS: usize = 180;

pub(crate) fn use_app() -> StoredValue<AppState> {
    StoredValue::new(expect_context::<AppContext>().0)
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", text[..idx].trim_end()),
        None => text.to_string(),
    }
}

fn editing(app: StoredValue<AppState>) -> Memo<bool> {
    Memo::new(move |_| app.with_value(|s| s.is_editing()))
}

/// Rate-limit notice shared by the quote generator and the suggestion forms.
#[component]
fn CooldownWarning() -> impl IntoView {
    let app = use_app();
    move || {
        app.get_value().watch(|s| s.board.warning()).map(|notice| {
            view! {
                <Alert class=ALERT_WARNING attr:role="alert">
                    <AlertDescription>{notice.text}</AlertDescription>
                </Alert>
            }
        })
    }
}

#[component]
pub fn AboutView() -> impl IntoView {
    let app = use_app();
    let editable = editing(app);
    let html = Signal::derive(move || app.get_value().snapshot().about_html);
    let loading = Memo::new(move |_| {
        app.get_value()
            .watch(|s| s.store.is_loading(Section::About))
    });
    let polishing = Memo::new(move |_| app.get_value().watch(|s| s.store.is_polishing()));
    let node_ref = app.with_value(|s| s.editor_ref);

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between gap-2">
                <h1 class="text-3xl font-semibold tracking-tight">"About Me"</h1>
                <Show when=move || editable.get()>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || polishing.get() || html.get().trim().is_empty()
                        attr:title="Rewrite this section with AI"
                        on:click=move |_| app.get_value().polish_about()
                    >
                        <Show when=move || polishing.get()>
                            <Spinner />
                        </Show>
                        {move || if polishing.get() { "Refining..." } else { "Refine with AI" }}
                    </Button>
                </Show>
            </div>

            <Show when=move || loading.get() && html.get().is_empty()>
                <LoadingRow />
            </Show>

            <RichTextEditor
                html=html
                editable=editable
                node_ref=node_ref
                on_change=Callback::new(move |h: String| app.get_value().edit_rich_text(h))
                on_formats=Callback::new(move |f: FormatState| app.get_value().update_formats(f))
                class="prose max-w-none"
            />
        </div>
    }
}

#[component]
pub fn ThoughtsView() -> impl IntoView {
    let app = use_app();
    let open = Memo::new(move |_| app.get_value().thought_open());

    view! {
        <Show when=move || open.get() fallback=|| view! { <ThoughtList /> }>
            <ThoughtDetail />
        </Show>
    }
}

#[component]
fn ThoughtList() -> impl IntoView {
    let app = use_app();
    let thoughts = Memo::new(move |_| app.get_value().snapshot().thoughts);
    let loading = Memo::new(move |_| {
        app.get_value()
            .watch(|s| s.store.is_loading(Section::Thoughts))
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-3xl font-semibold tracking-tight">"Thoughts"</h1>
            <Show when=move || loading.get() && thoughts.with(|t| t.is_empty())>
                <LoadingRow />
            </Show>
            <div class="space-y-3">
                {move || {
                    thoughts
                        .get()
                        .into_iter()
                        .map(|t| {
                            let id = t.id.clone();
                            let preview = truncate_chars(&t.preview(), PREVIEW_CHARS);
                            let tags = t.tags.clone();
                            view! {
                                <button
                                    type="button"
                                    class="block w-full text-left"
                                    on:click=move |_| app.get_value().open_thought(id.clone())
                                >
                                    <Card class="transition-colors hover:bg-accent/40">
                                        <CardTitle>{t.title.clone()}</CardTitle>
                                        <div class="text-xs text-muted-foreground">{t.date.clone()}</div>
                                        <CardDescription>{preview}</CardDescription>
                                        <div class="flex flex-wrap gap-1">
                                            {tags
                                                .into_iter()
                                                .map(|tag| {
                                                    view! {
                                                        <span class="rounded-full bg-muted px-2 py-0.5 text-xs text-muted-foreground">
                                                            {tag}
                                                        </span>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </Card>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn ThoughtDetail() -> impl IntoView {
    let app = use_app();
    let editable = editing(app);
    let selected = Memo::new(move |_| app.get_value().snapshot().selected_thought);
    let html = Signal::derive(move || app.get_value().snapshot().thought_html);
    let opening = Memo::new(move |_| app.get_value().watch(|s| s.store.is_opening_thought()));
    let node_ref = app.with_value(|s| s.editor_ref);

    view! {
        <div class="space-y-4">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Xs
                on:click=move |_| app.get_value().close_thought()
            >
                "← All thoughts"
            </Button>
            {move || {
                selected
                    .get()
                    .map(|t| {
                        view! {
                            <h1 class="text-3xl font-semibold tracking-tight">{t.title}</h1>
                            <div class="flex flex-wrap items-center gap-2 text-xs text-muted-foreground">
                                <span>{t.date}</span>
                                {t
                                    .tags
                                    .into_iter()
                                    .map(|tag| view! { <span class="rounded-full bg-muted px-2 py-0.5">{tag}</span> })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}
            <Show when=move || opening.get() && html.get().is_empty()>
                <LoadingRow />
            </Show>
            <RichTextEditor
                html=html
                editable=editable
                node_ref=node_ref
                on_change=Callback::new(move |h: String| app.get_value().edit_rich_text(h))
                on_formats=Callback::new(move |f: FormatState| app.get_value().update_formats(f))
                class="prose max-w-none"
            />
        </div>
    }
}

#[component]
pub fn QuotesView() -> impl IntoView {
    let app = use_app();
    let mood = app.with_value(|s| s.mood);
    let quotes = Memo::new(move |_| app.get_value().snapshot().quotes);
    let loading = Memo::new(move |_| {
        app.get_value()
            .watch(|s| s.store.is_loading(Section::Quotes))
    });
    let generating = Memo::new(move |_| app.get_value().watch(|s| s.store.is_generating_quote()));

    let generate = Callback::new(move |_: ()| app.get_value().generate_quote(false));

    view! {
        <div class="space-y-4">
            <h1 class="text-3xl font-semibold tracking-tight">"Quotes"</h1>

            <div class="space-y-2 rounded-lg border bg-muted/30 p-4 print:hidden">
                <div class="text-sm font-medium">"Generate a quote"</div>
                <div class="flex flex-col gap-2 sm:flex-row">
                    <Input
                        bind_value=mood
                        placeholder="How are you feeling? (e.g. hopeful, tired)"
                        aria_label="Mood"
                        maxlength=100
                        disabled=generating
                        on_enter=generate
                    />
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || generating.get() || mood.with(|m| m.trim().is_empty())
                        on:click=move |_| generate.run(())
                    >
                        <Show when=move || generating.get()>
                            <Spinner />
                        </Show>
                        "Generate"
                    </Button>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || generating.get()
                        on:click=move |_| app.get_value().generate_quote(true)
                    >
                        "Surprise Me"
                    </Button>
                </div>
                <CooldownWarning />
            </div>

            <Show when=move || loading.get() && quotes.with(|q| q.is_empty())>
                <LoadingRow />
            </Show>
            <div class="space-y-4">
                {move || {
                    quotes
                        .get()
                        .into_iter()
                        .map(|q| {
                            view! {
                                <blockquote class="border-l-4 border-primary/40 pl-4">
                                    <p class="text-lg italic">{format!("\u{201c}{}\u{201d}", q.text)}</p>
                                    <footer class="mt-1 text-sm text-muted-foreground">
                                        {format!("— {}", q.author)}
                                    </footer>
                                </blockquote>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
pub fn CraftsView() -> impl IntoView {
    let app = use_app();
    let html = Memo::new(move |_| app.get_value().snapshot().crafts_html);
    let loading = Memo::new(move |_| {
        app.get_value()
            .watch(|s| s.store.is_loading(Section::Crafts))
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-3xl font-semibold tracking-tight">"Crafts"</h1>
            <Show when=move || loading.get() && html.with(|h| h.is_empty())>
                <LoadingRow />
            </Show>
            <div
                class="prose max-w-none"
                inner_html=move || html.get()
                on:click=move |ev: web_sys::MouseEvent| {
                    intercept_link_click(&ev);
                }
            ></div>
        </div>
    }
}

#[component]
pub fn RecommendationsView() -> impl IntoView {
    let app = use_app();
    let editable = editing(app);
    let sections = Memo::new(move |_| app.get_value().snapshot().recommendations);
    let loading = Memo::new(move |_| {
        app.get_value()
            .watch(|s| s.store.is_loading(Section::Recommendations))
    });
    let success = Memo::new(move |_| app.get_value().watch(|s| s.board.success().is_some()));
    let failure = Memo::new(move |_| app.get_value().watch(|s| s.board.failure()));

    let guest_name = RwSignal::new(app.with_value(|s| s.board.guest_name()));
    Effect::new(move |_| {
        let name = guest_name.get();
        app.with_value(|s| s.board.set_guest_name(name));
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-semibold tracking-tight">"Recommendations"</h1>
            <Show when=move || loading.get() && sections.with(|s| s.is_empty())>
                <LoadingRow />
            </Show>

            {move || {
                sections
                    .get()
                    .into_iter()
                    .map(|section| view! { <RecommendationList section=section editable=editable /> })
                    .collect_view()
            }}

            <Show when=move || editable.get()>
                <div class="max-w-xs space-y-1 print:hidden">
                    <label class="text-xs text-muted-foreground">"Your name (optional)"</label>
                    <Input bind_value=guest_name placeholder="Anonymous" aria_label="Your name" maxlength=40 />
                </div>
            </Show>

            <CooldownWarning />
            <Show when=move || success.get()>
                <Alert class=ALERT_SUCCESS attr:role="status">
                    <AlertDescription>
                        "Thanks! Your suggestion will appear once it has been approved."
                    </AlertDescription>
                </Alert>
            </Show>
            {move || {
                failure
                    .get()
                    .map(|e| {
                        view! {
                            <Alert class=ALERT_ERROR attr:role="alert">
                                <AlertDescription>{e}</AlertDescription>
                            </Alert>
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn RecommendationList(section: RecommendationSection, editable: Memo<bool>) -> impl IntoView {
    let app = use_app();
    let category = section.id.clone();
    let title = section.title.clone();
    let items = {
        let section = section.clone();
        Memo::new(move |_| app.get_value().watch(|s| s.board.visible_items(&section)))
    };
    view! {
        <section class="space-y-2">
            <h2 class="text-xl font-semibold">{title.clone()}</h2>
            <ul
                class="list-disc space-y-1 pl-6"
                on:click=move |ev: web_sys::MouseEvent| {
                    intercept_link_click(&ev);
                }
            >
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|item| match item {
                            ListItem::Curated(html) => view! { <li inner_html=html></li> }.into_any(),
                            ListItem::Suggested(entry) => {
                                let dot = format!(
                                    "background-color: {}",
                                    entry.color.unwrap_or_else(|| "#9E9E9E".to_string())
                                );
                                view! {
                                    <li>
                                        <span class="inline-flex items-center gap-2">
                                            <span class="inline-block size-2 rounded-full" style=dot></span>
                                            <span>{entry.content}</span>
                                            <span class="text-xs text-muted-foreground">
                                                {format!("suggested by {}", entry.author)}
                                            </span>
                                        </span>
                                    </li>
                                }
                                .into_any()
                            }
                        })
                        .collect_view()
                }}
            </ul>

            <Show when=move || editable.get()>
                <SuggestControl category=category.clone() title=title.clone() />
            </Show>
        </section>
    }
}

#[component]
fn SuggestControl(category: String, title: String) -> impl IntoView {
    let app = use_app();
    let focused = {
        let category = category.clone();
        Memo::new(move |_| {
            app.get_value()
                .watch(|s| s.board.focused().as_deref() == Some(category.as_str()))
        })
    };
    let label = format!("+ Suggest {}", title.to_lowercase());

    move || {
        let category = category.clone();
        if focused.get() {
            view! { <SuggestionEditor category=category /> }.into_any()
        } else {
            let label = label.clone();
            view! {
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Xs
                    class="text-muted-foreground"
                    on:click=move |_| {
                        app.with_value(|s| {
                            s.board.focus(&category);
                            s.bump();
                        });
                    }
                >
                    {label}
                </Button>
            }
            .into_any()
        }
    }
}

/// Inline "suggest an item" form for one category.
#[component]
fn SuggestionEditor(category: String) -> impl IntoView {
    let app = use_app();
    let draft = RwSignal::new(app.with_value(|s| s.board.input(&category)));
    let submitting = Memo::new(move |_| app.get_value().watch(|s| s.board.is_submitting()));
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    {
        let category = category.clone();
        Effect::new(move |_| {
            let value = draft.get();
            app.with_value(|s| s.board.set_input(&category, value));
        });
    }

    Effect::new(move |_| {
        if let Some(el) = input_ref.get() {
            let _ = el.focus();
        }
    });

    let submit = {
        let category = category.clone();
        Callback::new(move |_: ()| app.get_value().submit_suggestion(category.clone()))
    };
    let close = Callback::new(move |_: ()| {
        app.with_value(|s| {
            s.board.close_editor();
            s.bump();
        });
    });

    view! {
        <div class="flex max-w-xl items-center gap-2 print:hidden">
            <Input
                bind_value=draft
                node_ref=input_ref
                placeholder="Your suggestion"
                aria_label="Your suggestion"
                maxlength=200
                disabled=submitting
                on_enter=submit
                on_escape=close
            />
            <Button
                size=ButtonSize::Sm
                attr:disabled=move || submitting.get() || draft.with(|d| d.trim().is_empty())
                on:click=move |_| submit.run(())
            >
                <Show when=move || submitting.get()>
                    <Spinner />
                </Show>
                "Submit"
            </Button>
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:title="Cancel"
                on:click=move |_| close.run(())
            >
                <X />
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_keeps_short_text() {
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_truncate_chars_cuts_on_char_boundary() {
        assert_eq!(truncate_chars("héllo wörld", 6), "héllo…");
    }
}
