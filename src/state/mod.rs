mod guestbook;
mod sections;
mod shell;

pub(crate) use guestbook::{
    Cooldown, GuestbookBoard, ListItem, SubmitOutcome, SUCCESS_TOAST_MS, WARNING_DISMISS_MS,
};
pub(crate) use sections::{OpenOutcome, QuoteOutcome, SectionSnapshot, SectionStore};
pub(crate) use shell::{
    navigate_to, print_title, tab_title, title_frames, view_text, word_count, ModeController, Navigator,
    SaveStatusTracker, DOCUMENT_NAME, PRINT_TITLE_RESTORE_MS, SAVE_DEBOUNCE_MS, UNTITLED_TITLE,
};

use crate::adapters::{
    GenerativeTextAdapter, HttpContentAdapter, HttpGenerativeAdapter, LocalGuestbookAdapter,
};
use crate::api::{ApiClient, EnvConfig};
use crate::editor::dom_field;
use crate::html::text_stats;
use crate::models::{FormatState, SaveStatus, Section, TextStats, ViewMode};
use crate::util::{now_ms, set_timeout};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

/// Reactive shell around the plain-Rust stores.
///
/// The stores are not signals; every mutation bumps `revision` so views that
/// read through [`AppState::snapshot`] re-render.
#[derive(Clone)]
pub(crate) struct AppState {
    pub store: SectionStore,
    pub board: GuestbookBoard,
    pub generative: Arc<dyn GenerativeTextAdapter>,
    pub cooldown: Cooldown,

    pub revision: RwSignal<u64>,

    pub nav: RwSignal<Navigator>,
    pub mode: RwSignal<ModeController>,
    pub save: RwSignal<SaveStatusTracker>,

    /// Editable document title (header input).
    pub title: RwSignal<String>,
    /// Cleared as soon as the user edits the title themselves.
    pub title_animating: RwSignal<bool>,

    /// Mood text in the quote generator.
    pub mood: RwSignal<String>,
    /// Increments on every navigation; the document area scrolls to top on change.
    pub scroll_epoch: RwSignal<u64>,
    pub word_stats_open: RwSignal<bool>,

    /// The rich-text field on screen (About or an open thought); the toolbar drives it.
    pub editor_ref: NodeRef<html::Div>,
}

impl AppState {
    pub fn new(config: EnvConfig) -> Self {
        let client = ApiClient::from_env(&config);
        let cooldown = Cooldown::new();
        let store = SectionStore::new(Arc::new(HttpContentAdapter::new(client.clone())));
        let board = GuestbookBoard::new(Arc::new(LocalGuestbookAdapter::new()), cooldown.clone());

        Self {
            store,
            board,
            generative: Arc::new(HttpGenerativeAdapter::new(client)),
            cooldown,
            revision: RwSignal::new(0),
            nav: RwSignal::new(Navigator::default()),
            mode: RwSignal::new(ModeController::default()),
            save: RwSignal::new(SaveStatusTracker::default()),
            title: RwSignal::new(UNTITLED_TITLE.to_string()),
            title_animating: RwSignal::new(true),
            mood: RwSignal::new(String::new()),
            scroll_epoch: RwSignal::new(0),
            word_stats_open: RwSignal::new(false),
            editor_ref: NodeRef::new(),
        }
    }

    pub fn bump(&self) {
        self.revision.update(|r| *r += 1);
    }

    /// Read store/board state inside a reactive scope.
    pub fn watch<T>(&self, f: impl FnOnce(&Self) -> T) -> T {
        self.revision.track();
        f(self)
    }

    /// Tracked read of the section data.
    pub fn snapshot(&self) -> SectionSnapshot {
        self.revision.track();
        self.store.snapshot()
    }

    pub fn active_section(&self) -> Section {
        self.nav.with(|n| n.active())
    }

    pub fn is_editing(&self) -> bool {
        self.mode.with(|m| m.mode().is_editing())
    }

    pub fn thought_open(&self) -> bool {
        self.revision.track();
        self.store.snapshot().selected_thought.is_some()
    }

    /// Whether the toolbar drives a live field right now.
    pub fn editor_active(&self) -> bool {
        let section = self.active_section();
        let open = self.thought_open();
        self.mode.with(|m| m.tracks_formats(section, open))
    }

    pub fn editor_active_untracked(&self) -> bool {
        untrack(|| self.editor_active())
    }

    pub fn navigate(&self, section: Section) {
        let (store, board) = (self.store.clone(), self.board.clone());
        self.nav
            .update(|n| {
                navigate_to(n, section, &store, &board);
            });
        self.scroll_epoch.update(|e| *e += 1);
        self.bump();
        self.load_section(section);
    }

    pub fn load_section(&self, section: Section) {
        let state = self.clone();
        spawn_local(async move {
            let outcome = state.store.ensure_loaded(section).await;
            log::debug!("sections: {section} -> {outcome:?}");
            if section == Section::Recommendations && state.board.load_entries().await.is_err() {
                state.save.update(|s| s.mark_error());
            }
            state.bump();
        });
        self.bump();
    }

    pub fn set_mode(&self, mode: ViewMode) {
        self.mode.update(|m| m.set_mode(mode));
        if !mode.is_editing() {
            self.board.close_editor();
            self.bump();
        }
    }

    pub fn update_formats(&self, formats: FormatState) {
        let section = self.active_section();
        let open = self.store.snapshot().selected_thought.is_some();
        let unchanged = self.mode.with_untracked(|m| m.formats() == formats);
        if !unchanged {
            self.mode.update(|m| {
                m.update_formats(section, open, formats);
            });
        }
    }

    /// Pulse the save indicator; it settles one debounce window after the last call.
    pub fn content_changed(&self) {
        self.save.update(|s| s.content_changed(now_ms()));
        let save = self.save;
        set_timeout(SAVE_DEBOUNCE_MS as i32, move || {
            save.update(|s| {
                s.tick(now_ms());
            });
        });
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save.with(|s| s.status())
    }

    /// Editor input on the About field or an open thought.
    pub fn edit_rich_text(&self, html: String) {
        match self.active_section() {
            Section::About => self.store.set_about_html(html),
            Section::Thoughts => {
                if !self.store.set_thought_html(html) {
                    return;
                }
            }
            _ => return,
        }
        self.bump();
        self.content_changed();
    }

    pub fn open_thought(&self, id: String) {
        let state = self.clone();
        spawn_local(async move {
            let outcome = state.store.open_thought(&id).await;
            if !matches!(outcome, OpenOutcome::Opened { fetched: false }) {
                log::debug!("thoughts: open {id} -> {outcome:?}");
            }
            state.bump();
        });
        self.bump();
    }

    pub fn close_thought(&self) {
        self.store.close_thought();
        self.bump();
    }

    pub fn polish_about(&self) {
        let state = self.clone();
        spawn_local(async move {
            let polished = state.store.polish_about(state.generative.as_ref()).await;
            state.bump();
            if let Some(p) = polished {
                if let Some(label) = p.format_label {
                    log::info!("about: polished as {label}");
                }
                state.content_changed();
            }
        });
        self.bump();
    }

    /// `random` ignores the mood input ("Surprise Me").
    pub fn generate_quote(&self, random: bool) {
        let mood = if random {
            None
        } else {
            Some(self.mood.get_untracked())
        };
        let state = self.clone();
        spawn_local(async move {
            let outcome = state
                .store
                .generate_quote(
                    state.generative.as_ref(),
                    mood.as_deref(),
                    &state.cooldown,
                    now_ms(),
                )
                .await;
            match outcome {
                QuoteOutcome::Added(_) => {
                    state.board.reset_notices();
                    if !random {
                        state.mood.set(String::new());
                    }
                    state.content_changed();
                }
                QuoteOutcome::CoolingDown { remaining_secs } => {
                    state.show_cooldown(remaining_secs);
                }
                QuoteOutcome::Skipped | QuoteOutcome::Busy => {}
            }
            state.bump();
        });
        self.bump();
    }

    pub fn show_cooldown(&self, remaining_secs: i64) {
        let id = self.board.warn_cooldown(remaining_secs);
        self.schedule_warning_dismiss(id);
    }

    fn schedule_warning_dismiss(&self, id: u64) {
        let state = self.clone();
        set_timeout(WARNING_DISMISS_MS, move || {
            state.board.dismiss_warning(id);
            state.bump();
        });
    }

    pub fn submit_suggestion(&self, category: String) {
        let state = self.clone();
        spawn_local(async move {
            let outcome = state.board.submit_inline(&category, now_ms()).await;
            match outcome {
                SubmitOutcome::Submitted(_) => {
                    if let Some(id) = state.board.success() {
                        let s = state.clone();
                        set_timeout(SUCCESS_TOAST_MS, move || {
                            s.board.dismiss_success(id);
                            s.bump();
                        });
                    }
                    state.content_changed();
                }
                SubmitOutcome::CoolingDown { .. } => {
                    if let Some(w) = state.board.warning() {
                        state.schedule_warning_dismiss(w.id);
                    }
                }
                SubmitOutcome::Failed(_)
                | SubmitOutcome::Empty
                | SubmitOutcome::Busy => {}
            }
            state.bump();
        });
        self.bump();
    }

    /// Status-bar word count for the active view.
    pub fn word_count(&self) -> usize {
        let snap = self.snapshot();
        let section = self.active_section();
        word_count(section, &snap, &self.board.entries())
    }

    /// Whether a rich-text field (About, or an open thought) is on screen.
    pub fn field_on_screen(&self) -> bool {
        let section = self.active_section();
        section.has_rich_text() && (section != Section::Thoughts || self.thought_open())
    }

    /// Word, character and non-space character figures for the active view.
    ///
    /// Reads the rendered field when one is mounted, the section data otherwise.
    pub fn view_stats(&self) -> TextStats {
        let snap = self.snapshot();
        if self.field_on_screen() {
            if let Some(field) = dom_field(self.editor_ref, self.is_editing()) {
                return field.plain_text_stats();
            }
        }
        text_stats(&view_text(self.active_section(), &snap, &self.board.entries()))
    }

    /// Play the "Untitled document" to document-name typing animation.
    pub fn start_title_animation(&self) {
        let frames = title_frames(UNTITLED_TITLE, DOCUMENT_NAME);
        let last = frames.len().saturating_sub(1);
        for (i, frame) in frames.into_iter().enumerate() {
            let (title, animating) = (self.title, self.title_animating);
            set_timeout(frame.at_ms, move || {
                if !animating.get_untracked() {
                    return;
                }
                title.set(frame.title);
                if i == last {
                    animating.set(false);
                }
            });
        }
    }

    /// Print the document with a section-specific title, restoring the tab title afterwards.
    pub fn print(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let previous = crate::util::document_title();
        crate::util::set_document_title(&print_title(self.active_section()));
        if let Err(e) = window.print() {
            log::warn!("print failed: {e:?}");
        }
        set_timeout(PRINT_TITLE_RESTORE_MS, move || {
            crate::util::set_document_title(&previous);
        });
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
