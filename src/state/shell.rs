//! Document shell state machines: save status, view mode, navigation, title.

use super::guestbook::GuestbookBoard;
use super::sections::{SectionSnapshot, SectionStore};
use crate::html::{count_words, strip_html};
use crate::models::{FormatState, GuestbookEntry, SaveStatus, Section, ViewMode};

pub(crate) const SAVE_DEBOUNCE_MS: i64 = 1_000;
pub(crate) const PRINT_TITLE_RESTORE_MS: i32 = 500;

pub(crate) const UNTITLED_TITLE: &str = "Untitled document";
pub(crate) const DOCUMENT_NAME: &str = "Adi's Personal Doc";
const APP_NAME: &str = "Docs Folio";

const TITLE_START_DELAY_MS: i32 = 1_000;
const TITLE_BACKSPACE_MS: i32 = 30;
const TITLE_TYPE_PAUSE_MS: i32 = 300;
const TITLE_TYPE_MS: i32 = 80;

/// `saved -> saving -> saved`, with every content change pushing the settle time out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SaveStatusTracker {
    status: SaveStatus,
    settle_at_ms: Option<i64>,
}

impl SaveStatusTracker {
    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn content_changed(&mut self, now_ms: i64) {
        self.status = SaveStatus::Saving;
        self.settle_at_ms = Some(now_ms + SAVE_DEBOUNCE_MS);
    }

    /// Settle to `saved` once the debounce window since the last change has passed.
    pub fn tick(&mut self, now_ms: i64) -> SaveStatus {
        if let (SaveStatus::Saving, Some(at)) = (self.status, self.settle_at_ms) {
            if now_ms >= at {
                self.status = SaveStatus::Saved;
                self.settle_at_ms = None;
            }
        }
        self.status
    }

    /// Startup failure (e.g. the guestbook store could not be read).
    pub fn mark_error(&mut self) {
        self.status = SaveStatus::Error;
        self.settle_at_ms = None;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ModeController {
    mode: ViewMode,
    formats: FormatState,
}

impl ModeController {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        if !mode.is_editing() {
            self.formats = FormatState::default();
        }
    }

    /// A rich-text field is on screen and editable.
    pub fn tracks_formats(&self, section: Section, thought_open: bool) -> bool {
        self.mode.is_editing()
            && section.has_rich_text()
            && (section != Section::Thoughts || thought_open)
    }

    /// Record a fresh format query; ignored while tracking is off.
    pub fn update_formats(&mut self, section: Section, thought_open: bool, formats: FormatState) -> bool {
        if !self.tracks_formats(section, thought_open) {
            return false;
        }
        self.formats = formats;
        true
    }

    pub fn formats(&self) -> FormatState {
        self.formats
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Navigator {
    active: Section,
    drawer_open: bool,
}

impl Navigator {
    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn set_drawer_open(&mut self, open: bool) {
        self.drawer_open = open;
    }

    /// Returns true when the active section actually changed.
    pub fn select(&mut self, section: Section) -> bool {
        self.drawer_open = false;
        let changed = self.active != section;
        self.active = section;
        changed
    }
}

/// Make `section` active and drop per-view transient state.
///
/// The caller scrolls the document area to its top.
pub(crate) fn navigate_to(
    nav: &mut Navigator,
    section: Section,
    store: &SectionStore,
    board: &GuestbookBoard,
) -> bool {
    store.close_thought();
    board.reset_notices();
    nav.select(section)
}

/// The text the status-bar word count is computed over.
pub(crate) fn view_text(section: Section, snap: &SectionSnapshot, entries: &[GuestbookEntry]) -> String {
    match section {
        Section::About => strip_html(&snap.about_html),
        Section::Thoughts => match &snap.selected_thought {
            Some(_) if !snap.thought_html.is_empty() => strip_html(&snap.thought_html),
            Some(t) => strip_html(&t.content),
            None => snap
                .thoughts
                .iter()
                .map(|t| format!("{} {}", t.title, strip_html(&t.content)))
                .collect::<Vec<_>>()
                .join(" "),
        },
        Section::Quotes => snap
            .quotes
            .iter()
            .map(|q| format!("{} {}", q.text, q.author))
            .collect::<Vec<_>>()
            .join(" "),
        Section::Crafts => strip_html(&snap.crafts_html),
        Section::Recommendations => {
            let mut parts: Vec<String> = Vec::new();
            for r in &snap.recommendations {
                parts.push(r.title.clone());
                parts.extend(r.items.iter().map(|i| strip_html(i)));
            }
            parts.extend(
                entries
                    .iter()
                    .filter(|e| e.is_approved)
                    .map(|e| e.content.clone()),
            );
            parts.join(" ")
        }
    }
}

pub(crate) fn word_count(section: Section, snap: &SectionSnapshot, entries: &[GuestbookEntry]) -> usize {
    count_words(&view_text(section, snap, entries))
}

pub(crate) fn tab_title(title: &str) -> String {
    format!("{title} - {APP_NAME}")
}

pub(crate) fn print_title(section: Section) -> String {
    format!("{DOCUMENT_NAME} - {}", section.label())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TitleFrame {
    /// Offset from mount.
    pub at_ms: i32,
    pub title: String,
}

fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Backspace `from` away, pause, then type `to`.
pub(crate) fn title_frames(from: &str, to: &str) -> Vec<TitleFrame> {
    let mut frames = Vec::new();
    let mut t = TITLE_START_DELAY_MS;

    for i in (0..=from.chars().count()).rev() {
        frames.push(TitleFrame {
            at_ms: t,
            title: prefix(from, i),
        });
        t += TITLE_BACKSPACE_MS;
    }

    t += TITLE_TYPE_PAUSE_MS;
    for i in 1..=to.chars().count() {
        frames.push(TitleFrame {
            at_ms: t,
            title: prefix(to, i),
        });
        t += TITLE_TYPE_MS;
    }
    frames
}
