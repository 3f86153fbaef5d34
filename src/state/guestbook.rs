//! Guestbook merge engine: CMS list items blended with approved visitor
//! suggestions, plus the inline suggestion editor state.

use crate::adapters::{GuestbookAdapter, GuestbookError};
use crate::models::{GuestbookEntry, RecommendationSection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Client-side rate limit shared by suggestions and quote generation.
pub(crate) const COOLDOWN_MS: i64 = 10_000;
pub(crate) const WARNING_DISMISS_MS: i32 = 3_000;
pub(crate) const SUCCESS_TOAST_MS: i32 = 4_000;

pub(crate) fn cooldown_message(remaining_secs: i64) -> String {
    format!("Please wait {remaining_secs}s before generating again.")
}

/// Last accepted action time. Cloning shares the same clock slot.
#[derive(Clone, Debug, Default)]
pub(crate) struct Cooldown {
    last_ms: Arc<Mutex<Option<i64>>>,
}

impl Cooldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot at `now_ms`, or return the whole seconds still to wait.
    pub fn try_acquire(&self, now_ms: i64) -> Result<(), i64> {
        let Ok(mut last) = self.last_ms.lock() else {
            return Ok(());
        };
        if let Some(prev) = *last {
            let elapsed = now_ms - prev;
            if elapsed < COOLDOWN_MS {
                let remaining = COOLDOWN_MS - elapsed;
                return Err((remaining + 999) / 1000);
            }
        }
        *last = Some(now_ms);
        Ok(())
    }
}

/// One rendered row of a recommendation list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ListItem {
    /// Rich HTML from the CMS.
    Curated(String),
    Suggested(GuestbookEntry),
}

/// CMS items in CMS order, then approved suggestions for this section in fetch order.
pub(crate) fn merge_items(section: &RecommendationSection, entries: &[GuestbookEntry]) -> Vec<ListItem> {
    section
        .items
        .iter()
        .cloned()
        .map(ListItem::Curated)
        .chain(
            entries
                .iter()
                .filter(|e| e.is_approved && e.category == section.id)
                .cloned()
                .map(ListItem::Suggested),
        )
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    /// Blank input: nothing sent, cooldown untouched.
    Empty,
    CoolingDown { remaining_secs: i64 },
    /// Another submission is still waiting on the adapter.
    Busy,
    Submitted(GuestbookEntry),
    Failed(GuestbookError),
}

/// Transient notice with an id so a late auto-dismiss never clears a newer one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub id: u64,
    pub text: String,
}

#[derive(Debug, Default)]
struct BoardState {
    entries: Vec<GuestbookEntry>,
    loaded: bool,
    loading: bool,

    inputs: HashMap<String, String>,
    focused: Option<String>,
    guest_name: String,
    submitting: bool,

    next_notice_id: u64,
    warning: Option<Notice>,
    success: Option<u64>,
    /// Last submission failure, shown until the next success or navigation.
    failure: Option<String>,
}

impl BoardState {
    fn notice_id(&mut self) -> u64 {
        self.next_notice_id += 1;
        self.next_notice_id
    }
}

#[derive(Clone)]
pub(crate) struct GuestbookBoard {
    state: Arc<Mutex<BoardState>>,
    adapter: Arc<dyn GuestbookAdapter>,
    cooldown: Cooldown,
}

impl GuestbookBoard {
    pub fn new(adapter: Arc<dyn GuestbookAdapter>, cooldown: Cooldown) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState::default())),
            adapter,
            cooldown,
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        self.state.lock().ok().map(|mut s| f(&mut s))
    }

    /// Fetch approved entries once per session. An empty result is retried on the next call.
    pub async fn load_entries(&self) -> Result<(), GuestbookError> {
        let start = self.with(|s| {
            if s.loaded || s.loading {
                false
            } else {
                s.loading = true;
                true
            }
        });
        if start != Some(true) {
            return Ok(());
        }

        let res = self.adapter.list_approved(None).await;
        self.with(|s| {
            s.loading = false;
            match &res {
                Ok(entries) => {
                    s.entries = entries.clone();
                    s.loaded = !entries.is_empty();
                }
                Err(e) => log::error!("guestbook: listing failed: {e}"),
            }
        });
        res.map(|_| ())
    }

    pub fn entries(&self) -> Vec<GuestbookEntry> {
        self.with(|s| s.entries.clone()).unwrap_or_default()
    }

    pub fn visible_items(&self, section: &RecommendationSection) -> Vec<ListItem> {
        self.with(|s| merge_items(section, &s.entries))
            .unwrap_or_default()
    }

    pub fn input(&self, category: &str) -> String {
        self.with(|s| s.inputs.get(category).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn set_input(&self, category: &str, value: String) {
        self.with(|s| s.inputs.insert(category.to_string(), value));
    }

    pub fn focused(&self) -> Option<String> {
        self.with(|s| s.focused.clone()).flatten()
    }

    pub fn focus(&self, category: &str) {
        self.with(|s| s.focused = Some(category.to_string()));
    }

    pub fn close_editor(&self) {
        self.with(|s| s.focused = None);
    }

    pub fn guest_name(&self) -> String {
        self.with(|s| s.guest_name.clone()).unwrap_or_default()
    }

    pub fn set_guest_name(&self, name: String) {
        self.with(|s| s.guest_name = name);
    }

    pub fn is_submitting(&self) -> bool {
        self.with(|s| s.submitting).unwrap_or(false)
    }

    pub fn warning(&self) -> Option<Notice> {
        self.with(|s| s.warning.clone()).flatten()
    }

    /// Show a cooldown notice; returns its id for the auto-dismiss timer.
    pub fn warn_cooldown(&self, remaining_secs: i64) -> u64 {
        self.with(|s| {
            let id = s.notice_id();
            s.warning = Some(Notice {
                id,
                text: cooldown_message(remaining_secs),
            });
            id
        })
        .unwrap_or_default()
    }

    pub fn dismiss_warning(&self, id: u64) {
        self.with(|s| {
            if s.warning.as_ref().map(|w| w.id) == Some(id) {
                s.warning = None;
            }
        });
    }

    pub fn success(&self) -> Option<u64> {
        self.with(|s| s.success).flatten()
    }

    pub fn dismiss_success(&self, id: u64) {
        self.with(|s| {
            if s.success == Some(id) {
                s.success = None;
            }
        });
    }

    pub fn failure(&self) -> Option<String> {
        self.with(|s| s.failure.clone()).flatten()
    }

    /// Drop transient notices (on navigation).
    pub fn reset_notices(&self) {
        self.with(|s| {
            s.warning = None;
            s.success = None;
            s.failure = None;
        });
    }

    /// Check the shared cooldown, surfacing the notice on rejection.
    pub fn check_rate_limit(&self, now_ms: i64) -> Result<(), i64> {
        match self.cooldown.try_acquire(now_ms) {
            Ok(()) => {
                self.with(|s| s.warning = None);
                Ok(())
            }
            Err(remaining) => {
                self.warn_cooldown(remaining);
                Err(remaining)
            }
        }
    }

    /// Submit the inline input for `category` with the optional guest name.
    pub async fn submit_inline(&self, category: &str, now_ms: i64) -> SubmitOutcome {
        let content = self.input(category);
        let name = self.guest_name();
        let author = Some(name.as_str()).filter(|n| !n.trim().is_empty());
        self.submit(category, &content, author, now_ms).await
    }

    pub async fn submit(
        &self,
        category: &str,
        content: &str,
        author: Option<&str>,
        now_ms: i64,
    ) -> SubmitOutcome {
        let content = content.trim();
        if content.is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.is_submitting() {
            return SubmitOutcome::Busy;
        }
        if let Err(remaining_secs) = self.check_rate_limit(now_ms) {
            return SubmitOutcome::CoolingDown { remaining_secs };
        }

        self.with(|s| s.submitting = true);
        let res = self
            .adapter
            .add(content, category, author.map(str::trim))
            .await;

        self.with(|s| {
            s.submitting = false;
            match res {
                Ok(entry) => {
                    s.inputs.insert(category.to_string(), String::new());
                    s.focused = None;
                    let id = s.notice_id();
                    s.success = Some(id);
                    s.failure = None;
                    SubmitOutcome::Submitted(entry)
                }
                Err(e) => {
                    log::error!("guestbook: submission to {category} failed: {e}");
                    s.failure = Some(format!("Could not send your suggestion: {e}"));
                    SubmitOutcome::Failed(e)
                }
            }
        })
        .unwrap_or(SubmitOutcome::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{GuestbookResult, ANONYMOUS_AUTHORS};
    use async_trait::async_trait;
    use futures::executor::block_on;

    #[derive(Default)]
    struct MockGuestbook {
        approved: Vec<GuestbookEntry>,
        fail_add: bool,
        fail_list: bool,
        adds: Mutex<Vec<(String, String, Option<String>)>>,
        lists: Mutex<usize>,
    }

    impl MockGuestbook {
        fn add_count(&self) -> usize {
            self.adds.lock().map(|a| a.len()).unwrap_or(0)
        }
    }

    #[async_trait(?Send)]
    impl GuestbookAdapter for MockGuestbook {
        async fn list_approved(
            &self,
            category: Option<&str>,
        ) -> GuestbookResult<Vec<GuestbookEntry>> {
            if let Ok(mut n) = self.lists.lock() {
                *n += 1;
            }
            if self.fail_list {
                return Err(GuestbookError::StorageUnavailable);
            }
            Ok(self
                .approved
                .iter()
                .filter(|e| category.map_or(true, |c| e.category == c))
                .cloned()
                .collect())
        }

        async fn add(
            &self,
            content: &str,
            category: &str,
            author: Option<&str>,
        ) -> GuestbookResult<GuestbookEntry> {
            if let Ok(mut a) = self.adds.lock() {
                a.push((
                    content.to_string(),
                    category.to_string(),
                    author.map(str::to_string),
                ));
            }
            if self.fail_add {
                return Err(GuestbookError::WriteFailed("quota exceeded".to_string()));
            }
            Ok(GuestbookEntry {
                id: "new".to_string(),
                content: content.to_string(),
                category: category.to_string(),
                author: author
                    .map(str::to_string)
                    .unwrap_or_else(|| ANONYMOUS_AUTHORS[3].to_string()),
                created_at: "2024-01-01T00:00:00.000Z".to_string(),
                color: Some("#E57373".to_string()),
                is_approved: false,
            })
        }
    }

    fn entry(id: &str, category: &str, approved: bool) -> GuestbookEntry {
        GuestbookEntry {
            id: id.to_string(),
            content: format!("suggestion {id}"),
            category: category.to_string(),
            author: "Ada".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            color: None,
            is_approved: approved,
        }
    }

    fn books() -> RecommendationSection {
        RecommendationSection {
            id: "books".to_string(),
            title: "Books".to_string(),
            items: vec!["<b>Dune</b>".to_string(), "Shape Up".to_string()],
        }
    }

    fn board(mock: Arc<MockGuestbook>) -> GuestbookBoard {
        GuestbookBoard::new(mock, Cooldown::new())
    }

    #[test]
    fn test_cooldown_boundary() {
        let c = Cooldown::new();
        assert_eq!(c.try_acquire(50_000), Ok(()));
        assert_eq!(c.try_acquire(50_001), Err(10));
        assert_eq!(c.try_acquire(59_999), Err(1));
        assert_eq!(c.try_acquire(60_001), Ok(()));
        // The accepted attempt restarts the window.
        assert_eq!(c.try_acquire(65_001), Err(5));
    }

    #[test]
    fn test_cooldown_exact_boundary_is_permitted() {
        let c = Cooldown::new();
        assert_eq!(c.try_acquire(0), Ok(()));
        assert_eq!(c.try_acquire(10_000), Ok(()));
    }

    #[test]
    fn test_cooldown_message_format() {
        assert_eq!(cooldown_message(7), "Please wait 7s before generating again.");
    }

    #[test]
    fn test_merge_static_first_then_approved_for_section() {
        let entries = vec![
            entry("1", "books", true),
            entry("2", "books", false),
            entry("3", "tools", true),
            entry("4", "books", true),
        ];
        let items = merge_items(&books(), &entries);
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], ListItem::Curated("<b>Dune</b>".to_string()));
        assert_eq!(items[1], ListItem::Curated("Shape Up".to_string()));
        assert!(matches!(&items[2], ListItem::Suggested(e) if e.id == "1"));
        assert!(matches!(&items[3], ListItem::Suggested(e) if e.id == "4"));
    }

    #[test]
    fn test_whitespace_submission_is_noop() {
        let mock = Arc::new(MockGuestbook::default());
        let b = board(mock.clone());
        let out = block_on(b.submit("books", "   \n\t", None, 0));
        assert_eq!(out, SubmitOutcome::Empty);
        assert_eq!(mock.add_count(), 0);
        // The cooldown was not consumed.
        let out = block_on(b.submit("books", "Dune", None, 1));
        assert!(matches!(out, SubmitOutcome::Submitted(_)));
    }

    #[test]
    fn test_submission_within_cooldown_rejected_without_adapter_call() {
        let mock = Arc::new(MockGuestbook::default());
        let b = board(mock.clone());
        assert!(matches!(
            block_on(b.submit("books", "Dune", None, 1_000)),
            SubmitOutcome::Submitted(_)
        ));

        let out = block_on(b.submit("books", "Her", None, 5_500));
        assert_eq!(out, SubmitOutcome::CoolingDown { remaining_secs: 6 });
        assert_eq!(mock.add_count(), 1);
        assert_eq!(
            b.warning().map(|w| w.text),
            Some("Please wait 6s before generating again.".to_string())
        );

        let out = block_on(b.submit("books", "Her", None, 11_001));
        assert!(matches!(out, SubmitOutcome::Submitted(_)));
        assert_eq!(mock.add_count(), 2);
        assert!(b.warning().is_none());
    }

    #[test]
    fn test_submitted_entry_is_unapproved_and_not_listed() {
        let mock = Arc::new(MockGuestbook::default());
        let b = board(mock.clone());
        block_on(b.load_entries()).expect("listing should succeed");

        let SubmitOutcome::Submitted(e) = block_on(b.submit("books", "Dune", None, 0)) else {
            panic!("expected a submitted entry");
        };
        assert!(!e.is_approved);
        assert!(ANONYMOUS_AUTHORS.contains(&e.author.as_str()));
        assert_eq!(b.visible_items(&books()).len(), 2);
    }

    #[test]
    fn test_inline_success_clears_input_closes_editor_and_shows_toast() {
        let mock = Arc::new(MockGuestbook::default());
        let b = board(mock.clone());
        b.focus("books");
        b.set_input("books", "  Dune  ".to_string());
        b.set_guest_name("  Ada ".to_string());

        let out = block_on(b.submit_inline("books", 0));
        assert!(matches!(out, SubmitOutcome::Submitted(_)));
        assert_eq!(b.input("books"), "");
        assert!(b.focused().is_none());
        assert!(b.success().is_some());

        let adds = mock.adds.lock().map(|a| a.clone()).unwrap_or_default();
        assert_eq!(
            adds,
            vec![("Dune".to_string(), "books".to_string(), Some("Ada".to_string()))]
        );
    }

    #[test]
    fn test_backend_failure_is_reported_not_success() {
        let mock = Arc::new(MockGuestbook {
            fail_add: true,
            ..Default::default()
        });
        let b = board(mock.clone());
        b.focus("tools");
        b.set_input("tools", "Zed".to_string());

        let out = block_on(b.submit_inline("tools", 0));
        assert!(matches!(out, SubmitOutcome::Failed(GuestbookError::WriteFailed(_))));
        assert!(b.success().is_none());
        assert_eq!(
            b.failure().as_deref(),
            Some("Could not send your suggestion: could not write guestbook entry: quota exceeded")
        );
        assert_eq!(b.input("tools"), "Zed");
        assert_eq!(b.focused().as_deref(), Some("tools"));
        assert!(!b.is_submitting());
    }

    #[test]
    fn test_load_entries_once_and_failure_reported() {
        let mock = Arc::new(MockGuestbook {
            approved: vec![entry("1", "books", true)],
            ..Default::default()
        });
        let b = board(mock.clone());
        block_on(b.load_entries()).expect("listing should succeed");
        block_on(b.load_entries()).expect("second call is a no-op");
        assert_eq!(mock.lists.lock().map(|n| *n).unwrap_or(0), 1);
        assert_eq!(b.visible_items(&books()).len(), 3);

        let failing = Arc::new(MockGuestbook {
            fail_list: true,
            ..Default::default()
        });
        let b = board(failing);
        assert!(block_on(b.load_entries()).is_err());
        assert!(b.entries().is_empty());
    }

    #[test]
    fn test_stale_dismiss_keeps_newer_warning() {
        let b = board(Arc::new(MockGuestbook::default()));
        let first = b.warn_cooldown(5);
        let second = b.warn_cooldown(3);
        b.dismiss_warning(first);
        assert_eq!(b.warning().map(|w| w.id), Some(second));
        b.dismiss_warning(second);
        assert!(b.warning().is_none());
    }
}
