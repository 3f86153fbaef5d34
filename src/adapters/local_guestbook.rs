use super::{GuestbookAdapter, GuestbookError, GuestbookResult};
use crate::models::GuestbookEntry;
use crate::storage::{load_json_from_storage, save_json_to_storage, storage_available, GUESTBOOK_KEY};
use crate::util::{now_iso, now_ms, random_index};
use async_trait::async_trait;

pub(crate) const ANONYMOUS_AUTHORS: &[&str] = &[
    "Anonymous Armadillo",
    "Anonymous Buffalo",
    "Anonymous Capybara",
    "Anonymous Dingo",
    "Anonymous Elephant",
    "Anonymous Ferret",
    "Anonymous Giraffe",
];

pub(crate) const ENTRY_COLORS: &[&str] = &[
    "#E57373", "#F06292", "#BA68C8", "#9575CD", "#7986CB", "#64B5F6", "#4FC3F7", "#4DD0E1",
    "#4DB6AC", "#81C784",
];

/// A trimmed non-empty name wins; otherwise `roll` picks from the animal rotation.
pub(crate) fn pick_author(author: Option<&str>, roll: usize) -> String {
    match author.map(str::trim).filter(|a| !a.is_empty()) {
        Some(name) => name.to_string(),
        None => ANONYMOUS_AUTHORS[roll % ANONYMOUS_AUTHORS.len()].to_string(),
    }
}

pub(crate) fn pick_color(roll: usize) -> String {
    ENTRY_COLORS[roll % ENTRY_COLORS.len()].to_string()
}

pub(crate) fn approved_in(entries: Vec<GuestbookEntry>, category: Option<&str>) -> Vec<GuestbookEntry> {
    entries
        .into_iter()
        .filter(|e| e.is_approved)
        .filter(|e| category.map_or(true, |c| e.category == c))
        .collect()
}

/// Moderation queue kept in `localStorage` under one key.
///
/// Entries are approved out of band by editing the stored JSON; this adapter
/// only ever appends unapproved ones.
#[derive(Clone, Debug)]
pub(crate) struct LocalGuestbookAdapter {
    key: String,
}

impl LocalGuestbookAdapter {
    pub fn new() -> Self {
        Self::with_key(GUESTBOOK_KEY)
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn load_all(&self) -> GuestbookResult<Vec<GuestbookEntry>> {
        if !storage_available() {
            return Err(GuestbookError::StorageUnavailable);
        }
        Ok(load_json_from_storage::<Vec<GuestbookEntry>>(&self.key).unwrap_or_default())
    }
}

impl Default for LocalGuestbookAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl GuestbookAdapter for LocalGuestbookAdapter {
    async fn list_approved(&self, category: Option<&str>) -> GuestbookResult<Vec<GuestbookEntry>> {
        Ok(approved_in(self.load_all()?, category))
    }

    async fn add(
        &self,
        content: &str,
        category: &str,
        author: Option<&str>,
    ) -> GuestbookResult<GuestbookEntry> {
        let mut all = self.load_all()?;
        let entry = GuestbookEntry {
            id: now_ms().to_string(),
            content: content.to_string(),
            category: category.to_string(),
            author: pick_author(author, random_index(ANONYMOUS_AUTHORS.len())),
            created_at: now_iso(),
            color: Some(pick_color(random_index(ENTRY_COLORS.len()))),
            is_approved: false,
        };
        all.push(entry.clone());

        if !save_json_to_storage(&self.key, &all) {
            return Err(GuestbookError::WriteFailed(format!(
                "localStorage rejected {} entries",
                all.len()
            )));
        }
        log::debug!("guestbook: queued entry {} for {}", entry.id, entry.category);
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, category: &str, approved: bool) -> GuestbookEntry {
        GuestbookEntry {
            id: id.to_string(),
            content: format!("content {id}"),
            category: category.to_string(),
            author: "a".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            color: None,
            is_approved: approved,
        }
    }

    #[test]
    fn test_pick_author_anonymous_rotation() {
        assert_eq!(pick_author(None, 3), "Anonymous Dingo");
        assert_eq!(pick_author(Some("   "), 0), "Anonymous Armadillo");
        assert_eq!(pick_author(Some(" Ada "), 0), "Ada");
        assert!(ANONYMOUS_AUTHORS.contains(&pick_author(None, 99).as_str()));
    }

    #[test]
    fn test_pick_color_from_palette() {
        assert_eq!(pick_color(0), "#E57373");
        assert_eq!(pick_color(10), "#E57373");
        assert_eq!(pick_color(9), "#81C784");
    }

    #[test]
    fn test_approved_in_filters_status_and_category() {
        let all = vec![
            entry("1", "books", true),
            entry("2", "books", false),
            entry("3", "tools", true),
        ];
        let ids: Vec<_> = approved_in(all.clone(), None)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        let books = approved_in(all, Some("books"));
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "1");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::storage::remove_from_storage;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_added_entries_stay_hidden_until_approved() {
        let key = "docs_folio_guestbook_test";
        remove_from_storage(key);
        let adapter = LocalGuestbookAdapter::with_key(key);

        let created = adapter
            .add("Dune", "books", None)
            .await
            .expect("add should succeed");
        assert!(!created.is_approved);
        assert!(ANONYMOUS_AUTHORS.contains(&created.author.as_str()));
        assert!(created.color.is_some());

        let visible = adapter
            .list_approved(Some("books"))
            .await
            .expect("list should succeed");
        assert!(visible.is_empty());

        let mut all: Vec<GuestbookEntry> =
            load_json_from_storage(key).expect("entry should be persisted");
        all[0].is_approved = true;
        assert!(save_json_to_storage(key, &all));

        let visible = adapter
            .list_approved(Some("books"))
            .await
            .expect("list should succeed");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].content, "Dune");

        remove_from_storage(key);
    }
}
