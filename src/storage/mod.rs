use serde::{Deserialize, Serialize};

/// All guestbook entries (pending and approved) live under this one key.
pub(crate) const GUESTBOOK_KEY: &str = "docs_folio_guestbook";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn storage_available() -> bool {
    local_storage().is_some()
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

/// Returns false when storage is missing, full, or the value does not serialize.
pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) -> bool {
    let Ok(json) = serde_json::to_string(value) else {
        return false;
    };
    match local_storage() {
        Some(storage) => storage.set_item(key, &json).is_ok(),
        None => false,
    }
}

#[cfg(test)]
pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}
