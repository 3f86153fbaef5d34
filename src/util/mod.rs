pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// ISO-8601 UTC timestamp, the format guestbook entries carry in `createdAt`.
pub(crate) fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Uniform index in `0..len`; falls back to 0 when the platform RNG is unavailable.
pub(crate) fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) as usize % len,
        Err(_) => 0,
    }
}

/// Open `url` in a new browsing context without giving it a handle back to us.
pub(crate) fn open_in_new_tab(url: &str) {
    if url.trim().is_empty() {
        return;
    }
    if let Some(window) = web_sys::window() {
        if let Err(e) =
            window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")
        {
            log::warn!("failed to open link {url}: {e:?}");
        }
    }
}

pub(crate) fn set_document_title(title: &str) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(title);
    }
}

pub(crate) fn document_title() -> String {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.title())
        .unwrap_or_default()
}

/// Run `f` once after `ms`. Returns the timer id; a failed schedule is logged.
pub(crate) fn set_timeout(ms: i32, f: impl FnOnce() + 'static) -> Option<i32> {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        log::warn!("timer: no window, {ms}ms callback dropped");
        return None;
    };
    let cb = Closure::once_into_js(f);
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("timer: scheduling {ms}ms callback failed: {e:?}");
            None
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_timeout_reports_timer_id() {
        let id = set_timeout(10, || {});
        assert!(id.is_some_and(|id| id > 0));
    }
}
