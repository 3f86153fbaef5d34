mod adapters;
mod api;
mod app;
mod blocks;
mod cache;
mod components;
mod editor;
mod fallback;
mod html;
mod logging;
mod models;
mod pages;
mod state;
mod storage;
mod util;

use crate::api::EnvConfig;
use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = EnvConfig::new();
    logging::init(&config.log_level);
    log::info!("docs-folio: api at {}", config.api_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
