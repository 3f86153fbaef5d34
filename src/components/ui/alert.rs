use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-md border px-3 py-2 text-sm print:hidden"}
    clx! {AlertDescription, p, "text-sm leading-relaxed"}
}

pub use components::*;

/// Cooldown notice style.
pub const ALERT_WARNING: &str = "border-amber-300 bg-amber-50 text-amber-900";
/// Submission failure style.
pub const ALERT_ERROR: &str = "border-destructive/30 text-destructive";
/// Submission success style.
pub const ALERT_SUCCESS: &str = "border-emerald-300 bg-emerald-50 text-emerald-900";
