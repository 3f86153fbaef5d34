use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-2 rounded-lg border p-4 shadow-xs"}
    clx! {CardTitle, h3, "text-lg leading-snug font-semibold"}
    clx! {CardDescription, p, "text-muted-foreground text-sm"}
}

pub use components::*;
