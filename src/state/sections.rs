//! Section content store: lazy, fetch-once section slots with liveness tickets.

use super::guestbook::Cooldown;
use crate::adapters::{ContentAdapter, GenerativeTextAdapter};
use crate::html::{about_html, inner_text, paragraphs_to_html, thought_body_html};
use crate::models::{PolishedContent, Quote, RecommendationSection, Section, Thought};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Everything the document view renders, as of one moment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SectionSnapshot {
    pub about_html: String,
    pub thoughts: Vec<Thought>,
    pub selected_thought: Option<Thought>,
    /// Rendered body of `selected_thought`; what the editor shows.
    pub thought_html: String,
    pub quotes: Vec<Quote>,
    pub crafts_html: String,
    pub recommendations: Vec<RecommendationSection>,
}

impl SectionSnapshot {
    /// Empty slots count as unloaded so the next visit retries.
    pub fn is_populated(&self, section: Section) -> bool {
        match section {
            Section::About => !self.about_html.is_empty(),
            Section::Thoughts => !self.thoughts.is_empty(),
            Section::Quotes => !self.quotes.is_empty(),
            Section::Crafts => !self.crafts_html.is_empty(),
            Section::Recommendations => !self.recommendations.is_empty(),
        }
    }
}

enum Loaded {
    About(String),
    Thoughts(Vec<Thought>),
    Quotes(Vec<Quote>),
    Crafts(String),
    Recommendations(Vec<RecommendationSection>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    /// Slot already populated; no fetch.
    Cached,
    /// A fetch for this slot is already running.
    InFlight,
    Applied,
    /// Result arrived for a dead ticket or an already-filled slot.
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum OpenOutcome {
    Opened { fetched: bool },
    NotFound,
    /// Another thought was opened (or the detail closed) while fetching.
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum QuoteOutcome {
    /// Mood-driven request with an empty mood.
    Skipped,
    Busy,
    CoolingDown { remaining_secs: i64 },
    Added(Quote),
}

#[derive(Debug, Default)]
struct SectionCache {
    data: SectionSnapshot,

    next_ticket: u64,
    /// Live ticket per slot with a fetch in flight.
    pending: HashMap<Section, u64>,
    detail_ticket: Option<u64>,

    polishing: bool,
    generating_quote: bool,
}

impl SectionCache {
    fn issue(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    fn finish(&mut self, section: Section, ticket: u64, loaded: Loaded) -> LoadOutcome {
        if self.pending.get(&section) != Some(&ticket) {
            log::debug!("sections: dropping stale {section} result (ticket {ticket})");
            return LoadOutcome::Discarded;
        }
        self.pending.remove(&section);
        if self.data.is_populated(section) {
            log::debug!("sections: {section} already filled, dropping fetched copy");
            return LoadOutcome::Discarded;
        }

        let d = &mut self.data;
        match loaded {
            Loaded::About(raw) => d.about_html = about_html(&raw),
            Loaded::Thoughts(list) => d.thoughts = list,
            Loaded::Quotes(list) => d.quotes = list,
            Loaded::Crafts(html) => d.crafts_html = html,
            Loaded::Recommendations(list) => d.recommendations = list,
        }
        LoadOutcome::Applied
    }

    fn show_thought(&mut self, thought: Thought) {
        self.data.thought_html = thought_body_html(&thought.content);
        self.data.selected_thought = Some(thought);
    }
}

/// Shared handle over the per-session section cache.
///
/// Locks are held only for synchronous bookkeeping, never across an adapter await.
#[derive(Clone)]
pub(crate) struct SectionStore {
    cache: Arc<Mutex<SectionCache>>,
    content: Arc<dyn ContentAdapter>,
}

impl SectionStore {
    pub fn new(content: Arc<dyn ContentAdapter>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(SectionCache::default())),
            content,
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut SectionCache) -> R) -> Option<R> {
        self.cache.lock().ok().map(|mut c| f(&mut c))
    }

    pub fn snapshot(&self) -> SectionSnapshot {
        self.with(|c| c.data.clone()).unwrap_or_default()
    }

    pub fn is_loading(&self, section: Section) -> bool {
        self.with(|c| c.pending.contains_key(&section))
            .unwrap_or(false)
    }

    pub fn is_opening_thought(&self) -> bool {
        self.with(|c| c.detail_ticket.is_some() && c.data.selected_thought.is_none())
            .unwrap_or(false)
    }

    pub fn is_polishing(&self) -> bool {
        self.with(|c| c.polishing).unwrap_or(false)
    }

    pub fn is_generating_quote(&self) -> bool {
        self.with(|c| c.generating_quote).unwrap_or(false)
    }

    /// Fetch `section` unless it is already populated or in flight.
    pub async fn ensure_loaded(&self, section: Section) -> LoadOutcome {
        let ticket = self.with(|c| {
            if c.data.is_populated(section) {
                return Err(LoadOutcome::Cached);
            }
            if c.pending.contains_key(&section) {
                return Err(LoadOutcome::InFlight);
            }
            let t = c.issue();
            c.pending.insert(section, t);
            Ok(t)
        });
        let ticket = match ticket {
            Some(Ok(t)) => t,
            Some(Err(outcome)) => return outcome,
            None => return LoadOutcome::Discarded,
        };

        let loaded = match section {
            Section::About => Loaded::About(self.content.about().await),
            Section::Thoughts => Loaded::Thoughts(self.content.thoughts().await),
            Section::Quotes => Loaded::Quotes(self.content.quotes().await),
            Section::Crafts => Loaded::Crafts(self.content.crafts().await),
            Section::Recommendations => {
                Loaded::Recommendations(self.content.recommendations().await)
            }
        };

        self.with(|c| c.finish(section, ticket, loaded))
            .unwrap_or(LoadOutcome::Discarded)
    }

    /// Open a thought from the list, fetching its body the first time.
    pub async fn open_thought(&self, id: &str) -> OpenOutcome {
        let start = self.with(|c| {
            let thought = c.data.thoughts.iter().find(|t| t.id == id).cloned()?;
            let ticket = c.issue();
            c.detail_ticket = Some(ticket);
            if thought.content.is_empty() {
                c.data.selected_thought = None;
                c.data.thought_html.clear();
                Some((ticket, thought, true))
            } else {
                c.show_thought(thought);
                Some((ticket, Thought::default(), false))
            }
        });
        let (ticket, mut thought) = match start.flatten() {
            None => return OpenOutcome::NotFound,
            Some((_, _, false)) => return OpenOutcome::Opened { fetched: false },
            Some((ticket, thought, true)) => (ticket, thought),
        };

        let content = self.content.thought_content(id).await;

        self.with(|c| {
            // Cache the body on the list entry even if the view moved on.
            if let Some(entry) = c.data.thoughts.iter_mut().find(|t| t.id == id) {
                if entry.content.is_empty() {
                    entry.content = content.clone();
                }
            }
            if c.detail_ticket != Some(ticket) {
                return OpenOutcome::Discarded;
            }
            thought.content = content;
            c.show_thought(thought);
            OpenOutcome::Opened { fetched: true }
        })
        .unwrap_or(OpenOutcome::Discarded)
    }

    pub fn close_thought(&self) {
        self.with(|c| {
            c.detail_ticket = None;
            c.data.selected_thought = None;
            c.data.thought_html.clear();
        });
    }

    pub fn set_about_html(&self, html: String) {
        self.with(|c| c.data.about_html = html);
    }

    /// Editor input on an open thought: detail view and backing list entry move together.
    pub fn set_thought_html(&self, html: String) -> bool {
        self.with(|c| {
            let Some(selected) = c.data.selected_thought.as_mut() else {
                return false;
            };
            selected.content = html.clone();
            let id = selected.id.clone();
            if let Some(entry) = c.data.thoughts.iter_mut().find(|t| t.id == id) {
                entry.content = html.clone();
            }
            c.data.thought_html = html;
            true
        })
        .unwrap_or(false)
    }

    /// Rewrite the About text through the generative adapter.
    ///
    /// `None` when there was nothing to send or the text came back unchanged
    /// (the adapter's failure fallback); the About markup is then left alone.
    pub async fn polish_about(
        &self,
        generative: &dyn GenerativeTextAdapter,
    ) -> Option<PolishedContent> {
        let plain = self.with(|c| {
            if c.polishing {
                return None;
            }
            let text = inner_text(&c.data.about_html);
            if text.trim().is_empty() {
                return None;
            }
            c.polishing = true;
            Some(text)
        })??;

        let polished = generative.polish_content(&plain).await;

        let rewritten = polished.text.trim() != plain.trim();
        self.with(|c| {
            c.polishing = false;
            if rewritten {
                c.data.about_html = paragraphs_to_html(&polished.text);
            }
        });
        rewritten.then_some(polished)
    }

    /// Generate a quote and prepend it. `mood` of `None` means "surprise me".
    pub async fn generate_quote(
        &self,
        generative: &dyn GenerativeTextAdapter,
        mood: Option<&str>,
        cooldown: &Cooldown,
        now_ms: i64,
    ) -> QuoteOutcome {
        if let Some(m) = mood {
            if m.trim().is_empty() {
                return QuoteOutcome::Skipped;
            }
        }
        if self.is_generating_quote() {
            return QuoteOutcome::Busy;
        }
        if let Err(remaining_secs) = cooldown.try_acquire(now_ms) {
            return QuoteOutcome::CoolingDown { remaining_secs };
        }

        self.with(|c| c.generating_quote = true);
        let generated = generative.generate_quote(mood.map(str::trim)).await;
        let quote = Quote {
            id: now_ms.to_string(),
            text: generated.text,
            author: generated.author,
        };

        self.with(|c| {
            c.generating_quote = false;
            c.data.quotes.insert(0, quote.clone());
        });
        QuoteOutcome::Added(quote)
    }
}
