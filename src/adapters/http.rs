use super::{fallback_quote, ContentAdapter, GeneratedQuote, GenerativeTextAdapter};
use crate::api::{
    AboutResponse, ApiClient, ApiError, ApiErrorKind, ApiResult, CraftsResponse,
    RecommendationsResponse,
};
use crate::blocks::{recommendations_from_blocks, render_blocks};
use crate::cache::{TtlCache, DEFAULT_TTL_MS};
use crate::fallback;
use crate::models::{PolishedContent, Quote, RecommendationSection, Thought};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// `html` wins, then server-side blocks, then the plain `text` field.
pub(crate) fn resolve_about(resp: AboutResponse) -> Option<String> {
    non_empty(resp.html)
        .or_else(|| {
            resp.blocks
                .filter(|b| !b.is_empty())
                .map(|b| render_blocks(&b))
                .filter(|h| !h.is_empty())
        })
        .or_else(|| non_empty(resp.text))
}

pub(crate) fn resolve_crafts(resp: CraftsResponse) -> Option<String> {
    non_empty(resp.html).or_else(|| {
        resp.blocks
            .filter(|b| !b.is_empty())
            .map(|b| render_blocks(&b))
            .filter(|h| !h.is_empty())
    })
}

pub(crate) fn resolve_recommendations(
    resp: RecommendationsResponse,
) -> Option<Vec<RecommendationSection>> {
    resp.recommendations
        .filter(|r| !r.is_empty())
        .or_else(|| {
            resp.blocks
                .map(|b| recommendations_from_blocks(&b))
                .filter(|r| !r.is_empty())
        })
}

fn log_fallback(what: &str, e: &ApiError) {
    match e.kind {
        ApiErrorKind::Throttled => log::warn!("{what}: rate limited, using fallback"),
        _ => log::error!("{what}: {e}, using fallback"),
    }
}

/// Outcome of one CMS read; only `Fresh` values are cached.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Fetched<T> {
    Fresh(T),
    Fallback(T),
}

/// Resolve a CMS response, falling back on transport errors and empty payloads.
pub(crate) fn settle<R, T>(
    what: &str,
    res: ApiResult<R>,
    resolve: impl FnOnce(R) -> Option<T>,
    fallback: impl FnOnce() -> T,
) -> Fetched<T> {
    match res {
        Ok(resp) => match resolve(resp) {
            Some(v) => Fetched::Fresh(v),
            None => {
                log::info!("{what}: empty payload, using fallback");
                Fetched::Fallback(fallback())
            }
        },
        Err(e) => {
            log_fallback(what, &e);
            Fetched::Fallback(fallback())
        }
    }
}

/// A generated quote, or the canned one on any failure or blank text.
pub(crate) fn quote_or_fallback(res: ApiResult<GeneratedQuote>) -> GeneratedQuote {
    match res {
        Ok(q) if !q.text.trim().is_empty() => q,
        Ok(_) => fallback_quote(),
        Err(e) => {
            log_fallback("generate quote", &e);
            fallback_quote()
        }
    }
}

/// A rewrite of `text`, or `text` itself on any failure or blank result.
pub(crate) fn polished_or_unchanged(text: &str, res: ApiResult<PolishedContent>) -> PolishedContent {
    match res {
        Ok(p) if !p.text.trim().is_empty() => p,
        Ok(_) => PolishedContent::unchanged(text),
        Err(e) => {
            log_fallback("polish", &e);
            PolishedContent::unchanged(text)
        }
    }
}

/// CMS reads over HTTP with an injected TTL cache in front.
#[derive(Clone)]
pub(crate) struct HttpContentAdapter {
    client: ApiClient,
    cache: Arc<Mutex<TtlCache<String, String>>>,
    clock: fn() -> i64,
}

impl HttpContentAdapter {
    pub fn new(client: ApiClient) -> Self {
        Self::with_cache(client, TtlCache::new(DEFAULT_TTL_MS), crate::util::now_ms)
    }

    pub fn with_cache(client: ApiClient, cache: TtlCache<String, String>, clock: fn() -> i64) -> Self {
        Self {
            client,
            cache: Arc::new(Mutex::new(cache)),
            clock,
        }
    }

    fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = (self.clock)();
        let raw = self.cache.lock().ok()?.get(&key.to_string(), now)?;
        serde_json::from_str(&raw).ok()
    }

    fn remember<T: Serialize>(&self, key: &str, value: &T) {
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let now = (self.clock)();
        if let Ok(mut cache) = self.cache.lock() {
            let dropped = cache.purge_expired(now);
            if dropped > 0 {
                log::debug!("content cache: dropped {dropped} stale entries");
            }
            cache.insert(key.to_string(), raw, now);
        }
    }

    /// Cache fresh results; fallbacks are served but retried next time.
    fn keep<T: Serialize>(&self, key: &str, fetched: Fetched<T>) -> T {
        match fetched {
            Fetched::Fresh(v) => {
                self.remember(key, &v);
                v
            }
            Fetched::Fallback(v) => v,
        }
    }
}

#[async_trait(?Send)]
impl ContentAdapter for HttpContentAdapter {
    async fn about(&self) -> String {
        if let Some(v) = self.cached::<String>("about") {
            return v;
        }
        let res = self.client.get_about().await;
        self.keep("about", settle("about", res, resolve_about, || {
            fallback::ABOUT_ME_TEXT.to_string()
        }))
    }

    async fn thoughts(&self) -> Vec<Thought> {
        if let Some(v) = self.cached::<Vec<Thought>>("thoughts") {
            return v;
        }
        let res = self.client.get_thoughts().await;
        self.keep("thoughts", settle("thoughts", res, |r| r.thoughts, fallback::thoughts))
    }

    async fn thought_content(&self, id: &str) -> String {
        let key = format!("thought:{id}");
        if let Some(v) = self.cached::<String>(&key) {
            return v;
        }
        let res = self.client.get_thought_content(id).await;
        self.keep(
            &key,
            settle("thought content", res, |r| non_empty(r.content), || {
                fallback::thought_content(id)
            }),
        )
    }

    async fn quotes(&self) -> Vec<Quote> {
        if let Some(v) = self.cached::<Vec<Quote>>("quotes") {
            return v;
        }
        let res = self.client.get_quotes().await;
        self.keep("quotes", settle("quotes", res, |r| r.quotes, fallback::quotes))
    }

    async fn crafts(&self) -> String {
        if let Some(v) = self.cached::<String>("crafts") {
            return v;
        }
        let res = self.client.get_crafts().await;
        self.keep("crafts", settle("crafts", res, resolve_crafts, fallback::crafts_html))
    }

    async fn recommendations(&self) -> Vec<RecommendationSection> {
        if let Some(v) = self.cached::<Vec<RecommendationSection>>("recommendations") {
            return v;
        }
        let res = self.client.get_recommendations().await;
        self.keep(
            "recommendations",
            settle("recommendations", res, resolve_recommendations, fallback::recommendations),
        )
    }
}

#[derive(Clone)]
pub(crate) struct HttpGenerativeAdapter {
    client: ApiClient,
}

impl HttpGenerativeAdapter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl GenerativeTextAdapter for HttpGenerativeAdapter {
    async fn generate_quote(&self, mood: Option<&str>) -> GeneratedQuote {
        quote_or_fallback(self.client.generate_quote(mood).await)
    }

    async fn polish_content(&self, text: &str) -> PolishedContent {
        polished_or_unchanged(text, self.client.polish_content(text).await)
    }
}
