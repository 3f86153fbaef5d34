//! Contracts the document core depends on, plus the shipped implementations.
//!
//! The core never talks HTTP or storage directly; it only sees the traits
//! below. Futures are `?Send`: `reqwest` futures on wasm are not `Send`.

mod http;
mod local_guestbook;

pub(crate) use http::{HttpContentAdapter, HttpGenerativeAdapter};
pub(crate) use local_guestbook::LocalGuestbookAdapter;
#[cfg(test)]
pub(crate) use local_guestbook::ANONYMOUS_AUTHORS;

pub(crate) use crate::api::GeneratedQuote;
use crate::models::{GuestbookEntry, PolishedContent, Quote, RecommendationSection, Thought};
use async_trait::async_trait;

/// CMS reads. Never fails: errors are absorbed into static defaults.
#[async_trait(?Send)]
pub(crate) trait ContentAdapter: Send + Sync {
    /// Rich HTML, or plain text for the built-in default.
    async fn about(&self) -> String;
    async fn thoughts(&self) -> Vec<Thought>;
    /// Full body for one thought; empty when unavailable.
    async fn thought_content(&self, id: &str) -> String;
    async fn quotes(&self) -> Vec<Quote>;
    async fn crafts(&self) -> String;
    async fn recommendations(&self) -> Vec<RecommendationSection>;
}

/// AI text generation. Throttling and failures degrade to canned values.
#[async_trait(?Send)]
pub(crate) trait GenerativeTextAdapter: Send + Sync {
    async fn generate_quote(&self, mood: Option<&str>) -> GeneratedQuote;
    async fn polish_content(&self, text: &str) -> PolishedContent;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum GuestbookError {
    #[error("guestbook storage is unavailable")]
    StorageUnavailable,
    #[error("could not write guestbook entry: {0}")]
    WriteFailed(String),
}

pub(crate) type GuestbookResult<T> = Result<T, GuestbookError>;

/// Moderated suggestion store. Failures are reported, never hidden.
#[async_trait(?Send)]
pub(crate) trait GuestbookAdapter: Send + Sync {
    async fn list_approved(&self, category: Option<&str>) -> GuestbookResult<Vec<GuestbookEntry>>;
    /// New entries are always unapproved.
    async fn add(
        &self,
        content: &str,
        category: &str,
        author: Option<&str>,
    ) -> GuestbookResult<GuestbookEntry>;
}

pub(crate) fn fallback_quote() -> GeneratedQuote {
    GeneratedQuote {
        text: crate::fallback::FALLBACK_QUOTE_TEXT.to_string(),
        author: crate::fallback::FALLBACK_QUOTE_AUTHOR.to_string(),
    }
}
