use crate::blocks::Block;
use crate::models::{PolishedContent, Quote, RecommendationSection, Thought};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    /// HTTP 429 from the backend rate limiter.
    Throttled,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn throttled() -> Self {
        Self {
            kind: ApiErrorKind::Throttled,
            message: "Rate limit exceeded. Please try again later.".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_API_URL: &str = "http://localhost:3001";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub log_level: String,
}

fn env_string(env: &wasm_bindgen::JsValue, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        js_sys::Reflect::get(env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
            .filter(|s| !s.trim().is_empty())
    })
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut cfg = Self::defaults();

        // Both `window.ENV.API_URL` (documented) and `window.ENV.api_url` are honored.
        if let Some(window) = web_sys::window() {
            if let Ok(origin) = window.location().origin() {
                if origin.starts_with("http") {
                    cfg.api_url = origin;
                }
            }

            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Some(url) = env_string(&env, &["API_URL", "api_url"]) {
                        cfg.api_url = url;
                    }
                    if let Some(level) = env_string(&env, &["LOG_LEVEL", "log_level"]) {
                        cfg.log_level = level;
                    }
                }
            }
        }

        cfg
    }

    pub fn defaults() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct AboutResponse {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub blocks: Option<Vec<Block>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct ThoughtsResponse {
    #[serde(default)]
    pub thoughts: Option<Vec<Thought>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct ThoughtContentResponse {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct QuotesResponse {
    #[serde(default)]
    pub quotes: Option<Vec<Quote>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct CraftsResponse {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub blocks: Option<Vec<Block>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Option<Vec<RecommendationSection>>,
    #[serde(default)]
    pub blocks: Option<Vec<Block>>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct GenerateQuoteRequest {
    pub mood: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct GeneratedQuote {
    pub text: String,
    pub author: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct PolishRequest {
    pub text: String,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env(cfg: &EnvConfig) -> Self {
        Self::new(cfg.api_url.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        res: reqwest::Response,
        ctx: &str,
    ) -> ApiResult<T> {
        let status = res.status();
        if status.is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if status.as_u16() == 429 {
            Err(ApiError::throttled())
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let res = reqwest::Client::new()
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::read_json(res, "Request failed").await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let res = reqwest::Client::new()
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::read_json(res, "Request failed").await
    }

    pub async fn get_about(&self) -> ApiResult<AboutResponse> {
        self.get_json("/api/notion/about").await
    }

    pub async fn get_thoughts(&self) -> ApiResult<ThoughtsResponse> {
        self.get_json("/api/notion/thoughts").await
    }

    pub async fn get_thought_content(&self, id: &str) -> ApiResult<ThoughtContentResponse> {
        self.get_json(&thought_content_path(id)).await
    }

    pub async fn get_quotes(&self) -> ApiResult<QuotesResponse> {
        self.get_json("/api/notion/quotes").await
    }

    pub async fn get_crafts(&self) -> ApiResult<CraftsResponse> {
        self.get_json("/api/notion/crafts").await
    }

    pub async fn get_recommendations(&self) -> ApiResult<RecommendationsResponse> {
        self.get_json("/api/notion/recommendations").await
    }

    pub async fn generate_quote(&self, mood: Option<&str>) -> ApiResult<GeneratedQuote> {
        self.post_json(
            "/api/gemini/generate-quote",
            &GenerateQuoteRequest {
                mood: mood.unwrap_or_default().to_string(),
            },
        )
        .await
    }

    pub async fn polish_content(&self, text: &str) -> ApiResult<PolishedContent> {
        self.post_json(
            "/api/gemini/polish-content",
            &PolishRequest {
                text: text.to_string(),
            },
        )
        .await
    }
}

pub(crate) fn thought_content_path(id: &str) -> String {
    format!("/api/notion/thoughts?id={}", urlencoding::encode(id))
}
