use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Top-level content category shown in the sidebar outline.
///
/// Closed set: iteration order is the sidebar order.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumIter, EnumString,
    AsRefStr, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub(crate) enum Section {
    #[default]
    About,
    Thoughts,
    Quotes,
    Crafts,
    Recommendations,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::About => "About Me",
            Section::Thoughts => "Thoughts",
            Section::Quotes => "Quotes",
            Section::Crafts => "Crafts",
            Section::Recommendations => "Recommendations",
        }
    }

    /// URL slug (`/thoughts`).
    pub fn slug(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Thoughts => "thoughts",
            Section::Quotes => "quotes",
            Section::Crafts => "crafts",
            Section::Recommendations => "recommendations",
        }
    }

    /// Unknown or empty slugs land on About.
    pub fn from_slug(slug: &str) -> Self {
        slug.trim()
            .trim_matches('/')
            .parse::<Section>()
            .unwrap_or_default()
    }

    pub fn all() -> Vec<Section> {
        Section::iter().collect()
    }

    /// Sections whose body is a contenteditable region (About always, Thoughts only in detail view).
    pub fn has_rich_text(self) -> bool {
        matches!(self, Section::About | Section::Thoughts)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct Thought {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    /// Rich HTML or plain text; empty until the full body has been fetched.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Thought {
    /// List-view teaser: the CMS description, else the body as plain text.
    pub fn preview(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => crate::html::strip_html(&self.content).trim().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RecommendationSection {
    pub id: String,
    pub title: String,
    /// Rich-HTML list items, CMS order.
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuestbookEntry {
    pub id: String,
    pub content: String,
    /// Matches `RecommendationSection::id`.
    pub category: String,
    pub author: String,
    pub created_at: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_approved: bool,
}

/// Which inline formatting commands are on at the caret.
///
/// Derived from the live selection; never stored as truth.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FormatState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align_left: bool,
    pub align_center: bool,
    pub list_ordered: bool,
    pub list_bullet: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ViewMode {
    #[default]
    #[strum(serialize = "editing")]
    Editing,
    #[strum(serialize = "viewing")]
    Viewing,
}

impl ViewMode {
    pub fn is_editing(self) -> bool {
        self == ViewMode::Editing
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SaveStatus {
    #[default]
    #[strum(serialize = "saved")]
    Saved,
    #[strum(serialize = "saving")]
    Saving,
    #[strum(serialize = "error")]
    Error,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextStats {
    pub words: usize,
    pub chars: usize,
    pub chars_no_space: usize,
}

/// Result of an AI rewrite. `format_type` names the style the backend picked.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PolishedContent {
    pub text: String,
    #[serde(default)]
    pub format_type: Option<String>,
    #[serde(default)]
    pub format_label: Option<String>,
}

impl PolishedContent {
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            format_type: None,
            format_label: None,
        }
    }
}
