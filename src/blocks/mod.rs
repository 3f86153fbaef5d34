//! CMS block payloads.
//!
//! The CMS endpoints may return raw blocks instead of pre-rendered HTML. Each
//! block kind is one arm of [`Block`]; [`render_blocks`] matches exhaustively, so a
//! new kind is a compile error here rather than silently dropped content.

use crate::html::escape_html;
use crate::models::RecommendationSection;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RichText {
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum Block {
    Paragraph {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    BulletedListItem {
        #[serde(default)]
        rich_text: Vec<RichText>,
        #[serde(default)]
        children: Vec<Block>,
    },
    NumberedListItem {
        #[serde(default)]
        rich_text: Vec<RichText>,
        #[serde(default)]
        children: Vec<Block>,
    },
    Quote {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Divider,
    Toggle {
        #[serde(default)]
        rich_text: Vec<RichText>,
        #[serde(default)]
        children: Vec<Block>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    fn open(self) -> &'static str {
        match self {
            ListKind::Bulleted => "<ul>",
            ListKind::Numbered => "<ol>",
        }
    }

    fn close(self) -> &'static str {
        match self {
            ListKind::Bulleted => "</ul>",
            ListKind::Numbered => "</ol>",
        }
    }
}

impl Block {
    fn list_kind(&self) -> Option<ListKind> {
        match self {
            Block::BulletedListItem { .. } => Some(ListKind::Bulleted),
            Block::NumberedListItem { .. } => Some(ListKind::Numbered),
            _ => None,
        }
    }
}

pub(crate) fn rich_text_to_html(spans: &[RichText], skip_links: bool) -> String {
    spans
        .iter()
        .map(|rt| {
            let mut text = escape_html(&rt.plain_text);
            let a = &rt.annotations;
            if a.bold {
                text = format!("<b>{text}</b>");
            }
            if a.italic {
                text = format!("<i>{text}</i>");
            }
            if a.strikethrough {
                text = format!("<s>{text}</s>");
            }
            if a.underline {
                text = format!("<u>{text}</u>");
            }
            if a.code {
                text = format!("<code>{text}</code>");
            }
            match &rt.href {
                Some(href) if !skip_links => format!(
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer">{text}</a>"#,
                    escape_html(href)
                ),
                _ => text,
            }
        })
        .collect()
}

pub(crate) fn plain_text(spans: &[RichText]) -> String {
    spans.iter().map(|rt| rt.plain_text.as_str()).collect()
}

/// Render a block list to HTML, grouping consecutive list items into `<ul>`/`<ol>`.
pub(crate) fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in blocks {
        let kind = block.list_kind();
        if open_list != kind {
            if let Some(prev) = open_list {
                html.push_str(prev.close());
            }
            if let Some(next) = kind {
                html.push_str(next.open());
            }
            open_list = kind;
        }

        match block {
            Block::Paragraph { rich_text } => {
                let content = rich_text_to_html(rich_text, false);
                if content.is_empty() {
                    html.push_str("<p><br/></p>");
                } else {
                    html.push_str(&format!("<p>{content}</p>"));
                }
            }
            Block::Heading1 { rich_text } => push_non_empty(&mut html, "h1", rich_text),
            Block::Heading2 { rich_text } => push_non_empty(&mut html, "h2", rich_text),
            Block::Heading3 { rich_text } => push_non_empty(&mut html, "h3", rich_text),
            Block::BulletedListItem {
                rich_text,
                children,
            }
            | Block::NumberedListItem {
                rich_text,
                children,
            } => {
                html.push_str("<li>");
                html.push_str(&rich_text_to_html(rich_text, false));
                if !children.is_empty() {
                    html.push_str(&render_blocks(children));
                }
                html.push_str("</li>");
            }
            Block::Quote { rich_text } => push_non_empty(&mut html, "blockquote", rich_text),
            Block::Divider => html.push_str("<hr />"),
            Block::Toggle {
                rich_text,
                children,
            } => {
                html.push_str("<details><summary>");
                html.push_str(&rich_text_to_html(rich_text, false));
                html.push_str("</summary>");
                html.push_str(&render_blocks(children));
                html.push_str("</details>");
            }
        }
    }

    if let Some(kind) = open_list {
        html.push_str(kind.close());
    }

    html
}

fn push_non_empty(html: &mut String, tag: &str, rich_text: &[RichText]) {
    let content = rich_text_to_html(rich_text, false);
    if !content.is_empty() {
        html.push_str(&format!("<{tag}>{content}</{tag}>"));
    }
}

/// `"Side Projects"` -> `"side-projects"`.
pub(crate) fn category_id(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Recommendation lists are toggles; each toggle's bullet/paragraph children are items.
pub(crate) fn recommendations_from_blocks(blocks: &[Block]) -> Vec<RecommendationSection> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Toggle {
                rich_text,
                children,
            } => {
                let title = plain_text(rich_text);
                let items = children
                    .iter()
                    .filter_map(|child| match child {
                        Block::BulletedListItem { rich_text, .. }
                        | Block::Paragraph { rich_text } => {
                            Some(rich_text_to_html(rich_text, false))
                        }
                        _ => None,
                    })
                    .filter(|item| !item.is_empty())
                    .collect();
                Some(RecommendationSection {
                    id: category_id(&title),
                    title,
                    items,
                })
            }
            _ => None,
        })
        .collect()
}
