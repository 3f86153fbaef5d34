use crate::models::TextStats;
use once_cell::sync::Lazy;
use regex::Regex;

/// Any opening tag anywhere in the text (`<p>`, `<a href=..>`, ...).
static HTML_TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)<[a-z][\s\S]*>").ok());

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "hr",
    "tr", "pre",
];

/// Heuristic used for thought bodies: does the text contain an HTML tag?
///
/// Plain text with a stray `<` (e.g. `a < b`) is not HTML because no letter follows it.
pub(crate) fn looks_like_html(content: &str) -> bool {
    match HTML_TAG.as_ref() {
        Some(re) => re.is_match(content),
        None => false,
    }
}

/// Heuristic used for the About payload: markup always starts with a tag.
pub(crate) fn starts_like_html(content: &str) -> bool {
    content.trim_start().starts_with('<')
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Wrap plain text into `<p>` blocks, one per blank-line separated paragraph.
pub(crate) fn paragraphs_to_html(text: &str) -> String {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect()
}

/// Thought bodies: HTML passes through, anything else becomes paragraphs.
pub(crate) fn thought_body_html(content: &str) -> String {
    if looks_like_html(content) {
        content.to_string()
    } else {
        paragraphs_to_html(content)
    }
}

/// About payload: HTML passes through, the plain-text default becomes paragraphs.
pub(crate) fn about_html(content: &str) -> String {
    if starts_like_html(content) {
        content.to_string()
    } else {
        paragraphs_to_html(content)
    }
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Line breaks a block tag requires around its content; `<p>` gets a blank line.
fn required_breaks(name: &str) -> usize {
    match name {
        "p" => 2,
        n if BLOCK_TAGS.contains(&n) => 1,
        _ => 0,
    }
}

fn emit(out: &mut String, pending: &mut usize, text: &str) {
    if text.is_empty() {
        return;
    }
    // Source whitespace between blocks collapses into the block break.
    if *pending > 0 && text.trim().is_empty() {
        return;
    }
    if !out.is_empty() {
        for _ in out.chars().rev().take_while(|c| *c == '\n').count()..*pending {
            out.push('\n');
        }
    }
    *pending = 0;
    out.push_str(text);
}

fn scan_text(html: &str, block_breaks: bool) -> String {
    let mut out = String::with_capacity(html.len());
    let mut pending = 0usize;
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        emit(&mut out, &mut pending, &rest[..lt]);
        let after = &rest[lt + 1..];
        let Some(gt) = after.find('>') else {
            // Unterminated tag: keep the remainder as text.
            emit(&mut out, &mut pending, &rest[lt..]);
            rest = "";
            break;
        };

        if block_breaks {
            let name = tag_name(&after[..gt]);
            if name == "br" {
                pending = 0;
                out.push('\n');
            } else {
                pending = pending.max(required_breaks(&name));
            }
        }
        rest = &after[gt + 1..];
    }
    emit(&mut out, &mut pending, rest);

    decode_entities(&out)
}

/// `textContent` of a fragment: tags dropped, entities decoded, no layout breaks.
pub(crate) fn strip_html(html: &str) -> String {
    scan_text(html, false)
}

/// `innerText`-like rendering: block elements start on a new line and
/// paragraphs are separated by a blank line.
pub(crate) fn inner_text(html: &str) -> String {
    scan_text(html, true).trim_matches('\n').to_string()
}

pub(crate) fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Word and character figures for a plain-text rendering.
pub(crate) fn text_stats(text: &str) -> TextStats {
    let trimmed = text.trim();
    TextStats {
        words: if trimmed.is_empty() {
            0
        } else {
            count_words(trimmed)
        },
        chars: text.chars().count(),
        chars_no_space: text.chars().filter(|c| !c.is_whitespace()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_stats_examples() {
        assert_eq!(
            text_stats(""),
            TextStats {
                words: 0,
                chars: 0,
                chars_no_space: 0
            }
        );
        assert_eq!(
            text_stats("a b"),
            TextStats {
                words: 2,
                chars: 3,
                chars_no_space: 2
            }
        );
        assert_eq!(
            text_stats("hello world"),
            TextStats {
                words: 2,
                chars: 11,
                chars_no_space: 10
            }
        );
    }

    #[test]
    fn test_text_stats_whitespace_only() {
        let s = text_stats("  \n\t ");
        assert_eq!(s.words, 0);
        assert_eq!(s.chars, 5);
        assert_eq!(s.chars_no_space, 0);
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<p>hi</p>"));
        assert!(looks_like_html("intro <B>bold</B>"));
        assert!(!looks_like_html("a < b and c > d"));
        assert!(!looks_like_html("plain text"));
    }

    #[test]
    fn test_paragraphs_to_html_splits_on_blank_lines() {
        assert_eq!(
            paragraphs_to_html("one\n\ntwo\n\n"),
            "<p>one</p><p>two</p>"
        );
        assert_eq!(paragraphs_to_html("a < b"), "<p>a &lt; b</p>");
    }

    #[test]
    fn test_thought_body_html_passthrough() {
        assert_eq!(thought_body_html("<p>x</p>"), "<p>x</p>");
        assert_eq!(thought_body_html("x"), "<p>x</p>");
    }

    #[test]
    fn test_about_html_only_sniffs_leading_tag() {
        assert_eq!(about_html("  <h1>Hi</h1>"), "  <h1>Hi</h1>");
        assert_eq!(about_html("I'm Adi.\n\nHi"), "<p>I&#039;m Adi.</p><p>Hi</p>");
    }

    #[test]
    fn test_strip_html_decodes_entities() {
        assert_eq!(
            strip_html("<p>Tom &amp; <b>Jerry</b></p>"),
            "Tom & Jerry"
        );
        assert_eq!(strip_html("<p>a</p><p>b</p>"), "ab");
        assert_eq!(strip_html("x <y"), "x <y");
    }

    #[test]
    fn test_inner_text_breaks_blocks() {
        assert_eq!(inner_text("<p>a</p><p>b</p>"), "a\n\nb");
        assert_eq!(inner_text("<p>a</p>\n<p>b</p>"), "a\n\nb");
        assert_eq!(inner_text("hello world"), "hello world");
        assert_eq!(inner_text("<ul><li>x</li><li>y</li></ul>"), "x\ny");
        assert_eq!(inner_text("<div>a<br>b</div>"), "a\nb");
    }

    #[test]
    fn test_inner_text_paragraphs_survive_rewrapping() {
        let html = "<p>First para.</p><p>Second para.</p>";
        assert_eq!(paragraphs_to_html(&inner_text(html)), html);
    }
}
