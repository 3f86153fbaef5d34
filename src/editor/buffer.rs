//! Owned text buffer with a cursor.
//!
//! Implements the same surface contract as the contenteditable field, so the
//! field logic is testable off the browser. Markup on import is flattened to
//! text; formatting applied afterwards is tracked per character.

use super::surface::{EditableTextSurface, FormatCommand};
use crate::html::{escape_html, inner_text};
use crate::models::FormatState;

const MAX_INDENT: u8 = 8;
const INDENT_PX: u32 = 40;
const HISTORY_LIMIT: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct CharStyle {
    bold: bool,
    italic: bool,
    underline: bool,
}

#[derive(Clone, Copy, Debug)]
enum Inline {
    Bold,
    Italic,
    Underline,
}

impl CharStyle {
    fn get(self, flag: Inline) -> bool {
        match flag {
            Inline::Bold => self.bold,
            Inline::Italic => self.italic,
            Inline::Underline => self.underline,
        }
    }

    fn set(&mut self, flag: Inline, on: bool) {
        match flag {
            Inline::Bold => self.bold = on,
            Inline::Italic => self.italic = on,
            Inline::Underline => self.underline = on,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Bullet,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Bullet => "ul",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Paragraph {
    chars: Vec<(char, CharStyle)>,
    align: Align,
    list: Option<ListKind>,
    indent: u8,
}

impl Paragraph {
    fn plain(line: &str) -> Self {
        Self {
            chars: line.chars().map(|c| (c, CharStyle::default())).collect(),
            ..Default::default()
        }
    }

    fn split_off(&mut self, offset: usize) -> Paragraph {
        Paragraph {
            chars: self.chars.split_off(offset),
            align: self.align,
            list: self.list,
            indent: self.indent,
        }
    }

    fn style_attr(&self) -> String {
        let mut parts = Vec::new();
        match self.align {
            Align::Left => {}
            Align::Center => parts.push("text-align: center".to_string()),
            Align::Right => parts.push("text-align: right".to_string()),
        }
        if self.indent > 0 {
            parts.push(format!("margin-left: {}px", u32::from(self.indent) * INDENT_PX));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!(r#" style="{}""#, parts.join("; "))
        }
    }

    fn runs_html(&self) -> String {
        if self.chars.is_empty() {
            return "<br>".to_string();
        }

        let mut html = String::new();
        let mut run = String::new();
        let mut style = self.chars[0].1;
        for &(ch, s) in &self.chars {
            if s != style {
                html.push_str(&wrap_run(&run, style));
                run.clear();
                style = s;
            }
            run.push(ch);
        }
        html.push_str(&wrap_run(&run, style));
        html
    }
}

fn wrap_run(text: &str, style: CharStyle) -> String {
    let mut out = escape_html(text);
    if style.underline {
        out = format!("<u>{out}</u>");
    }
    if style.italic {
        out = format!("<i>{out}</i>");
    }
    if style.bold {
        out = format!("<b>{out}</b>");
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Pos {
    para: usize,
    offset: usize,
}

#[derive(Clone, Debug)]
struct Snapshot {
    paragraphs: Vec<Paragraph>,
    selection: Option<(Pos, Pos)>,
}

#[derive(Clone, Debug)]
pub(crate) struct BufferSurface {
    paragraphs: Vec<Paragraph>,
    /// (anchor, focus); `None` when the caret is elsewhere.
    selection: Option<(Pos, Pos)>,
    /// Style for the next typed character at a collapsed caret.
    typing: CharStyle,
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl Default for BufferSurface {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
            selection: None,
            typing: CharStyle::default(),
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }
}

impl BufferSurface {
    pub fn from_html(html: &str) -> Self {
        let mut surface = Self::default();
        surface.set_html(html);
        surface
    }

    /// Select by character offsets into [`EditableTextSurface::plain_text`].
    pub fn select(&mut self, start: usize, end: usize) {
        let (anchor, focus) = (self.pos_at(start), self.pos_at(end));
        self.selection = Some((anchor, focus));
        if anchor == focus {
            self.typing = self.style_before(focus);
        }
    }

    pub fn place_cursor(&mut self, at: usize) {
        self.select(at, at);
    }

    pub fn blur(&mut self) {
        self.selection = None;
    }

    fn pos_at(&self, flat: usize) -> Pos {
        let mut remaining = flat;
        for (i, p) in self.paragraphs.iter().enumerate() {
            if remaining <= p.chars.len() {
                return Pos {
                    para: i,
                    offset: remaining,
                };
            }
            remaining -= p.chars.len() + 1;
        }
        let last = self.paragraphs.len() - 1;
        Pos {
            para: last,
            offset: self.paragraphs[last].chars.len(),
        }
    }

    fn style_before(&self, pos: Pos) -> CharStyle {
        let chars = &self.paragraphs[pos.para].chars;
        match pos.offset {
            0 => chars.first().map(|c| c.1).unwrap_or_default(),
            n => chars[n - 1].1,
        }
    }

    fn ordered(&self) -> Option<(Pos, Pos)> {
        self.selection.map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
    }

    fn selected_styles(&self, start: Pos, end: Pos) -> Vec<CharStyle> {
        let mut styles = Vec::new();
        for i in start.para..=end.para {
            let chars = &self.paragraphs[i].chars;
            let from = if i == start.para { start.offset } else { 0 };
            let to = if i == end.para { end.offset } else { chars.len() };
            styles.extend(chars[from..to].iter().map(|c| c.1));
        }
        styles
    }

    fn restyle(&mut self, start: Pos, end: Pos, f: impl Fn(&mut CharStyle)) {
        for i in start.para..=end.para {
            let chars = &mut self.paragraphs[i].chars;
            let from = if i == start.para { start.offset } else { 0 };
            let to = if i == end.para { end.offset } else { chars.len() };
            for c in &mut chars[from..to] {
                f(&mut c.1);
            }
        }
    }

    fn checkpoint(&mut self) {
        self.undo.push(Snapshot {
            paragraphs: self.paragraphs.clone(),
            selection: self.selection,
        });
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    fn restore(&mut self, from_undo: bool) -> bool {
        let (source, sink) = if from_undo {
            (&mut self.undo, &mut self.redo)
        } else {
            (&mut self.redo, &mut self.undo)
        };
        let Some(snap) = source.pop() else {
            return false;
        };
        sink.push(Snapshot {
            paragraphs: std::mem::replace(&mut self.paragraphs, snap.paragraphs),
            selection: self.selection,
        });
        self.selection = snap.selection;
        true
    }

    fn toggle_inline(&mut self, flag: Inline) -> bool {
        let Some((start, end)) = self.ordered() else {
            return false;
        };
        if start == end {
            let on = !self.typing.get(flag);
            self.typing.set(flag, on);
            return true;
        }

        let styles = self.selected_styles(start, end);
        let all_on = !styles.is_empty() && styles.iter().all(|s| s.get(flag));
        self.checkpoint();
        self.restyle(start, end, |s| s.set(flag, !all_on));
        true
    }

    fn for_touched(&mut self, f: impl Fn(&mut Paragraph)) -> bool {
        let Some((start, end)) = self.ordered() else {
            return false;
        };
        self.checkpoint();
        for p in &mut self.paragraphs[start.para..=end.para] {
            f(p);
        }
        true
    }

    fn toggle_list(&mut self, kind: ListKind) -> bool {
        let Some((start, end)) = self.ordered() else {
            return false;
        };
        let all_on = self.paragraphs[start.para..=end.para]
            .iter()
            .all(|p| p.list == Some(kind));
        let next = if all_on { None } else { Some(kind) };
        self.for_touched(|p| p.list = next)
    }

    fn outdent(&mut self) -> bool {
        let Some((start, end)) = self.ordered() else {
            return false;
        };
        if self.paragraphs[start.para..=end.para]
            .iter()
            .all(|p| p.indent == 0)
        {
            return false;
        }
        self.for_touched(|p| p.indent = p.indent.saturating_sub(1))
    }

    fn remove_format(&mut self) -> bool {
        let Some((start, end)) = self.ordered() else {
            return false;
        };
        if start == end {
            self.typing = CharStyle::default();
            return true;
        }
        self.checkpoint();
        self.restyle(start, end, |s| *s = CharStyle::default());
        true
    }

    fn delete_range(&mut self, start: Pos, end: Pos) {
        if start.para == end.para {
            self.paragraphs[start.para]
                .chars
                .drain(start.offset..end.offset);
            return;
        }
        let tail = self.paragraphs[end.para].chars[end.offset..].to_vec();
        let head = &mut self.paragraphs[start.para].chars;
        head.truncate(start.offset);
        head.extend(tail);
        self.paragraphs.drain(start.para + 1..=end.para);
    }
}

impl EditableTextSurface for BufferSurface {
    fn html(&self) -> String {
        let mut html = String::new();
        let mut open_list: Option<ListKind> = None;

        for p in &self.paragraphs {
            if open_list != p.list {
                if let Some(prev) = open_list {
                    html.push_str(&format!("</{}>", prev.tag()));
                }
                if let Some(next) = p.list {
                    html.push_str(&format!("<{}>", next.tag()));
                }
                open_list = p.list;
            }
            let tag = if p.list.is_some() { "li" } else { "p" };
            html.push_str(&format!("<{tag}{}>{}</{tag}>", p.style_attr(), p.runs_html()));
        }
        if let Some(kind) = open_list {
            html.push_str(&format!("</{}>", kind.tag()));
        }

        html
    }

    fn set_html(&mut self, html: &str) {
        let text = inner_text(html);
        let mut paragraphs: Vec<Paragraph> = text
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(Paragraph::plain)
            .collect();
        if paragraphs.is_empty() {
            paragraphs.push(Paragraph::plain(""));
        }
        self.paragraphs = paragraphs;
        self.selection = None;
        self.typing = CharStyle::default();
        self.undo.clear();
        self.redo.clear();
    }

    fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.chars.iter().map(|c| c.0).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    fn apply(&mut self, command: &FormatCommand) -> bool {
        match command {
            FormatCommand::Undo => return self.restore(true),
            FormatCommand::Redo => return self.restore(false),
            _ => {}
        }
        if self.selection.is_none() {
            return false;
        }

        match command {
            FormatCommand::Bold => self.toggle_inline(Inline::Bold),
            FormatCommand::Italic => self.toggle_inline(Inline::Italic),
            FormatCommand::Underline => self.toggle_inline(Inline::Underline),
            FormatCommand::AlignLeft => self.for_touched(|p| p.align = Align::Left),
            FormatCommand::AlignCenter => self.for_touched(|p| p.align = Align::Center),
            FormatCommand::AlignRight => self.for_touched(|p| p.align = Align::Right),
            FormatCommand::OrderedList => self.toggle_list(ListKind::Ordered),
            FormatCommand::BulletList => self.toggle_list(ListKind::Bullet),
            FormatCommand::Indent => {
                self.for_touched(|p| p.indent = (p.indent + 1).min(MAX_INDENT))
            }
            FormatCommand::Outdent => self.outdent(),
            FormatCommand::RemoveFormat => self.remove_format(),
            // Colours, fonts, links and images need a real layout engine.
            FormatCommand::ForeColor(_)
            | FormatCommand::HiliteColor(_)
            | FormatCommand::FontName(_)
            | FormatCommand::FontSize(_)
            | FormatCommand::CreateLink(_)
            | FormatCommand::InsertImage(_)
            | FormatCommand::Undo
            | FormatCommand::Redo => false,
        }
    }

    fn active_formats(&self) -> FormatState {
        let Some((start, end)) = self.ordered() else {
            return FormatState::default();
        };

        let (bold, italic, underline) = if start == end {
            (self.typing.bold, self.typing.italic, self.typing.underline)
        } else {
            let styles = self.selected_styles(start, end);
            let all = |flag: Inline| !styles.is_empty() && styles.iter().all(|s| s.get(flag));
            (all(Inline::Bold), all(Inline::Italic), all(Inline::Underline))
        };

        let para = &self.paragraphs[end.para];
        FormatState {
            bold,
            italic,
            underline,
            align_left: para.align == Align::Left,
            align_center: para.align == Align::Center,
            list_ordered: para.list == Some(ListKind::Ordered),
            list_bullet: para.list == Some(ListKind::Bullet),
        }
    }

    fn insert_at_cursor(&mut self, text: &str) -> bool {
        let Some((start, end)) = self.ordered() else {
            return false;
        };
        self.checkpoint();
        if start != end {
            self.delete_range(start, end);
        }

        let mut pos = start;
        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' => {
                    let tail = self.paragraphs[pos.para].split_off(pos.offset);
                    self.paragraphs.insert(pos.para + 1, tail);
                    pos = Pos {
                        para: pos.para + 1,
                        offset: 0,
                    };
                }
                _ => {
                    self.paragraphs[pos.para]
                        .chars
                        .insert(pos.offset, (ch, self.typing));
                    pos.offset += 1;
                }
            }
        }
        self.selection = Some((pos, pos));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_toggles_over_range() {
        let mut s = BufferSurface::from_html("<p>hello world</p>");
        s.select(0, 5);
        assert!(s.apply(&FormatCommand::Bold));
        assert_eq!(s.html(), "<p><b>hello</b> world</p>");
        assert!(s.active_formats().bold);

        assert!(s.apply(&FormatCommand::Bold));
        assert_eq!(s.html(), "<p>hello world</p>");
        assert!(!s.active_formats().bold);
    }

    #[test]
    fn test_collapsed_caret_sets_typing_style() {
        let mut s = BufferSurface::from_html("hello world");
        s.place_cursor(5);
        assert!(s.apply(&FormatCommand::Bold));
        assert!(s.active_formats().bold);
        assert!(s.insert_at_cursor("!"));
        assert_eq!(s.html(), "<p>hello<b>!</b> world</p>");
    }

    #[test]
    fn test_no_selection_reports_defaults_and_ignores_commands() {
        let mut s = BufferSurface::from_html("<p>hi</p>");
        assert!(!s.has_selection());
        assert_eq!(s.active_formats(), FormatState::default());
        assert!(!s.apply(&FormatCommand::Italic));
        assert!(!s.insert_at_cursor("x"));
        assert_eq!(s.html(), "<p>hi</p>");
    }

    #[test]
    fn test_bullet_list_wraps_touched_paragraphs() {
        let mut s = BufferSurface::from_html("<p>a</p><p>b</p><p>c</p>");
        s.select(0, 3);
        assert!(s.apply(&FormatCommand::BulletList));
        assert_eq!(s.html(), "<ul><li>a</li><li>b</li></ul><p>c</p>");
        assert!(s.active_formats().list_bullet);

        assert!(s.apply(&FormatCommand::BulletList));
        assert_eq!(s.html(), "<p>a</p><p>b</p><p>c</p>");
    }

    #[test]
    fn test_alignment_reported_in_formats() {
        let mut s = BufferSurface::from_html("<p>a</p>");
        s.place_cursor(1);
        assert!(s.active_formats().align_left);
        assert!(s.apply(&FormatCommand::AlignCenter));
        assert_eq!(s.html(), r#"<p style="text-align: center">a</p>"#);
        let f = s.active_formats();
        assert!(f.align_center);
        assert!(!f.align_left);
    }

    #[test]
    fn test_indent_and_outdent() {
        let mut s = BufferSurface::from_html("<p>a</p>");
        s.place_cursor(0);
        assert!(!s.apply(&FormatCommand::Outdent));
        assert!(s.apply(&FormatCommand::Indent));
        assert_eq!(s.html(), r#"<p style="margin-left: 40px">a</p>"#);
        assert!(s.apply(&FormatCommand::Outdent));
        assert_eq!(s.html(), "<p>a</p>");
    }

    #[test]
    fn test_undo_redo_restore_documents() {
        let mut s = BufferSurface::from_html("<p>abc</p>");
        assert!(!s.apply(&FormatCommand::Undo));
        s.select(0, 3);
        s.apply(&FormatCommand::Underline);
        assert_eq!(s.html(), "<p><u>abc</u></p>");
        assert!(s.apply(&FormatCommand::Undo));
        assert_eq!(s.html(), "<p>abc</p>");
        assert!(s.apply(&FormatCommand::Redo));
        assert_eq!(s.html(), "<p><u>abc</u></p>");
        assert!(!s.apply(&FormatCommand::Redo));
    }

    #[test]
    fn test_insert_newline_splits_paragraph() {
        let mut s = BufferSurface::from_html("ab");
        s.place_cursor(1);
        s.insert_at_cursor("\n");
        assert_eq!(s.html(), "<p>a</p><p>b</p>");
        assert_eq!(s.plain_text(), "a\nb");
    }

    #[test]
    fn test_insert_replaces_selection_across_paragraphs() {
        let mut s = BufferSurface::from_html("<p>one</p><p>two</p>");
        s.select(2, 5);
        s.insert_at_cursor("-");
        assert_eq!(s.plain_text(), "on-wo");
    }

    #[test]
    fn test_layout_commands_unsupported() {
        let mut s = BufferSurface::from_html("<p>a</p>");
        s.select(0, 1);
        assert!(!s.apply(&FormatCommand::ForeColor("#f00".to_string())));
        assert!(!s.apply(&FormatCommand::CreateLink("https://a.dev".to_string())));
    }

    #[test]
    fn test_empty_document_renders_line_break() {
        let s = BufferSurface::from_html("");
        assert_eq!(s.html(), "<p><br></p>");
        assert_eq!(s.plain_text(), "");
    }
}
