use crate::models::FormatState;

/// Font families offered by the toolbar select.
pub(crate) const FONT_FAMILIES: &[&str] = &[
    "Arial",
    "Georgia",
    "Times New Roman",
    "Courier New",
    "Verdana",
];

/// `execCommand("fontSize")` levels, 1 through 7.
pub(crate) const FONT_SIZES: &[(u8, &str)] = &[
    (1, "10"),
    (2, "13"),
    (3, "16"),
    (4, "18"),
    (5, "24"),
    (6, "32"),
    (7, "48"),
];

/// One toolbar action, applied to the current selection of an editable surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormatCommand {
    Bold,
    Italic,
    Underline,
    ForeColor(String),
    HiliteColor(String),
    FontName(String),
    FontSize(u8),
    AlignLeft,
    AlignCenter,
    AlignRight,
    OrderedList,
    BulletList,
    Indent,
    Outdent,
    CreateLink(String),
    InsertImage(String),
    RemoveFormat,
    Undo,
    Redo,
}

impl FormatCommand {
    /// `None` when the prompt was cancelled or left blank.
    pub fn link(url: Option<String>) -> Option<Self> {
        non_blank(url).map(FormatCommand::CreateLink)
    }

    pub fn image(url: Option<String>) -> Option<Self> {
        non_blank(url).map(FormatCommand::InsertImage)
    }

    /// Clamped into the 1..=7 range the browser accepts.
    pub fn font_size(level: u8) -> Self {
        FormatCommand::FontSize(level.clamp(1, 7))
    }

    /// Browser command name for `document.execCommand`.
    pub fn exec_name(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::ForeColor(_) => "foreColor",
            FormatCommand::HiliteColor(_) => "hiliteColor",
            FormatCommand::FontName(_) => "fontName",
            FormatCommand::FontSize(_) => "fontSize",
            FormatCommand::AlignLeft => "justifyLeft",
            FormatCommand::AlignCenter => "justifyCenter",
            FormatCommand::AlignRight => "justifyRight",
            FormatCommand::OrderedList => "insertOrderedList",
            FormatCommand::BulletList => "insertUnorderedList",
            FormatCommand::Indent => "indent",
            FormatCommand::Outdent => "outdent",
            FormatCommand::CreateLink(_) => "createLink",
            FormatCommand::InsertImage(_) => "insertImage",
            FormatCommand::RemoveFormat => "removeFormat",
            FormatCommand::Undo => "undo",
            FormatCommand::Redo => "redo",
        }
    }

    pub fn value(&self) -> Option<String> {
        match self {
            FormatCommand::ForeColor(v)
            | FormatCommand::HiliteColor(v)
            | FormatCommand::FontName(v)
            | FormatCommand::CreateLink(v)
            | FormatCommand::InsertImage(v) => Some(v.clone()),
            FormatCommand::FontSize(level) => Some(level.to_string()),
            _ => None,
        }
    }

    /// Colour pickers steal focus from the field; everything else keeps the caret where it was.
    pub fn keeps_focus(&self) -> bool {
        !matches!(
            self,
            FormatCommand::ForeColor(_) | FormatCommand::HiliteColor(_)
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A region of editable rich text.
///
/// The browser implementation drives a contenteditable element; tests drive an
/// in-memory buffer with the same contract.
pub(crate) trait EditableTextSurface {
    fn html(&self) -> String;

    /// Replace the whole document. Does not report a change.
    fn set_html(&mut self, html: &str);

    fn plain_text(&self) -> String;

    /// Whether a caret or selection currently sits inside this surface.
    fn has_selection(&self) -> bool;

    /// Returns whether the command was applied.
    fn apply(&mut self, command: &FormatCommand) -> bool;

    fn active_formats(&self) -> FormatState;

    fn insert_at_cursor(&mut self, text: &str) -> bool;
}
