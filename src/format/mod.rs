use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::options::BadgeStyle;

pub const DEFAULT_ANIMATION_COLOR: &str = "36BCF7";
pub const DEFAULT_LINK_URL: &str = "#";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("no text selected")]
    NoSelection,
    #[error("selection {start}..{end} is outside a buffer of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("selection {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatKind {
    Bold,
    Italic,
    Center,
    Link { url: Option<String> },
    Badge { style: BadgeStyle },
    Animate { color: Option<String> },
}

/// Byte range `[start, end)` into an `EditBuffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Replaces every run of whitespace in `text` with `with`.
pub fn collapse_whitespace(text: &str, with: &str) -> String {
    whitespace_runs().replace_all(text, with).into_owned()
}

/// `<img>` of a typing animation that spells out `text`.
pub fn typing_image(text: &str, color: &str, alt: &str) -> String {
    format!(
        "<img src=\"https://readme-typing-svg.herokuapp.com?font=Fira+Code&pause=1000&color={color}&center=true&vCenter=true&width=435&lines={lines}\" alt=\"{alt}\" />",
        lines = urlencoding::encode(&collapse_whitespace(text, "+")),
    )
}

/// Markdown replacing `text` for the given format.
pub fn render(kind: &FormatKind, text: &str) -> String {
    match kind {
        FormatKind::Bold => format!("**{text}**"),
        FormatKind::Italic => format!("*{text}*"),
        FormatKind::Center => format!("<div align=\"center\">{text}</div>"),
        FormatKind::Link { url } => {
            format!("[{text}]({})", url.as_deref().unwrap_or(DEFAULT_LINK_URL))
        }
        FormatKind::Badge { style } => format!(
            "![{text}](https://img.shields.io/badge/{label}-blue?style={style})",
            label = collapse_whitespace(text, "_"),
        ),
        FormatKind::Animate { color } => typing_image(
            text,
            color.as_deref().unwrap_or(DEFAULT_ANIMATION_COLOR),
            "Typing Animation",
        ),
    }
}

/// Text being edited for one section, with at most one pending selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    selection: Option<Selection>,
    cursor: usize,
}

impl EditBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, selection: None, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selection.map(|s| &self.text[s.start..s.end])
    }

    /// Replaces the whole buffer and drops any selection.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
        self.selection = None;
    }

    /// Selects `[start, end)`; an empty range clears the selection.
    pub fn select(&mut self, start: usize, end: usize) -> Result<(), FormatError> {
        let len = self.text.len();
        if start > end || end > len {
            return Err(FormatError::OutOfBounds { start, end, len });
        }
        if !self.text.is_char_boundary(start) || !self.text.is_char_boundary(end) {
            return Err(FormatError::NotCharBoundary { start, end });
        }
        self.selection = (start < end).then_some(Selection { start, end });
        Ok(())
    }

    /// Selects the first occurrence of `needle` at or after the cursor,
    /// wrapping to the start of the buffer. Returns whether it was found.
    pub fn find(&mut self, needle: &str) -> bool {
        if needle.is_empty() {
            return false;
        }
        let from = self.cursor.min(self.text.len());
        let hit = self.text[from..]
            .find(needle)
            .map(|i| i + from)
            .or_else(|| self.text.find(needle));
        match hit {
            Some(start) => {
                self.selection = Some(Selection { start, end: start + needle.len() });
                true
            }
            None => false,
        }
    }

    /// Splices the formatted selection into the buffer, moves the cursor to
    /// just after the replacement and clears the selection.
    pub fn apply(&mut self, kind: &FormatKind) -> Result<(), FormatError> {
        let sel = self.selection.take().ok_or(FormatError::NoSelection)?;
        let replacement = render(kind, &self.text[sel.start..sel.end]);
        self.text.replace_range(sel.start..sel.end, &replacement);
        self.cursor = sel.start + replacement.len();
        Ok(())
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
