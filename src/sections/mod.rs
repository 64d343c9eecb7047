use std::fmt;

/// Position-derived identity of a section within one parse of a document.
///
/// `Heading(n)` carries the index the section had in the segmenter output,
/// so ids stay valid for as long as the document text is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    Intro,
    Heading(usize),
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionId::Intro => f.write_str("intro"),
            SectionId::Heading(n) => write!(f, "section-{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Heading with a single leading `#`.
    Title,
    /// Heading with two or more leading `#`.
    Section,
    /// Text before the first heading.
    Intro,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    /// The heading line as written; empty for the intro section.
    pub full_title: String,
    /// Heading line plus body, newline-joined.
    pub content: String,
    /// 0-based line index where the section starts.
    pub start_line: usize,
    pub kind: SectionKind,
}

const INTRO_TITLE: &str = "Introduction";

/// Splits markdown into heading-delimited sections in source order.
///
/// Runs in a single pass over the lines. Text ahead of the first heading is
/// collected into one intro section, which is sealed once a heading appears.
pub fn segment(markdown: &str) -> Vec<Section> {
    if markdown.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<Section> = Vec::new();
    let mut open: Option<Section> = None;

    for (index, line) in markdown.split('\n').enumerate() {
        if line.starts_with('#') {
            if let Some(done) = open.take() {
                out.push(done);
            }
            let kind = if line.starts_with("##") {
                SectionKind::Section
            } else {
                SectionKind::Title
            };
            open = Some(Section {
                id: SectionId::Heading(out.len()),
                title: heading_text(line).to_string(),
                full_title: line.to_string(),
                content: line.to_string(),
                start_line: index,
                kind,
            });
        } else if let Some(current) = open.as_mut() {
            current.content.push('\n');
            current.content.push_str(line);
        } else if let Some(intro) = out.last_mut() {
            intro.content.push('\n');
            intro.content.push_str(line);
        } else {
            out.push(Section {
                id: SectionId::Intro,
                title: INTRO_TITLE.to_string(),
                full_title: String::new(),
                content: line.to_string(),
                start_line: index,
                kind: SectionKind::Intro,
            });
        }
    }

    if let Some(done) = open {
        out.push(done);
    }
    out
}

/// Heading line with its `#` markers and following whitespace removed.
fn heading_text(line: &str) -> &str {
    line.trim_start_matches('#').trim_start()
}

pub fn find(sections: &[Section], id: SectionId) -> Option<&Section> {
    sections.iter().find(|s| s.id == id)
}
