//! Verse extraction from one chapter document.
//!
//! A chapter file carries its book title in the first `<h3>` and its text in
//! paragraphs styled `bi`, `ei` or `sl`. Verse numbers are inline
//! `<span class="di">` markers; everything between two markers belongs to the
//! first one, across paragraph boundaries.
//!
//! ```
//! use epub2zefania::extract::extract_chapter_html;
//!
//! let chapter = extract_chapter_html(
//!     r#"<h3>Genesis</h3><p class="bi"><span class="di">v1</span>In the beginning...</p>"#,
//! )
//! .unwrap();
//! assert_eq!(chapter.title, "Genesis");
//! assert_eq!(chapter.verses[0].id, "1");
//! assert_eq!(chapter.verses[0].text, "In the beginning...");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::bible::Verse;
use crate::dom::{HtmlDom, NodeId, parse_html};

/// Leading chapter number that some exports put before the first verse.
static CHAPTER_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s+").expect("chapter number pattern is valid"));

/// Indentation put before each stanza line.
const STANZA_INDENT: &str = " ";

/// Class of the inline verse marker.
const VERSE_MARKER_CLASS: &str = "di";

/// Paragraph styles that carry verse text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    /// `bi`: body text.
    BodyIndent,
    /// `ei`: extra-indented body text.
    ExtraIndent,
    /// `sl`: poetry, one line per `<br>`.
    StanzaLine,
}

impl ParagraphStyle {
    /// Classify a paragraph by its class list.
    ///
    /// `sl` wins when several recognized classes are present, since it is the
    /// only one that changes how text is collected.
    pub fn from_classes(classes: &[String]) -> Option<Self> {
        let has = |name: &str| classes.iter().any(|c| c == name);
        if has("sl") {
            Some(Self::StanzaLine)
        } else if has("bi") {
            Some(Self::BodyIndent)
        } else if has("ei") {
            Some(Self::ExtraIndent)
        } else {
            None
        }
    }

    pub fn is_stanza(self) -> bool {
        self == Self::StanzaLine
    }
}

/// Book title and verses pulled from one chapter file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterContent {
    pub title: String,
    pub verses: Vec<Verse>,
}

/// Collects text fragments for the verse currently being read.
#[derive(Debug, Default)]
pub struct VerseAccumulator {
    current_id: Option<String>,
    fragments: Vec<String>,
}

impl VerseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the verse that incoming text belongs to.
    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// Add a text node. Stanza lines get their indentation here.
    pub fn push_text(&mut self, text: &str, style: ParagraphStyle) {
        let trimmed = text.trim();
        if style.is_stanza() {
            self.fragments.push(format!("{STANZA_INDENT}{trimmed}"));
        } else {
            self.fragments.push(trimmed.to_string());
        }
    }

    /// Add a stanza line break.
    pub fn push_line_break(&mut self) {
        self.fragments.push(format!("\n{STANZA_INDENT}"));
    }

    /// Close the open verse and start a new one from a marker's text.
    ///
    /// Returns the verse that was closed, if it had any text.
    pub fn begin_verse(&mut self, marker_text: &str) -> Option<Verse> {
        let finished = self.flush();
        self.current_id = Some(verse_id_from_marker(marker_text));
        finished
    }

    /// Emit the collected text as a verse and clear the fragments.
    ///
    /// Before the first marker this does nothing and the fragments are kept,
    /// so lead-in text (typically a chapter number) is folded into the first
    /// verse. Text that trims down to nothing is discarded without emitting.
    /// The current id survives a flush: text that follows without a new
    /// marker still belongs to the same verse.
    pub fn flush(&mut self) -> Option<Verse> {
        let id = self.current_id.as_ref()?;
        if self.fragments.is_empty() {
            return None;
        }
        let joined = self.fragments.concat();
        self.fragments.clear();

        let text = strip_chapter_number(joined.trim());
        if text.is_empty() {
            return None;
        }
        tracing::trace!(vnumber = %id, len = text.len(), "verse");
        Some(Verse::new(id.clone(), text))
    }
}

/// Verse id from marker text: `"v7"` becomes `"7"`.
pub fn verse_id_from_marker(marker_text: &str) -> String {
    marker_text.trim().trim_start_matches('v').trim().to_string()
}

/// Strip one leading chapter number (`"12 "`) from verse text.
pub fn strip_chapter_number(text: &str) -> &str {
    match CHAPTER_NUMBER_PREFIX.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Book title from the first `<h3>`, trimmed.
///
/// `None` when there is no `<h3>` or its text is blank.
pub fn book_title(dom: &HtmlDom) -> Option<String> {
    dom.find_by_tag("h3")
        .map(|h3| dom.text(h3).trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Walk the verse paragraphs of a document and return its verses in order.
pub fn extract_verses(dom: &HtmlDom) -> Vec<Verse> {
    let mut verses = Vec::new();
    let mut acc = VerseAccumulator::new();

    for p in dom.find_all_by_tag("p") {
        let Some(style) = ParagraphStyle::from_classes(dom.element_classes(p)) else {
            continue;
        };
        for child in dom.children(p) {
            if let Some(verse) = visit_child(dom, child, style, &mut acc) {
                verses.push(verse);
            }
        }
    }

    verses.extend(acc.flush());
    verses
}

fn visit_child(
    dom: &HtmlDom,
    child: NodeId,
    style: ParagraphStyle,
    acc: &mut VerseAccumulator,
) -> Option<Verse> {
    if let Some(text) = dom.text_content(child) {
        acc.push_text(text, style);
        return None;
    }

    if dom.is_element_named(child, "span") && dom.has_class(child, VERSE_MARKER_CLASS) {
        return acc.begin_verse(&dom.text(child));
    }

    if style.is_stanza() && dom.is_element_named(child, "br") {
        acc.push_line_break();
    }
    None
}

/// Extract a chapter from a parsed document.
///
/// Returns `None` when the document has no titled `<h3>`; such files are
/// not chapters and contribute nothing.
pub fn extract_chapter(dom: &HtmlDom) -> Option<ChapterContent> {
    let title = book_title(dom)?;
    let verses = extract_verses(dom);
    Some(ChapterContent { title, verses })
}

/// Parse and extract a chapter from HTML source.
pub fn extract_chapter_html(html: &str) -> Option<ChapterContent> {
    extract_chapter(&parse_html(html))
}
