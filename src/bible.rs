//! In-memory Bible tree: books, chapters and verses.
//!
//! The tree is assembled one chapter file at a time through [`BibleBuilder`]
//! and handed to [`crate::zefania`] for serialization.

use std::collections::HashMap;

/// A single verse.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Verse {
    /// Verse identifier as found in the marker, usually a number.
    pub id: String,
    pub text: String,
}

impl Verse {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// One chapter, produced from one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Chapter {
    /// 1-based position within the book.
    pub number: u32,
    pub verses: Vec<Verse>,
}

/// A book and its chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Book {
    /// 1-based position in first-encountered order.
    pub number: u32,
    pub title: String,
    pub short_name: String,
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }
}

/// Bibliographic fields written to the `XMLBIBLE` root and the
/// `INFORMATION` block.
///
/// The defaults are placeholders meant to be edited by hand after
/// conversion, or overridden up front with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct BibleInfo {
    pub bible_name: String,
    pub status: String,
    pub version: String,
    pub kind: String,
    pub revision: String,
    pub title: String,
    pub description: String,
    pub publisher: String,
    pub date: String,
    pub format: String,
    pub language: String,
}

impl Default for BibleInfo {
    fn default() -> Self {
        Self {
            bible_name: "Bible Name".to_string(),
            status: "v".to_string(),
            version: "2.0.1.18".to_string(),
            kind: "x-bible".to_string(),
            revision: "0".to_string(),
            title: "Your Title".to_string(),
            description: "Your Description".to_string(),
            publisher: "Your Publisher".to_string(),
            date: "Your Year".to_string(),
            format: "Zefania XML Bible Markup Language".to_string(),
            language: "Your Language".to_string(),
        }
    }
}

impl BibleInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bible_name(mut self, bible_name: impl Into<String>) -> Self {
        self.bible_name = bible_name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// The whole document: metadata plus books in numbering order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Bible {
    pub info: BibleInfo,
    pub books: Vec<Book>,
}

impl Bible {
    pub fn new(info: BibleInfo) -> Self {
        Self {
            info,
            books: Vec::new(),
        }
    }

    pub fn chapter_count(&self) -> usize {
        self.books.iter().map(|b| b.chapters.len()).sum()
    }

    pub fn verse_count(&self) -> usize {
        self.books.iter().map(Book::verse_count).sum()
    }

    pub fn book(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title == title)
    }
}

/// Assembles a [`Bible`] from chapters fed in reading order.
///
/// Books are keyed by title for the lifetime of the builder only. The first
/// chapter seen for a title creates the book; later ones append to it.
#[derive(Debug, Default)]
pub struct BibleBuilder {
    bible: Bible,
    /// Title -> index into `bible.books`.
    index: HashMap<String, usize>,
}

impl BibleBuilder {
    pub fn new(info: BibleInfo) -> Self {
        Self {
            bible: Bible::new(info),
            index: HashMap::new(),
        }
    }

    /// Append a chapter to the book named `title`, creating the book if this
    /// is the first time the title is seen. Returns the chapter number.
    pub fn add_chapter(&mut self, title: &str, verses: Vec<Verse>) -> u32 {
        let book_index = match self.index.get(title) {
            Some(&index) => index,
            None => {
                let index = self.bible.books.len();
                let book = Book {
                    number: index as u32 + 1,
                    title: title.to_string(),
                    short_name: short_name(title),
                    chapters: Vec::new(),
                };
                tracing::debug!(
                    bnumber = book.number,
                    bname = %book.title,
                    bsname = %book.short_name,
                    "new book"
                );
                self.bible.books.push(book);
                self.index.insert(title.to_string(), index);
                index
            }
        };

        let book = &mut self.bible.books[book_index];
        let number = book.chapters.len() as u32 + 1;
        book.chapters.push(Chapter { number, verses });
        number
    }

    pub fn finish(self) -> Bible {
        self.bible
    }
}

/// Abbreviated book name: the first three characters of the title.
///
/// Not unique across books ("1 Samuel" and "1 Sam..." collide); Zefania
/// readers key on `bnumber`, so collisions are tolerated.
pub fn short_name(title: &str) -> String {
    title.chars().take(3).collect()
}
