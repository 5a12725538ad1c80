//! # epub2zefania
//!
//! Convert the HTML chapter files of an ePub Bible into a single
//! [Zefania XML](https://sourceforge.net/projects/zefania-sharp/) document.
//!
//! Each chapter file is expected to name its book in an `<h3>` and to carry
//! its text in paragraphs classed `bi`, `ei` or `sl`, with verse numbers in
//! `<span class="di">` markers. Files are read in file name order; repeated
//! book titles become consecutive chapters of the same book.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use epub2zefania::{ConvertOptions, convert_directory};
//!
//! let summary = convert_directory(
//!     Path::new("OPS"),
//!     Path::new("bible_output.xml"),
//!     &ConvertOptions::default(),
//! )?;
//! println!("{} books, {} verses", summary.books, summary.verses);
//! # Ok::<(), epub2zefania::Error>(())
//! ```
//!
//! ## Working with the tree
//!
//! ```
//! use epub2zefania::{BibleBuilder, BibleInfo, Verse, WriteOptions, to_xml_string};
//! use epub2zefania::extract::extract_chapter_html;
//!
//! let chapter = extract_chapter_html(
//!     r#"<h3>Ruth</h3><p class="bi"><span class="di">v1</span>In the days...</p>"#,
//! )
//! .unwrap();
//!
//! let mut builder = BibleBuilder::new(BibleInfo::new().with_language("ENG"));
//! builder.add_chapter(&chapter.title, chapter.verses);
//! builder.add_chapter("Ruth", vec![Verse::new("1", "Naomi said...")]);
//!
//! let xml = to_xml_string(&builder.finish(), WriteOptions::default()).unwrap();
//! assert!(xml.contains(r#"<CHAPTER cnumber="2">"#));
//! ```

pub mod bible;
pub mod convert;
pub mod dom;
pub mod error;
pub mod extract;
pub(crate) mod util;
pub mod zefania;

pub use bible::{Bible, BibleBuilder, BibleInfo, Book, Chapter, Verse};
pub use convert::{
    ConvertOptions, ConvertSummary, build_bible, convert_directory, list_chapter_files,
};
pub use error::{Error, Result};
pub use extract::{ChapterContent, extract_chapter};
pub use zefania::{WriteOptions, to_xml_string, write_zefania, write_zefania_to_writer};
