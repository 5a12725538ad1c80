//! Directory-to-Zefania conversion pipeline.
//!
//! Chapter files are read in file name order, one at a time. Each file with
//! an `<h3>` becomes the next chapter of the book that heading names; files
//! without one are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bible::{Bible, BibleBuilder, BibleInfo};
use crate::error::{Error, Result};
use crate::extract::{ChapterContent, extract_chapter_html};
use crate::util::{decode_text, has_extension};
use crate::zefania::{WriteOptions, write_zefania};

/// Extension of ePub chapter files, without the dot.
pub const DEFAULT_EXTENSION: &str = "html";

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Only files ending in `.{extension}` are read.
    pub extension: String,
    pub info: BibleInfo,
    pub write: WriteOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            info: BibleInfo::default(),
            write: WriteOptions::default(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_info(mut self, info: BibleInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_write_options(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }
}

/// What a conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ConvertSummary {
    pub output: PathBuf,
    /// Chapter files read, including skipped ones.
    pub files: usize,
    /// Files without a book title.
    pub skipped: usize,
    pub books: usize,
    pub chapters: usize,
    pub verses: usize,
}

/// List chapter files in `dir`, sorted by file name.
///
/// Subdirectories are not searched.
pub fn list_chapter_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extension) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read and extract one chapter file.
///
/// `Ok(None)` means the file has no book title.
pub fn read_chapter_file(path: &Path) -> Result<Option<ChapterContent>> {
    let bytes = fs::read(path).map_err(|source| Error::ReadChapter {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_chapter_html(&decode_text(&bytes)))
}

/// Build the Bible tree from a directory of chapter files.
pub fn build_bible(dir: &Path, options: &ConvertOptions) -> Result<Bible> {
    build(dir, options).map(|(bible, _)| bible)
}

/// Returns the tree along with (files read, files skipped).
fn build(dir: &Path, options: &ConvertOptions) -> Result<(Bible, (usize, usize))> {
    let files = list_chapter_files(dir, &options.extension)?;
    tracing::info!(dir = %dir.display(), files = files.len(), "reading chapters");

    let mut builder = BibleBuilder::new(options.info.clone());
    let mut skipped = 0;

    for path in &files {
        let Some(chapter) = read_chapter_file(path)? else {
            tracing::debug!(file = %path.display(), "no <h3> book title, skipping");
            skipped += 1;
            continue;
        };

        let verse_count = chapter.verses.len();
        let number = builder.add_chapter(&chapter.title, chapter.verses);
        tracing::debug!(
            file = %path.display(),
            book = %chapter.title,
            chapter = number,
            verses = verse_count,
            "chapter"
        );
    }

    Ok((builder.finish(), (files.len(), skipped)))
}

/// Convert a directory of chapter files into a Zefania XML file.
pub fn convert_directory(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertSummary> {
    let (bible, (files, skipped)) = build(input, options)?;
    write_zefania(&bible, output, options.write)?;

    let summary = ConvertSummary {
        output: output.to_path_buf(),
        files,
        skipped,
        books: bible.books.len(),
        chapters: bible.chapter_count(),
        verses: bible.verse_count(),
    };
    tracing::info!(
        output = %output.display(),
        books = summary.books,
        chapters = summary.chapters,
        verses = summary.verses,
        "wrote zefania xml"
    );
    Ok(summary)
}
