//! Error types for epub2zefania operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a chapter directory.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML writing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read chapter {}: {source}", path.display())]
    ReadChapter {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
