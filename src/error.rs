use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error type returned by file discovery, row reading and record production.
///
/// Errors are surfaced synchronously at the point they occur: file resolution for
/// [`ExtractError::Configuration`] / [`ExtractError::EmptyResult`], and schema derivation or
/// mid-iteration for everything else.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The configured path does not exist on the file system.
    #[error("file path does not exist: {}", path.display())]
    Configuration { path: PathBuf },

    /// The configured path exists but no file passed the extension filter.
    #[error(
        "stream '{stream}' has no acceptable files under {} (see warnings for skipped files)",
        path.display()
    )]
    EmptyResult { stream: String, path: PathBuf },

    /// Schema was requested but the first file contains no header row.
    #[error("cannot derive schema: file {} has no header row", path.display())]
    EmptyFile { path: PathBuf },

    /// A file (or its decompression layer) could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV grammar, text decoding or decompression failure while reading a file.
    #[error("malformed row in {}: {source}", path.display())]
    MalformedRow {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Underlying I/O error (e.g. a directory could not be listed).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Path of the file the error relates to, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Configuration { path }
            | Self::EmptyResult { path, .. }
            | Self::EmptyFile { path }
            | Self::Open { path, .. }
            | Self::MalformedRow { path, .. } => Some(path.as_path()),
            Self::Io(_) => None,
        }
    }
}
