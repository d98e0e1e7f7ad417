//! File discovery: turn a configured path into the list of CSV files to read.

use std::cell::OnceCell;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ExtractError, ExtractResult};

use super::observability::{StreamContext, StreamObserver};

/// Extensions accepted by the file filter (matched case-insensitively against the path end).
pub const SUPPORTED_EXTENSIONS: [&str; 5] =
    [".csv", ".csv.gz", ".csv.bz2", ".csv.xz", ".csv.lzma"];

/// Returns `true` if `path` ends with one of [`SUPPORTED_EXTENSIONS`], ignoring case.
pub fn is_supported_path(path: &Path) -> bool {
    let lower = path.to_string_lossy().to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Resolves a configured path into the files of one stream.
///
/// The result is computed on the first successful [`FileLocator::resolve`] and cached for the
/// lifetime of the locator; later calls never touch the file system again.
#[derive(Debug)]
pub struct FileLocator {
    stream: String,
    root: PathBuf,
    paths: OnceCell<Vec<PathBuf>>,
}

impl FileLocator {
    pub fn new(stream: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            stream: stream.into(),
            root: root.into(),
            paths: OnceCell::new(),
        }
    }

    /// Configured root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the cached file list, if resolution already happened.
    pub fn cached(&self) -> Option<&[PathBuf]> {
        self.paths.get().map(Vec::as_slice)
    }

    /// Resolve the configured path into an ordered list of acceptable files.
    ///
    /// - A directory contributes its immediate children (no recursion, no sorting); child
    ///   directories are ignored.
    /// - A single file contributes itself.
    ///
    /// Files rejected by [`is_supported_path`] are logged at warn level and reported to
    /// `observer`, but only fail the call if nothing is left.
    pub fn resolve(&self, observer: Option<&dyn StreamObserver>) -> ExtractResult<&[PathBuf]> {
        if let Some(paths) = self.paths.get() {
            return Ok(paths);
        }
        let paths = self.scan(observer)?;
        Ok(self.paths.get_or_init(|| paths))
    }

    fn scan(&self, observer: Option<&dyn StreamObserver>) -> ExtractResult<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(ExtractError::Configuration {
                path: self.root.clone(),
            });
        }

        let candidates = if self.root.is_dir() {
            let mut children = Vec::new();
            for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
                let entry = entry.map_err(io::Error::from)?;
                if entry.path().is_dir() {
                    continue;
                }
                children.push(entry.into_path());
            }
            children
        } else {
            vec![self.root.clone()]
        };

        let mut paths = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if is_supported_path(&candidate) {
                paths.push(candidate);
            } else {
                self.reject(&candidate, observer);
            }
        }

        if paths.is_empty() {
            return Err(ExtractError::EmptyResult {
                stream: self.stream.clone(),
                path: self.root.clone(),
            });
        }
        debug!(stream = %self.stream, files = paths.len(), "resolved csv files");
        Ok(paths)
    }

    fn reject(&self, path: &Path, observer: Option<&dyn StreamObserver>) {
        warn!(
            stream = %self.stream,
            "skipping non-csv file '{}'; supported extensions: {}",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
        if let Some(obs) = observer {
            obs.on_file_skipped(&StreamContext {
                stream: self.stream.clone(),
                path: path.to_path_buf(),
            });
        }
    }
}
