//! CSV row reading.
//!
//! Rows are produced lazily from a reader that owns the underlying file handle and its
//! decompression layer. The handle is released as soon as the rows run out or an error is
//! yielded, and otherwise when the [`Rows`] is dropped.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::types::Row;

use super::compression::Compression;

/// Lazy, single-pass sequence of rows from one source.
///
/// Yields `Err` at most once; the sequence ends after the first error.
pub struct Rows {
    path: PathBuf,
    // `None` once finished; dropping the reader closes the file.
    records: Option<::csv::StringRecordsIntoIter<Box<dyn Read>>>,
}

impl std::fmt::Debug for Rows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows")
            .field("path", &self.path)
            .field("done", &self.records.is_none())
            .finish()
    }
}

impl Rows {
    /// Path the rows are read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for Rows {
    type Item = ExtractResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.as_mut()?.next() {
            Some(Ok(record)) => Some(Ok(record.iter().map(str::to_owned).collect())),
            Some(Err(source)) => {
                self.records = None;
                Some(Err(ExtractError::MalformedRow {
                    path: self.path.clone(),
                    source,
                }))
            }
            None => {
                self.records = None;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Rows {}

/// Open `path` through the decompression layer matching its extension and return its rows.
///
/// Every row is returned, including the first; header handling is up to the caller.
pub fn open_rows(path: impl AsRef<Path>) -> ExtractResult<Rows> {
    let path = path.as_ref();
    let compression = Compression::from_path(path);
    debug!(path = %path.display(), codec = compression.name(), "opening csv file");

    let reader = compression.open(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_rows(path, reader))
}

/// Parse rows from an already-open (and already-decompressed) reader.
///
/// `label` is only used in error messages.
pub fn read_rows(label: impl Into<PathBuf>, reader: Box<dyn Read>) -> Rows {
    let rdr = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    Rows {
        path: label.into(),
        records: Some(rdr.into_records()),
    }
}
