//! Record streams: schema derivation and record production over a stream's files.
//!
//! A [`RecordStream`] is one configured table backed by one or more CSV files. It exposes the
//! two entry points used by an extraction pipeline:
//!
//! - [`RecordStream::schema`]: reads only the first row of the first file.
//! - [`RecordStream::records`]: reads every file in order; each file's first row is that file's
//!   header and every following row becomes a [`Record`] keyed by it.

use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{FileConfig, TapConfig};
use crate::error::{ExtractError, ExtractResult};
use crate::types::{Record, Row, Schema};

use super::csv::{open_rows, Rows};
use super::locate::FileLocator;
use super::observability::{
    severity_for_error, FileStats, StreamContext, StreamObserver, StreamSeverity,
};

/// Partition context passed to [`RecordStream::records`]. Accepted for compatibility with
/// partitioned streams; currently ignored.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// One configured stream of CSV files.
///
/// The resolved file list is cached per instance, so two streams in one process never share
/// it. Not meant for concurrent use.
pub struct RecordStream {
    config: FileConfig,
    locator: FileLocator,
    primary_keys: OnceCell<Vec<String>>,
    observer: Option<Arc<dyn StreamObserver>>,
    alert_at_or_above: StreamSeverity,
}

impl fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStream")
            .field("config", &self.config)
            .field("files", &self.locator.cached())
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl RecordStream {
    /// Create a stream from its file configuration. Nothing is read until first use.
    pub fn new(config: FileConfig) -> Self {
        let locator = FileLocator::new(config.entity.clone(), config.path.clone());
        Self {
            config,
            locator,
            primary_keys: OnceCell::new(),
            observer: None,
            alert_at_or_above: StreamSeverity::Critical,
        }
    }

    /// Attach an observer for skipped files, completed files and failures.
    pub fn with_observer(mut self, observer: Arc<dyn StreamObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Severity at or above which failures are also reported through `on_alert`.
    pub fn with_alert_threshold(mut self, severity: StreamSeverity) -> Self {
        self.alert_at_or_above = severity;
        self
    }

    /// Stream name.
    pub fn name(&self) -> &str {
        &self.config.entity
    }

    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    /// Primary-key field names. Empty until [`Self::schema`] has been called.
    pub fn primary_keys(&self) -> &[String] {
        self.primary_keys.get().map(Vec::as_slice).unwrap_or_default()
    }

    /// Files backing this stream, resolved on first call and cached afterwards.
    pub fn file_paths(&self) -> ExtractResult<&[PathBuf]> {
        self.locator.resolve(self.observer.as_deref())
    }

    /// Derive the schema from the header row of the first file.
    ///
    /// Every field is declared as text. Also records the configured primary keys.
    ///
    /// Fails with [`ExtractError::EmptyFile`] if the first file has no rows.
    pub fn schema(&self) -> ExtractResult<Schema> {
        self.primary_keys.get_or_init(|| self.config.keys.clone());

        let header = self.first_header().inspect_err(|e| self.report_failure(e))?;
        Ok(Schema::from_header(&header))
    }

    fn first_header(&self) -> ExtractResult<Row> {
        let first = self
            .file_paths()?
            .first()
            .ok_or_else(|| ExtractError::EmptyResult {
                stream: self.config.entity.clone(),
                path: self.config.path.clone(),
            })?;

        // Dropping `rows` after the first row closes the file.
        let mut rows = open_rows(first)?;
        match rows.next() {
            Some(header) => header,
            None => Err(ExtractError::EmptyFile {
                path: first.clone(),
            }),
        }
    }

    /// Lazily produce records from every file, in file order.
    ///
    /// File resolution happens here, so configuration problems surface from this call. Read
    /// errors are yielded as `Err` items and end the sequence. `context` is ignored.
    pub fn records(&self, _context: Option<&Context>) -> ExtractResult<Records<'_>> {
        let paths = self.file_paths().inspect_err(|e| self.report_failure(e))?;
        Ok(Records {
            stream: self,
            paths: paths.iter(),
            current: None,
            done: false,
        })
    }

    fn context_for(&self, path: &Path) -> StreamContext {
        StreamContext {
            stream: self.config.entity.clone(),
            path: path.to_path_buf(),
        }
    }

    fn report_failure(&self, error: &ExtractError) {
        let Some(obs) = self.observer.as_ref() else {
            return;
        };
        let ctx = self.context_for(error.path().unwrap_or(&self.config.path));
        let severity = severity_for_error(error);
        obs.on_failure(&ctx, severity, error);
        if severity >= self.alert_at_or_above {
            obs.on_alert(&ctx, severity, error);
        }
    }

    fn report_completed(&self, file: &FileRecords) {
        if let Some(obs) = self.observer.as_ref() {
            obs.on_file_completed(
                &self.context_for(file.rows.path()),
                FileStats {
                    records: file.emitted,
                },
            );
        }
    }
}

/// Rows of the file currently being read, plus that file's header.
struct FileRecords {
    rows: Rows,
    header: Option<Row>,
    emitted: usize,
}

/// Lazy, single-pass sequence of records across all files of a [`RecordStream`].
///
/// At most one file is open at a time; dropping the iterator closes it.
pub struct Records<'a> {
    stream: &'a RecordStream,
    paths: std::slice::Iter<'a, PathBuf>,
    current: Option<FileRecords>,
    done: bool,
}

impl fmt::Debug for Records<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Records")
            .field("stream", &self.stream.name())
            .field("current", &self.current.as_ref().map(|c| c.rows.path()))
            .field("remaining_files", &self.paths.len())
            .field("done", &self.done)
            .finish()
    }
}

impl Records<'_> {
    fn fail(&mut self, error: ExtractError) -> ExtractError {
        self.done = true;
        self.current = None;
        self.stream.report_failure(&error);
        error
    }
}

impl Iterator for Records<'_> {
    type Item = ExtractResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let Some(file) = self.current.as_mut() else {
                let Some(path) = self.paths.next() else {
                    self.done = true;
                    return None;
                };
                match open_rows(path) {
                    Ok(rows) => {
                        self.current = Some(FileRecords {
                            rows,
                            header: None,
                            emitted: 0,
                        })
                    }
                    Err(e) => return Some(Err(self.fail(e))),
                }
                continue;
            };

            match file.rows.next() {
                Some(Ok(row)) => {
                    if let Some(header) = &file.header {
                        file.emitted += 1;
                        return Some(Ok(Record::zip(header, row)));
                    }
                    file.header = Some(row);
                }
                Some(Err(e)) => return Some(Err(self.fail(e))),
                None => {
                    if let Some(finished) = self.current.take() {
                        self.stream.report_completed(&finished);
                    }
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Records<'_> {}

/// Build one [`RecordStream`] per configured file entry, in configuration order.
pub fn discover_streams(config: &TapConfig) -> Vec<RecordStream> {
    config
        .files
        .iter()
        .cloned()
        .map(RecordStream::new)
        .collect()
}
