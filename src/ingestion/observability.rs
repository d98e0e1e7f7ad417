use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::ExtractError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StreamSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Which stream and file an event refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamContext {
    /// Stream name.
    pub stream: String,
    /// File (or configured root path) involved.
    pub path: PathBuf,
}

/// Stats reported when a file has been fully read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    /// Number of records emitted from the file (header excluded).
    pub records: usize,
}

/// Observer interface for extraction events.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait StreamObserver: Send + Sync {
    /// Called when a candidate file is rejected by the extension filter.
    fn on_file_skipped(&self, _ctx: &StreamContext) {}

    /// Called when every row of a file has been read.
    fn on_file_completed(&self, _ctx: &StreamContext, _stats: FileStats) {}

    /// Called when schema derivation or record production fails.
    fn on_failure(&self, _ctx: &StreamContext, _severity: StreamSeverity, _error: &ExtractError) {}

    /// Called when a failure meets the stream's alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &StreamContext, severity: StreamSeverity, error: &ExtractError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn StreamObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn StreamObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl StreamObserver for CompositeObserver {
    fn on_file_skipped(&self, ctx: &StreamContext) {
        for o in &self.observers {
            o.on_file_skipped(ctx);
        }
    }

    fn on_file_completed(&self, ctx: &StreamContext, stats: FileStats) {
        for o in &self.observers {
            o.on_file_completed(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &StreamContext, severity: StreamSeverity, error: &ExtractError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &StreamContext, severity: StreamSeverity, error: &ExtractError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits extraction events as `tracing` events.
///
/// Skipped files are already logged at warn level during file resolution, so this observer
/// only reports completions and failures.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl StreamObserver for TracingObserver {
    fn on_file_completed(&self, ctx: &StreamContext, stats: FileStats) {
        info!(
            stream = %ctx.stream,
            path = %ctx.path.display(),
            records = stats.records,
            "finished reading file"
        );
    }

    fn on_failure(&self, ctx: &StreamContext, severity: StreamSeverity, error: &ExtractError) {
        warn!(
            stream = %ctx.stream,
            path = %ctx.path.display(),
            ?severity,
            "extraction failed: {error}"
        );
    }

    fn on_alert(&self, ctx: &StreamContext, severity: StreamSeverity, error: &ExtractError) {
        error!(
            stream = %ctx.stream,
            path = %ctx.path.display(),
            ?severity,
            "[ALERT] extraction failed: {error}"
        );
    }
}

/// Classify an error for observer callbacks.
///
/// I/O-rooted failures (missing paths, unreadable files, broken compressed data) are
/// `Critical`; problems with the content or shape of the input are `Error`.
pub fn severity_for_error(e: &ExtractError) -> StreamSeverity {
    match e {
        ExtractError::Configuration { .. } | ExtractError::Open { .. } | ExtractError::Io(_) => {
            StreamSeverity::Critical
        }
        ExtractError::MalformedRow { source, .. } => match source.kind() {
            ::csv::ErrorKind::Io(_) => StreamSeverity::Critical,
            _ => StreamSeverity::Error,
        },
        ExtractError::EmptyResult { .. } | ExtractError::EmptyFile { .. } => StreamSeverity::Error,
    }
}
