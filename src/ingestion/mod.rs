//! File discovery, decompression, row parsing and record production.
//!
//! Most callers should build a [`RecordStream`] (from [`stream`]) per configured file entry and
//! use its two entry points:
//!
//! - [`RecordStream::schema`]: all-text schema from the first file's header row
//! - [`RecordStream::records`]: lazy records from every file, each keyed by its own header
//!
//! The building blocks are also available under:
//! - [`locate`]: which files qualify ([`FileLocator`], [`is_supported_path`])
//! - [`compression`]: decompression chosen from the file extension
//! - [`csv`]: lazy row reading

pub mod compression;
pub mod csv;
pub mod locate;
pub mod observability;
pub mod stream;

pub use compression::Compression;
pub use csv::{open_rows, read_rows, Rows};
pub use locate::{is_supported_path, FileLocator, SUPPORTED_EXTENSIONS};
pub use observability::{
    severity_for_error, CompositeObserver, FileStats, StreamContext, StreamObserver, StreamSeverity,
    TracingObserver,
};
pub use stream::{discover_streams, Context, RecordStream, Records};
