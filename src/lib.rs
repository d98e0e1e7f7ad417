//! `csv-tap` is a file-based extraction connector for CSV data.
//!
//! Given a configured path (a single file or a directory), it discovers eligible CSV files,
//! decompresses them transparently, derives an all-text [`types::Schema`] from the header row
//! and streams every following row as a header-keyed [`types::Record`].
//!
//! ## What files are read
//!
//! Directories contribute their immediate children (no recursion). Files are accepted by
//! extension, case-insensitively:
//!
//! - `.csv` (plain text)
//! - `.csv.gz` (gzip)
//! - `.csv.bz2` (bzip2)
//! - `.csv.xz`, `.csv.lzma` (LZMA)
//!
//! Other files are skipped with a warning. Each file's first row is its own header; headers are
//! never merged across files.
//!
//! ## Quick example
//!
//! ```no_run
//! use csv_tap::config::FileConfig;
//! use csv_tap::ingestion::RecordStream;
//!
//! # fn main() -> Result<(), csv_tap::ExtractError> {
//! let stream = RecordStream::new(FileConfig::new("data/people").with_keys(["id"]));
//!
//! let schema = stream.schema()?;
//! println!("fields={:?}", schema.field_names().collect::<Vec<_>>());
//!
//! for record in stream.records(None)? {
//!     let record = record?;
//!     println!("{}", record.to_json());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: file discovery, decompression, row parsing and record streams
//! - [`types`]: schema + record types
//! - [`config`]: `serde` configuration values
//! - [`error`]: error type shared across the crate
//!
//! The library emits `tracing` events (skipped files at warn level) but never installs a
//! subscriber.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod types;

pub use error::{ExtractError, ExtractResult};
