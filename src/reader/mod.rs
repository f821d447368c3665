//! # Keyed Reader Module
//!
//! Reads files produced by the keyed writer. The trailing index row group is
//! used to find the data row groups holding a key, so a lookup touches the
//! footer, the index and only the matching row groups.
//!
//! ## Example
//!
//! ```rust,no_run
//! use keyed_parquet::reader::KeyedReader;
//! use keyed_parquet::schema::Value;
//!
//! let reader = KeyedReader::open("events.parquet")?;
//! println!("Key column: {}", reader.metadata().key_column);
//!
//! for entry in reader.index()? {
//!     println!("{} -> row group {}", entry.key, entry.row_group);
//! }
//!
//! for row in reader.lookup(&Value::Int64(42))? {
//!     println!("{:?}", row);
//! }
//! # Ok::<(), keyed_parquet::reader::ReaderError>(())
//! ```

mod batches;
mod config;
mod error;
mod index;
mod metadata;
mod open;
mod summary;


pub use batches::RecordBatchIterator;
pub use config::ReaderConfig;
pub use error::ReaderError;
pub use index::IndexEntry;
pub use metadata::KeyedFileMetadata;
pub use summary::FileSummary;

use config::ReaderSource;

/// Reader for keyed Parquet files
pub struct KeyedReader {
    source: ReaderSource,
    config: ReaderConfig,
    file_metadata: KeyedFileMetadata,
}
