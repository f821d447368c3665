//! # keyed-parquet - Key-Clustered Parquet Files
//!
//! `keyed-parquet` writes an ordered stream of rows into a Parquet file whose row
//! groups follow the values of the first column (the key): a new row group starts
//! exactly when the key changes. After the last data row group the writer appends
//! one more row group, the *index*, holding one row per data row group with that
//! row group's key and schema defaults in every other column.
//!
//! A reader can decode the index alone, find the row groups for a key and skip the
//! rest of the file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use keyed_parquet::prelude::*;
//!
//! let schema = Arc::new(RowSchema::new(vec![
//!     FieldDescriptor::new("day", ValueType::Date32),
//!     FieldDescriptor::new("city", ValueType::Utf8),
//!     FieldDescriptor::nullable("temperature", ValueType::Float64),
//! ])?);
//!
//! let mut writer = KeyedParquetWriter::new_file("weather.parquet", WriterConfig::default())?;
//! for (day, city, temp) in [(19000, "Oslo", 3.5), (19000, "Rome", 14.0), (19001, "Oslo", 2.0)] {
//!     let row = Row::new(
//!         schema.clone(),
//!         vec![Value::Date32(day), Value::from(city), Value::Float64(temp)],
//!     )?;
//!     writer.add(&row)?;
//! }
//!
//! let stats = writer.finish()?;
//! println!("{}", stats);
//!
//! let reader = KeyedReader::open("weather.parquet")?;
//! let rows = reader.lookup(&Value::Date32(19000))?;
//! assert_eq!(rows.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## File Layout
//!
//! | Row group        | Contents                                            |
//! |------------------|-----------------------------------------------------|
//! | `0..n`           | Data: every row of one run of equal keys            |
//! | `n` (last)       | Index: `n` rows, key of row group `i` in row `i`    |
//!
//! The footer carries `keyed:` key/value entries (format version, key column,
//! row schema, data row group count); see [`schema`].
//!
//! ## Modules
//!
//! - [`schema`]: row schemas, typed values and footer constants
//! - [`writer`]: the segmenting writer and its columnar file backends
//! - [`reader`]: index-driven reading of keyed files

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod reader;
pub mod schema;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::reader::{
        FileSummary, IndexEntry, KeyedFileMetadata, KeyedReader, ReaderConfig, ReaderError,
    };
    pub use crate::schema::{FieldDescriptor, Row, RowSchema, SchemaError, Value, ValueType};
    pub use crate::writer::{
        CompressionType, KeyOrder, KeyedParquetWriter, MemoryFile, MemoryFileWriter,
        SegmentedColumnWriter, WriterConfig, WriterError, WriterStats,
    };
}
