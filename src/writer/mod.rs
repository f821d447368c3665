//! # Keyed Writer Module
//!
//! This module turns an ordered stream of rows into a columnar file whose row groups
//! are cut by the value of the key column (field 0), followed by one index row group.
//!
//! ## Design Principles
//!
//! 1. **Key-driven row groups**: A new row group starts exactly when the key changes
//!    from the previous row. Row group size is never a factor.
//!
//! 2. **Trailing index**: The last row group holds one row per data row group: the
//!    group's key in the key column and schema defaults everywhere else.
//!
//! 3. **Two buffers, two lifetimes**: The current row group's columns are reset at
//!    every boundary; the index accumulator lives until the file is finished.
//!
//! 4. **Pluggable file format**: [`SegmentedColumnWriter`] drives any
//!    [`ColumnarFileWriter`]. [`ParquetFileWriter`] writes Parquet, and
//!    [`MemoryFileWriter`] keeps typed row groups in memory.

mod buffers;
mod config;
mod error;
mod memory;
mod parquet_sink;
mod segmented;
mod sink;
mod stats;


pub use buffers::ColumnBuffer;
pub use config::{CompressionType, KeyOrder, WriterConfig};
pub use error::WriterError;
pub use memory::{MemoryFile, MemoryFileWriter, MemoryRowGroupWriter};
pub use parquet_sink::{ParquetFileWriter, ParquetRowGroupWriter};
pub use segmented::{KeyedParquetWriter, SegmentedColumnWriter};
pub use sink::{ColumnarFileWriter, IndexFooter, RowGroupWriter};
pub use stats::WriterStats;
