use crate::schema::SchemaError;

/// Errors that can occur during reading
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Stored schema or cell values could not be interpreted
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Row group is not a data row group of this file
    #[error("Row group {row_group} out of range: file has {data_row_groups} data row groups")]
    RowGroupOutOfRange {
        /// Requested row group
        row_group: usize,
        /// Number of data row groups in the file
        data_row_groups: usize,
    },
}
