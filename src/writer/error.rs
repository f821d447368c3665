use crate::schema::{SchemaError, ValueType};

/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Row schema could not be serialized into the file footer
    #[error("Metadata error: {0}")]
    MetadataError(#[from] serde_json::Error),

    /// Row rejected by the stream schema
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Row arity differs from the schema fixed by the first row
    #[error("Row has {found} fields, stream schema has {expected}")]
    FieldCountMismatch {
        /// Field count of the stream schema
        expected: usize,
        /// Field count of the rejected row
        found: usize,
    },

    /// Value pushed into a column buffer of another type
    #[error("Column type mismatch: expected {expected}, found {found}")]
    ColumnTypeMismatch {
        /// Type of the column buffer
        expected: ValueType,
        /// Type of the supplied value
        found: ValueType,
    },

    /// Columns of a row group written out of schema order
    #[error("Column order violation: expected column '{expected}', got '{found}'")]
    ColumnOrder {
        /// Column the row group writer expected next
        expected: String,
        /// Column that was supplied
        found: String,
    },

    /// Column length differs from the row count announced for the row group
    #[error("Column '{column}' has {found} values, row group has {expected} rows")]
    ColumnLength {
        /// Column name
        column: String,
        /// Announced row count
        expected: usize,
        /// Values supplied
        found: usize,
    },

    /// Row group closed before every column was written
    #[error("Row group closed after {written} of {expected} columns")]
    IncompleteRowGroup {
        /// Columns written
        written: usize,
        /// Columns in the schema
        expected: usize,
    },

    /// Key went backwards while strict key ordering is enabled
    #[error("Key {next} follows {previous}; input is not sorted by the key column")]
    UnsortedKey {
        /// Previous key, rendered
        previous: String,
        /// Offending key, rendered
        next: String,
    },

    /// An earlier failure left the output in an undefined state
    #[error("Writer is unusable after an earlier failure")]
    Poisoned,
}
