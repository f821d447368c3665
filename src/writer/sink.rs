use std::sync::Arc;

use crate::schema::{FieldDescriptor, RowSchema};

use super::buffers::ColumnBuffer;
use super::config::WriterConfig;
use super::error::WriterError;

/// Facts about the finished file recorded alongside the row groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFooter<'a> {
    /// Name of the key column (field 0)
    pub key_column: &'a str,
    /// Number of data row groups; the index row group follows them
    pub data_row_groups: usize,
}

/// Scoped writer for a single row group.
///
/// Columns are written once each, in schema order. Dropping the writer without
/// calling [`RowGroupWriter::close`] discards the row group.
pub trait RowGroupWriter: Sized {
    /// Write the values of one column
    fn write_column(
        &mut self,
        field: &FieldDescriptor,
        values: ColumnBuffer,
    ) -> Result<(), WriterError>;

    /// Commit the row group to the file
    fn close(self) -> Result<(), WriterError>;
}

/// Columnar file format that the segmented writer emits row groups into
pub trait ColumnarFileWriter: Sized {
    /// Byte sink (or other target) the file is written to
    type Destination;

    /// Row group writer borrowing this file writer
    type RowGroup<'a>: RowGroupWriter
    where
        Self: 'a;

    /// Bind a new file to `schema` and `destination`
    fn create(
        schema: &Arc<RowSchema>,
        destination: Self::Destination,
        config: &WriterConfig,
    ) -> Result<Self, WriterError>;

    /// Start a row group that will hold `row_count` rows
    fn begin_row_group(&mut self, row_count: usize) -> Result<Self::RowGroup<'_>, WriterError>;

    /// Finalize the file and give the destination back
    fn close(self, footer: &IndexFooter<'_>) -> Result<Self::Destination, WriterError>;
}

/// Check that `field` is the next column of a row group and has `row_count` values
pub(crate) fn check_column(
    schema: &RowSchema,
    position: usize,
    field: &FieldDescriptor,
    values: &ColumnBuffer,
    row_count: usize,
) -> Result<(), WriterError> {
    let expected = schema
        .field(position)
        .ok_or_else(|| WriterError::ColumnOrder {
            expected: "<end of row group>".to_string(),
            found: field.name.clone(),
        })?;

    if expected.name != field.name {
        return Err(WriterError::ColumnOrder {
            expected: expected.name.clone(),
            found: field.name.clone(),
        });
    }

    if values.value_type() != expected.value_type {
        return Err(WriterError::ColumnTypeMismatch {
            expected: expected.value_type,
            found: values.value_type(),
        });
    }

    if values.len() != row_count {
        return Err(WriterError::ColumnLength {
            column: field.name.clone(),
            expected: row_count,
            found: values.len(),
        });
    }

    Ok(())
}
