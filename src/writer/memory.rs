use std::sync::Arc;

use crate::schema::{FieldDescriptor, RowSchema, Value};

use super::buffers::ColumnBuffer;
use super::config::WriterConfig;
use super::error::WriterError;
use super::sink::{check_column, ColumnarFileWriter, IndexFooter, RowGroupWriter};

/// In-memory image of a keyed file: typed row groups instead of encoded bytes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryFile {
    /// Schema the file was created with (`None` if no row was ever written)
    pub schema: Option<Arc<RowSchema>>,
    /// Committed row groups, each as one buffer per column
    pub row_groups: Vec<Vec<ColumnBuffer>>,
    /// Data row group count recorded at close
    pub data_row_groups: Option<usize>,
}

impl MemoryFile {
    /// Empty destination
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of row group `index`, in order
    pub fn rows(&self, index: usize) -> Vec<Vec<Value>> {
        let Some(columns) = self.row_groups.get(index) else {
            return Vec::new();
        };
        let row_count = columns.first().map_or(0, ColumnBuffer::len);
        (0..row_count)
            .map(|row| columns.iter().filter_map(|c| c.get(row)).collect())
            .collect()
    }

    /// Rows of every data row group (the index row group excluded)
    pub fn data_rows(&self) -> Vec<Vec<Vec<Value>>> {
        let count = self.data_row_groups.unwrap_or(self.row_groups.len());
        (0..count).map(|i| self.rows(i)).collect()
    }

    /// Rows of the trailing index row group
    pub fn index_rows(&self) -> Vec<Vec<Value>> {
        match self.data_row_groups {
            Some(count) => self.rows(count),
            None => Vec::new(),
        }
    }
}

/// [`ColumnarFileWriter`] that keeps row groups in memory
#[derive(Debug)]
pub struct MemoryFileWriter {
    file: MemoryFile,
    schema: Arc<RowSchema>,
}

impl ColumnarFileWriter for MemoryFileWriter {
    type Destination = MemoryFile;
    type RowGroup<'a> = MemoryRowGroupWriter<'a> where Self: 'a;

    fn create(
        schema: &Arc<RowSchema>,
        mut destination: MemoryFile,
        _config: &WriterConfig,
    ) -> Result<Self, WriterError> {
        destination.schema = Some(schema.clone());
        Ok(Self {
            file: destination,
            schema: schema.clone(),
        })
    }

    fn begin_row_group(&mut self, row_count: usize) -> Result<Self::RowGroup<'_>, WriterError> {
        Ok(MemoryRowGroupWriter {
            columns: Vec::with_capacity(self.schema.len()),
            file: &mut self.file,
            schema: &self.schema,
            row_count,
        })
    }

    fn close(mut self, footer: &IndexFooter<'_>) -> Result<MemoryFile, WriterError> {
        self.file.data_row_groups = Some(footer.data_row_groups);
        Ok(self.file)
    }
}

/// Row group buffered until close, then appended to the [`MemoryFile`]
#[derive(Debug)]
pub struct MemoryRowGroupWriter<'a> {
    file: &'a mut MemoryFile,
    schema: &'a RowSchema,
    row_count: usize,
    columns: Vec<ColumnBuffer>,
}

impl RowGroupWriter for MemoryRowGroupWriter<'_> {
    fn write_column(
        &mut self,
        field: &FieldDescriptor,
        values: ColumnBuffer,
    ) -> Result<(), WriterError> {
        check_column(self.schema, self.columns.len(), field, &values, self.row_count)?;
        self.columns.push(values);
        Ok(())
    }

    fn close(self) -> Result<(), WriterError> {
        if self.columns.len() != self.schema.len() {
            return Err(WriterError::IncompleteRowGroup {
                written: self.columns.len(),
                expected: self.schema.len(),
            });
        }
        self.file.row_groups.push(self.columns);
        Ok(())
    }
}
