use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::format::KeyValue;

use crate::schema::{
    FieldDescriptor, RowSchema, KEYED_FORMAT_VERSION, KEY_DATA_ROW_GROUPS, KEY_FORMAT_VERSION,
    KEY_KEY_COLUMN, KEY_ROW_SCHEMA,
};

use super::buffers::ColumnBuffer;
use super::config::WriterConfig;
use super::error::WriterError;
use super::sink::{check_column, ColumnarFileWriter, IndexFooter, RowGroupWriter};

/// Parquet file bound to one row schema; each committed row group becomes
/// exactly one physical Parquet row group
pub struct ParquetFileWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    row_schema: Arc<RowSchema>,
    arrow_schema: SchemaRef,
}

impl<W: Write + Send> ParquetFileWriter<W> {
    fn footer_metadata(schema: &RowSchema) -> Result<HashMap<String, String>, WriterError> {
        let mut metadata = HashMap::new();
        metadata.insert(
            KEY_FORMAT_VERSION.to_string(),
            KEYED_FORMAT_VERSION.to_string(),
        );
        metadata.insert(
            KEY_KEY_COLUMN.to_string(),
            schema.key_field().name.clone(),
        );
        metadata.insert(KEY_ROW_SCHEMA.to_string(), serde_json::to_string(schema)?);
        Ok(metadata)
    }
}

impl<W: Write + Send> ColumnarFileWriter for ParquetFileWriter<W> {
    type Destination = W;
    type RowGroup<'a> = ParquetRowGroupWriter<'a, W> where Self: 'a;

    fn create(
        schema: &Arc<RowSchema>,
        destination: W,
        config: &WriterConfig,
    ) -> Result<Self, WriterError> {
        let arrow_schema = Arc::new(schema.to_arrow_schema());
        let props = config.to_writer_properties(&Self::footer_metadata(schema)?);
        let writer = ArrowWriter::try_new(destination, arrow_schema.clone(), Some(props))?;

        Ok(Self {
            writer,
            row_schema: schema.clone(),
            arrow_schema,
        })
    }

    fn begin_row_group(&mut self, row_count: usize) -> Result<Self::RowGroup<'_>, WriterError> {
        Ok(ParquetRowGroupWriter {
            columns: Vec::with_capacity(self.row_schema.len()),
            writer: &mut self.writer,
            row_schema: &self.row_schema,
            arrow_schema: self.arrow_schema.clone(),
            row_count,
        })
    }

    fn close(mut self, footer: &IndexFooter<'_>) -> Result<W, WriterError> {
        self.writer.append_key_value_metadata(KeyValue {
            key: KEY_DATA_ROW_GROUPS.to_string(),
            value: Some(footer.data_row_groups.to_string()),
        });
        Ok(self.writer.into_inner()?)
    }
}

/// Row group under construction; columns are converted to Arrow as they arrive
/// and handed to Parquet as one record batch on close
pub struct ParquetRowGroupWriter<'a, W: Write + Send> {
    writer: &'a mut ArrowWriter<W>,
    row_schema: &'a RowSchema,
    arrow_schema: SchemaRef,
    row_count: usize,
    columns: Vec<ArrayRef>,
}

impl<W: Write + Send> RowGroupWriter for ParquetRowGroupWriter<'_, W> {
    fn write_column(
        &mut self,
        field: &FieldDescriptor,
        values: ColumnBuffer,
    ) -> Result<(), WriterError> {
        check_column(
            self.row_schema,
            self.columns.len(),
            field,
            &values,
            self.row_count,
        )?;
        self.columns.push(values.into_array());
        Ok(())
    }

    fn close(self) -> Result<(), WriterError> {
        if self.columns.len() != self.row_schema.len() {
            return Err(WriterError::IncompleteRowGroup {
                written: self.columns.len(),
                expected: self.row_schema.len(),
            });
        }

        let batch = RecordBatch::try_new(self.arrow_schema, self.columns)?;
        self.writer.write(&batch)?;
        // Close the Parquet row group here so the next key starts a new one
        self.writer.flush()?;
        Ok(())
    }
}
