use std::fs::File;

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};

use crate::schema::{values_of, Value};

use super::config::ReaderSource;
use super::{KeyedReader, ReaderError};

/// Streaming iterator over record batches
///
/// Batches are decoded on demand, so memory stays bounded by the batch size.
pub struct RecordBatchIterator {
    inner: ParquetRecordBatchReader,
}

impl Iterator for RecordBatchIterator {
    type Item = Result<RecordBatch, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.map_err(ReaderError::from))
    }
}

impl KeyedReader {
    /// Decode the given physical row groups, in order
    pub(super) fn physical_row_groups(
        &self,
        row_groups: Vec<usize>,
    ) -> Result<RecordBatchIterator, ReaderError> {
        let inner = match &self.source {
            ReaderSource::FilePath(path) => {
                let file = File::open(path)?;
                ParquetRecordBatchReaderBuilder::try_new(file)?
                    .with_row_groups(row_groups)
                    .with_batch_size(self.config.batch_size)
                    .build()?
            }
            ReaderSource::Bytes(bytes) => ParquetRecordBatchReaderBuilder::try_new(bytes.clone())?
                .with_row_groups(row_groups)
                .with_batch_size(self.config.batch_size)
                .build()?,
        };
        Ok(RecordBatchIterator { inner })
    }

    fn check_data_row_group(&self, row_group: usize) -> Result<(), ReaderError> {
        let data_row_groups = self.file_metadata.data_row_groups;
        if row_group >= data_row_groups {
            return Err(ReaderError::RowGroupOutOfRange {
                row_group,
                data_row_groups,
            });
        }
        Ok(())
    }

    /// Returns a streaming iterator over the data rows, index row group excluded
    ///
    /// # Example
    /// ```rust,no_run
    /// use keyed_parquet::reader::KeyedReader;
    ///
    /// let reader = KeyedReader::open("events.parquet")?;
    /// for batch_result in reader.iter_batches()? {
    ///     let batch = batch_result?;
    ///     println!("Processing batch with {} rows", batch.num_rows());
    /// }
    /// # Ok::<(), keyed_parquet::reader::ReaderError>(())
    /// ```
    pub fn iter_batches(&self) -> Result<RecordBatchIterator, ReaderError> {
        self.physical_row_groups((0..self.file_metadata.data_row_groups).collect())
    }

    /// Read one data row group as Arrow record batches
    pub fn read_row_group(&self, row_group: usize) -> Result<Vec<RecordBatch>, ReaderError> {
        self.check_data_row_group(row_group)?;
        self.physical_row_groups(vec![row_group])?.collect()
    }

    /// Read one data row group as rows of typed values
    pub fn row_group_rows(&self, row_group: usize) -> Result<Vec<Vec<Value>>, ReaderError> {
        let mut rows = Vec::new();
        for batch in self.read_row_group(row_group)? {
            rows.extend(batch_rows(&batch)?);
        }
        Ok(rows)
    }
}

/// Transpose a record batch into rows
pub(super) fn batch_rows(batch: &RecordBatch) -> Result<Vec<Vec<Value>>, ReaderError> {
    let mut rows: Vec<Vec<Value>> = (0..batch.num_rows())
        .map(|_| Vec::with_capacity(batch.num_columns()))
        .collect();
    for column in batch.columns() {
        for (row, value) in rows.iter_mut().zip(values_of(column.as_ref())?) {
            row.push(value);
        }
    }
    Ok(rows)
}
