use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::schema::{Row, RowSchema, Value};

use super::buffers::{ColumnBuffer, KeyIndex, RowGroupBuffers};
use super::config::{KeyOrder, WriterConfig};
use super::error::WriterError;
use super::parquet_sink::ParquetFileWriter;
use super::sink::{ColumnarFileWriter, IndexFooter, RowGroupWriter};
use super::stats::WriterStats;

/// Keyed writer producing a Parquet file
pub type KeyedParquetWriter<W> = SegmentedColumnWriter<ParquetFileWriter<W>>;

/// Streaming writer that opens a new row group whenever the key (field 0) changes.
///
/// The underlying file writer is created lazily from the first row's schema. On
/// [`finish`](Self::finish) the pending row group is flushed, followed by the index
/// row group: one row per data row group holding that row group's key, with every
/// other column set to its schema default.
///
/// Rows must arrive sorted by key for the output to be clustered. Unsorted input is
/// accepted (unless [`KeyOrder::StrictAscending`] is configured) and only yields more,
/// smaller row groups.
pub struct SegmentedColumnWriter<F: ColumnarFileWriter> {
    config: WriterConfig,
    destination: Option<F::Destination>,
    active: Option<ActiveFile<F>>,
    poisoned: bool,
}

impl SegmentedColumnWriter<ParquetFileWriter<File>> {
    /// Create a new writer to a file path
    ///
    /// The file is created immediately; it stays empty if no row is ever added.
    pub fn new_file<P: AsRef<Path>>(path: P, config: WriterConfig) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Ok(Self::new(file, config))
    }
}

impl<F: ColumnarFileWriter> SegmentedColumnWriter<F> {
    /// Create a writer that will emit into `destination` once the first row arrives
    pub fn new(destination: F::Destination, config: WriterConfig) -> Self {
        Self {
            config,
            destination: Some(destination),
            active: None,
            poisoned: false,
        }
    }

    /// Schema fixed by the first row, if any row has been added
    pub fn schema(&self) -> Option<&Arc<RowSchema>> {
        self.active.as_ref().map(|active| &active.schema)
    }

    /// Add one row.
    ///
    /// Rows that do not match the stream schema, or that break strict key order, are
    /// rejected without touching any buffered state. A failure while flushing a row
    /// group leaves the writer poisoned.
    pub fn add(&mut self, row: &Row) -> Result<(), WriterError> {
        if self.poisoned {
            return Err(WriterError::Poisoned);
        }

        if let Some(active) = self.active.as_mut() {
            active.check_row(row, self.config.key_order)?;
            let result = active.push(row);
            if result.is_err() {
                self.poisoned = true;
            }
            return result;
        }

        // The destination is consumed even if creating the file fails
        let destination = self.destination.take().ok_or(WriterError::Poisoned)?;
        self.active = Some(ActiveFile::start(row, destination, &self.config)?);
        Ok(())
    }

    /// Current statistics; `index_rows` stays 0 until the file is finished
    pub fn stats(&self) -> WriterStats {
        self.active
            .as_ref()
            .map(|active| WriterStats {
                rows_written: active.rows_written,
                data_row_groups: active.index.len(),
                index_rows: 0,
            })
            .unwrap_or_default()
    }

    /// Flush the pending row group and the index row group, then close the file
    pub fn finish(self) -> Result<WriterStats, WriterError> {
        self.finalize().map(|(_, stats)| stats)
    }

    /// Like [`finish`](Self::finish), returning the destination.
    ///
    /// If no row was ever added the destination comes back exactly as it was given.
    pub fn finish_into_inner(self) -> Result<F::Destination, WriterError> {
        self.finalize().map(|(destination, _)| destination)
    }

    fn finalize(self) -> Result<(F::Destination, WriterStats), WriterError> {
        if self.poisoned {
            return Err(WriterError::Poisoned);
        }

        match (self.active, self.destination) {
            (Some(active), _) => active.finish(),
            (None, Some(destination)) => {
                debug!("No rows added; nothing written");
                Ok((destination, WriterStats::default()))
            }
            (None, None) => Err(WriterError::Poisoned),
        }
    }
}

/// State of a writer that has seen at least one row
struct ActiveFile<F: ColumnarFileWriter> {
    writer: F,
    schema: Arc<RowSchema>,
    current: RowGroupBuffers,
    index: KeyIndex,
    last_key: Value,
    rows_written: usize,
    flushed_row_groups: usize,
    warned_unsorted: bool,
}

impl<F: ColumnarFileWriter> ActiveFile<F> {
    fn start(
        row: &Row,
        destination: F::Destination,
        config: &WriterConfig,
    ) -> Result<Self, WriterError> {
        let schema = row.schema().clone();

        let writer = F::create(&schema, destination, config)?;
        debug!(
            "Created keyed file with {} fields, key column '{}'",
            schema.len(),
            schema.key_field().name
        );

        let mut index = KeyIndex::new(schema.key_field().value_type);
        index.record(row.key())?;

        let mut current = RowGroupBuffers::new(&schema);
        current.push_row(row.values())?;

        Ok(Self {
            writer,
            last_key: row.key().clone(),
            schema,
            current,
            index,
            rows_written: 1,
            flushed_row_groups: 0,
            warned_unsorted: false,
        })
    }

    fn check_row(&self, row: &Row, key_order: KeyOrder) -> Result<(), WriterError> {
        if row.field_count() != self.schema.len() {
            return Err(WriterError::FieldCountMismatch {
                expected: self.schema.len(),
                found: row.field_count(),
            });
        }
        self.schema.check_values(row.values())?;

        if key_order == KeyOrder::StrictAscending
            && !self.last_key.key_eq(row.key())
            && self.last_key.key_cmp(row.key()) != Some(Ordering::Less)
        {
            return Err(WriterError::UnsortedKey {
                previous: self.last_key.to_string(),
                next: row.key().to_string(),
            });
        }
        Ok(())
    }

    fn push(&mut self, row: &Row) -> Result<(), WriterError> {
        let key = row.key();
        if !self.last_key.key_eq(key) {
            if !self.warned_unsorted && self.last_key.key_cmp(key) == Some(Ordering::Greater) {
                warn!(
                    "Key {} follows {}: input is not sorted by '{}', row groups will be fragmented",
                    key,
                    self.last_key,
                    self.schema.key_field().name
                );
                self.warned_unsorted = true;
            }

            self.flush_current()?;
            self.last_key = key.clone();
            self.index.record(key)?;
        }

        self.current.push_row(row.values())?;
        self.rows_written += 1;
        Ok(())
    }

    fn flush_current(&mut self) -> Result<(), WriterError> {
        if self.current.is_empty() {
            return Ok(());
        }

        let row_count = self.current.row_count();
        let columns = self.current.take();
        write_row_group(&mut self.writer, &self.schema, row_count, columns)?;

        debug!(
            "Flushed row group {} (key {}, {} rows)",
            self.flushed_row_groups, self.last_key, row_count
        );
        self.flushed_row_groups += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<(F::Destination, WriterStats), WriterError> {
        self.flush_current()?;

        let index_rows = self.index.len();
        debug_assert_eq!(index_rows, self.flushed_row_groups);
        let columns = self.index.into_columns(&self.schema)?;
        write_row_group(&mut self.writer, &self.schema, index_rows, columns)?;

        let footer = IndexFooter {
            key_column: &self.schema.key_field().name,
            data_row_groups: self.flushed_row_groups,
        };
        let destination = self.writer.close(&footer)?;

        let stats = WriterStats {
            rows_written: self.rows_written,
            data_row_groups: self.flushed_row_groups,
            index_rows,
        };
        info!("{}", stats);
        Ok((destination, stats))
    }
}

/// Write one row group, column by column in schema order.
///
/// On error the row group writer is dropped before the error propagates, so the
/// file writer is never left holding a half-open row group.
fn write_row_group<F: ColumnarFileWriter>(
    writer: &mut F,
    schema: &RowSchema,
    row_count: usize,
    columns: Vec<ColumnBuffer>,
) -> Result<(), WriterError> {
    let mut row_group = writer.begin_row_group(row_count)?;
    for (field, column) in schema.fields().iter().zip(columns) {
        row_group.write_column(field, column)?;
    }
    row_group.close()
}
