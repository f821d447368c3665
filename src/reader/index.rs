use log::debug;

use crate::schema::{values_of, Value};

use super::batches::batch_rows;
use super::{KeyedReader, ReaderError};

/// One row of the index row group
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Key shared by every row of the data row group
    pub key: Value,
    /// Position of the data row group
    pub row_group: usize,
}

impl KeyedReader {
    /// Read the index row group
    ///
    /// Only the trailing row group is decoded. Entry `i` describes data row group `i`.
    pub fn index(&self) -> Result<Vec<IndexEntry>, ReaderError> {
        let index_row_group = self.file_metadata.index_row_group();
        let mut entries = Vec::with_capacity(self.file_metadata.data_row_groups);

        for batch in self.physical_row_groups(vec![index_row_group])? {
            let batch = batch?;
            for key in values_of(batch.column(0).as_ref())? {
                entries.push(IndexEntry {
                    key,
                    row_group: entries.len(),
                });
            }
        }

        if entries.len() != self.file_metadata.data_row_groups {
            return Err(ReaderError::InvalidFormat(format!(
                "index row group has {} entries for {} data row groups",
                entries.len(),
                self.file_metadata.data_row_groups
            )));
        }
        Ok(entries)
    }

    /// Data row groups whose key equals `key`
    ///
    /// More than one row group matches when the input was not sorted by key.
    pub fn row_groups_for_key(&self, key: &Value) -> Result<Vec<usize>, ReaderError> {
        Ok(self
            .index()?
            .into_iter()
            .filter(|entry| entry.key.key_eq(key))
            .map(|entry| entry.row_group)
            .collect())
    }

    /// All rows with the given key, read from the matching row groups only
    pub fn lookup(&self, key: &Value) -> Result<Vec<Vec<Value>>, ReaderError> {
        let row_groups = self.row_groups_for_key(key)?;
        debug!("Key {} found in row groups {:?}", key, row_groups);
        if row_groups.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();
        for batch in self.physical_row_groups(row_groups)? {
            rows.extend(batch_rows(&batch?)?);
        }
        Ok(rows)
    }
}
