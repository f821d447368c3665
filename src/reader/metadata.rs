use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arrow::datatypes::Schema;
use parquet::file::reader::{ChunkReader, FileReader, SerializedFileReader};

use crate::schema::{
    RowSchema, KEY_DATA_ROW_GROUPS, KEY_FORMAT_VERSION, KEY_KEY_COLUMN, KEY_ROW_SCHEMA,
};

use super::{KeyedReader, ReaderError};

/// Metadata extracted from a keyed file footer
#[derive(Debug, Clone)]
pub struct KeyedFileMetadata {
    /// Format version string (`None` for files without the keyed footer)
    pub format_version: Option<String>,
    /// Name of the key column
    pub key_column: String,
    /// Row schema, including the defaults used in the index row group
    pub row_schema: Arc<RowSchema>,
    /// Arrow schema of the Parquet file
    pub arrow_schema: Arc<Schema>,
    /// Physical row groups, index included
    pub num_row_groups: usize,
    /// Data row groups; the index row group is the one right after them
    pub data_row_groups: usize,
    /// Rows across all data row groups
    pub data_rows: i64,
    /// Rows in the index row group
    pub index_rows: i64,
    /// Raw key-value metadata from Parquet footer
    pub key_value_metadata: HashMap<String, String>,
}

impl KeyedFileMetadata {
    /// Position of the index row group
    pub fn index_row_group(&self) -> usize {
        self.data_row_groups
    }

    /// Whether the file carries the keyed footer entries
    pub fn has_keyed_footer(&self) -> bool {
        self.key_value_metadata.contains_key(KEY_DATA_ROW_GROUPS)
    }
}

impl fmt::Display for KeyedFileMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} data row groups + index ({} rows), key column '{}'",
            self.data_row_groups, self.data_rows, self.key_column
        )
    }
}

impl KeyedReader {
    /// Extract metadata from a Parquet reader
    pub(super) fn extract_file_metadata<R: ChunkReader + 'static>(
        reader: &SerializedFileReader<R>,
    ) -> Result<KeyedFileMetadata, ReaderError> {
        let parquet_metadata = reader.metadata();
        let file_meta = parquet_metadata.file_metadata();
        let arrow_schema = parquet::arrow::parquet_to_arrow_schema(
            file_meta.schema_descr(),
            file_meta.key_value_metadata(),
        )?;

        let mut kv_metadata = HashMap::new();
        if let Some(kv_list) = file_meta.key_value_metadata() {
            for kv in kv_list {
                if let Some(value) = &kv.value {
                    kv_metadata.insert(kv.key.clone(), value.clone());
                }
            }
        }

        let num_row_groups = parquet_metadata.num_row_groups();
        if num_row_groups == 0 {
            return Err(ReaderError::InvalidFormat(
                "file has no row groups, so no index row group".to_string(),
            ));
        }

        let row_schema = match kv_metadata.get(KEY_ROW_SCHEMA) {
            Some(json) => serde_json::from_str::<RowSchema>(json)?,
            None => RowSchema::from_arrow(&arrow_schema)?,
        };
        if row_schema.len() != arrow_schema.fields().len() {
            return Err(ReaderError::InvalidFormat(format!(
                "row schema has {} fields but the file has {} columns",
                row_schema.len(),
                arrow_schema.fields().len()
            )));
        }

        let key_column = match kv_metadata.get(KEY_KEY_COLUMN) {
            Some(name) if *name != row_schema.key_field().name => {
                return Err(ReaderError::InvalidFormat(format!(
                    "footer key column '{}' is not the first field '{}'",
                    name,
                    row_schema.key_field().name
                )));
            }
            Some(name) => name.clone(),
            None => row_schema.key_field().name.clone(),
        };

        let data_row_groups = match kv_metadata.get(KEY_DATA_ROW_GROUPS) {
            Some(text) => {
                let count: usize = text.parse().map_err(|_| {
                    ReaderError::InvalidFormat(format!(
                        "{} is not a row group count: {:?}",
                        KEY_DATA_ROW_GROUPS, text
                    ))
                })?;
                if count != num_row_groups - 1 {
                    return Err(ReaderError::InvalidFormat(format!(
                        "footer records {} data row groups but the file has {} row groups",
                        count, num_row_groups
                    )));
                }
                count
            }
            None => num_row_groups - 1,
        };

        let data_rows: i64 = (0..data_row_groups)
            .map(|i| parquet_metadata.row_group(i).num_rows())
            .sum();
        let index_rows = parquet_metadata.row_group(data_row_groups).num_rows();

        Ok(KeyedFileMetadata {
            format_version: kv_metadata.get(KEY_FORMAT_VERSION).cloned(),
            key_column,
            row_schema: Arc::new(row_schema),
            arrow_schema: Arc::new(arrow_schema),
            num_row_groups,
            data_row_groups,
            data_rows,
            index_rows,
            key_value_metadata: kv_metadata,
        })
    }

    /// Get file metadata
    pub fn metadata(&self) -> &KeyedFileMetadata {
        &self.file_metadata
    }

    /// Row schema stored in (or derived from) the file
    pub fn row_schema(&self) -> Arc<RowSchema> {
        Arc::clone(&self.file_metadata.row_schema)
    }

    /// Number of data row groups
    pub fn data_row_groups(&self) -> usize {
        self.file_metadata.data_row_groups
    }
}
