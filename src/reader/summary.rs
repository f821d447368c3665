use std::cmp::Ordering;
use std::fmt;

use crate::schema::Value;

use super::{KeyedReader, ReaderError};

/// Summary statistics about a keyed file
#[derive(Debug, Clone)]
pub struct FileSummary {
    /// Format version (`None` without a keyed footer)
    pub format_version: Option<String>,
    /// Key column name
    pub key_column: String,
    /// Number of fields per row
    pub num_fields: usize,
    /// Rows across all data row groups
    pub data_rows: i64,
    /// Number of data row groups
    pub data_row_groups: usize,
    /// Number of distinct keys in the index
    pub distinct_keys: usize,
    /// Keys spread over more than one row group (unsorted input)
    pub fragmented_keys: usize,
    /// Smallest and largest key
    pub key_range: Option<(Value, Value)>,
}

impl KeyedReader {
    /// Get summary statistics about the file, computed from the footer and index
    pub fn summary(&self) -> Result<FileSummary, ReaderError> {
        let mut keys: Vec<Value> = self.index()?.into_iter().map(|entry| entry.key).collect();
        keys.sort_by(|a, b| a.key_cmp(b).unwrap_or(Ordering::Equal));

        let mut distinct_keys = 0;
        let mut fragmented_keys = 0;
        let mut run = 0;
        for (i, key) in keys.iter().enumerate() {
            if i > 0 && keys[i - 1].key_eq(key) {
                run += 1;
                if run == 1 {
                    fragmented_keys += 1;
                }
            } else {
                distinct_keys += 1;
                run = 0;
            }
        }

        let key_range = match (keys.first(), keys.last()) {
            (Some(min), Some(max)) => Some((min.clone(), max.clone())),
            _ => None,
        };

        let metadata = &self.file_metadata;
        Ok(FileSummary {
            format_version: metadata.format_version.clone(),
            key_column: metadata.key_column.clone(),
            num_fields: metadata.row_schema.len(),
            data_rows: metadata.data_rows,
            data_row_groups: metadata.data_row_groups,
            distinct_keys,
            fragmented_keys,
            key_range,
        })
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Keyed File Summary")?;
        writeln!(f, "==================")?;
        match &self.format_version {
            Some(version) => writeln!(f, "Format version: {}", version)?,
            None => writeln!(f, "Format version: none (plain Parquet)")?,
        }
        writeln!(f, "Key column: {}", self.key_column)?;
        writeln!(f, "Fields: {}", self.num_fields)?;
        writeln!(f, "Data rows: {}", self.data_rows)?;
        writeln!(f, "Data row groups: {}", self.data_row_groups)?;
        writeln!(f, "Distinct keys: {}", self.distinct_keys)?;
        if self.fragmented_keys > 0 {
            writeln!(
                f,
                "  Fragmented keys: {} (input was not sorted)",
                self.fragmented_keys
            )?;
        }
        if let Some((min, max)) = &self.key_range {
            writeln!(f, "Key range: {} - {}", min, max)?;
        }
        Ok(())
    }
}
