use std::fmt;

/// Statistics from a keyed write operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of input rows written to data row groups
    pub rows_written: usize,
    /// Number of data row groups (one per run of equal keys)
    pub data_row_groups: usize,
    /// Number of rows in the trailing index row group (0 until finished)
    pub index_rows: usize,
}

impl WriterStats {
    /// Physical row groups in the file, index row group included
    pub fn total_row_groups(&self) -> usize {
        if self.index_rows > 0 {
            self.data_row_groups + 1
        } else {
            self.data_row_groups
        }
    }
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows in {} data row groups (+ index of {} rows)",
            self.rows_written, self.data_row_groups, self.index_rows
        )
    }
}
