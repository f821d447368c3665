use bytes::Bytes;

/// Configuration for reading keyed files
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Batch size for reading records
    pub batch_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { batch_size: 65536 }
    }
}

/// Where the file lives (kept so row groups can be re-opened on demand)
pub(super) enum ReaderSource {
    /// File on disk, re-opened for each read
    FilePath(std::path::PathBuf),
    /// Whole file held in memory
    Bytes(Bytes),
}
