use std::fs::File;
use std::path::Path;

use bytes::Bytes;
use log::debug;
use parquet::file::reader::SerializedFileReader;

use super::config::ReaderSource;
use super::{KeyedReader, ReaderConfig, ReaderError};

impl KeyedReader {
    /// Open a keyed Parquet file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a keyed Parquet file with custom configuration
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let parquet_reader = SerializedFileReader::new(file)?;
        let file_metadata = Self::extract_file_metadata(&parquet_reader)?;
        debug!("Opened {}: {}", path.display(), file_metadata);

        Ok(Self {
            source: ReaderSource::FilePath(path),
            config,
            file_metadata,
        })
    }

    /// Read a keyed file held in memory
    pub fn from_bytes(bytes: Bytes) -> Result<Self, ReaderError> {
        Self::from_bytes_with_config(bytes, ReaderConfig::default())
    }

    /// Read a keyed file held in memory, with custom configuration
    pub fn from_bytes_with_config(bytes: Bytes, config: ReaderConfig) -> Result<Self, ReaderError> {
        let parquet_reader = SerializedFileReader::new(bytes.clone())?;
        let file_metadata = Self::extract_file_metadata(&parquet_reader)?;

        Ok(Self {
            source: ReaderSource::Bytes(bytes),
            config,
            file_metadata,
        })
    }
}
