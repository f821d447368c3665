use std::collections::HashMap;

use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;

/// Compression options for keyed files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// GZIP compression (default, general purpose)
    Gzip(u32),
    /// ZSTD compression (best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Gzip(6)
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// Balanced compression (recommended default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Snappy
    }

    pub(crate) fn to_parquet(self) -> Compression {
        match self {
            Self::Gzip(level) => {
                Compression::GZIP(GzipLevel::try_new(level).unwrap_or(GzipLevel::default()))
            }
            Self::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or(ZstdLevel::default()))
            }
            Self::Snappy => Compression::SNAPPY,
            Self::Uncompressed => Compression::UNCOMPRESSED,
        }
    }
}

/// How the writer treats the order of key values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyOrder {
    /// Accept any order; unsorted input only produces more, smaller row groups
    #[default]
    Unchecked,
    /// Reject a row whose key sorts before the previous key
    StrictAscending,
}

/// Configuration for the keyed writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,

    /// Enable dictionary encoding
    pub dictionary_enabled: bool,

    /// Dictionary page size limit in bytes
    pub dictionary_page_size_limit: usize,

    /// Key order policy
    pub key_order: KeyOrder,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            // 1MB data pages
            data_page_size: 1024 * 1024,
            write_statistics: true,
            dictionary_enabled: true,
            dictionary_page_size_limit: 1024 * 1024,
            key_order: KeyOrder::Unchecked,
        }
    }
}

impl WriterConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::max_compression(),
            data_page_size: 2 * 1024 * 1024,
            dictionary_page_size_limit: 2 * 1024 * 1024,
            ..Self::default()
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::fast(),
            data_page_size: 512 * 1024,
            dictionary_page_size_limit: 512 * 1024,
            ..Self::default()
        }
    }

    /// Balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Same configuration with strict ascending key order
    pub fn strict(mut self) -> Self {
        self.key_order = KeyOrder::StrictAscending;
        self
    }

    /// Create writer properties from this configuration
    pub(crate) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        // Row groups are cut by key changes only, never by size
        let builder = WriterProperties::builder()
            .set_compression(self.compression.to_parquet())
            .set_data_page_size_limit(self.data_page_size)
            .set_dictionary_enabled(self.dictionary_enabled)
            .set_dictionary_page_size_limit(self.dictionary_page_size_limit)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(usize::MAX);

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder.set_key_value_metadata(Some(kv_metadata)).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_gzip_unchecked() {
        let config = WriterConfig::default();
        assert_eq!(config.compression, CompressionType::Gzip(6));
        assert_eq!(config.key_order, KeyOrder::Unchecked);
        assert_eq!(config.strict().key_order, KeyOrder::StrictAscending);
    }

    #[test]
    fn test_writer_properties() {
        let mut metadata = HashMap::new();
        metadata.insert("keyed:key_column".to_string(), "id".to_string());

        let props = WriterConfig::fast_write().to_writer_properties(&metadata);
        assert_eq!(props.max_row_group_size(), usize::MAX);
        assert_eq!(props.data_page_size_limit(), 512 * 1024);

        let kv = props.key_value_metadata().unwrap();
        assert_eq!(kv.len(), 1);
        assert_eq!(kv[0].key, "keyed:key_column");
        assert_eq!(kv[0].value.as_deref(), Some("id"));
    }

    #[test]
    fn test_invalid_level_falls_back_to_default() {
        let compression = CompressionType::Zstd(99).to_parquet();
        assert_eq!(compression, Compression::ZSTD(ZstdLevel::default()));
    }
}
