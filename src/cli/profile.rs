//! Writer profiles for common use cases.
//!
//! Profiles pick a [`WriterConfig`] preset so users do not have to tune
//! Parquet settings by hand.

use std::fmt;

use keyed_parquet::writer::WriterConfig;

/// Writer profiles for common use cases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Snappy compression, smaller pages
    Fast,

    /// Gzip level 6 (default)
    #[default]
    Balanced,

    /// ZSTD level 22, larger pages
    MaxCompression,
}

impl Profile {
    /// Writer configuration preset for this profile
    pub fn writer_config(&self) -> WriterConfig {
        match self {
            Profile::Fast => WriterConfig::fast_write(),
            Profile::Balanced => WriterConfig::balanced(),
            Profile::MaxCompression => WriterConfig::max_compression(),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Fast => write!(f, "fast"),
            Profile::Balanced => write!(f, "balanced"),
            Profile::MaxCompression => write!(f, "max-compression"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyed_parquet::writer::CompressionType;

    #[test]
    fn test_profile_presets() {
        assert_eq!(Profile::default(), Profile::Balanced);
        assert_eq!(
            Profile::Balanced.writer_config().compression,
            CompressionType::Gzip(6)
        );
        assert_eq!(
            Profile::Fast.writer_config().compression,
            CompressionType::Snappy
        );
        assert_eq!(
            Profile::MaxCompression.writer_config().compression,
            CompressionType::Zstd(22)
        );
        assert_eq!(Profile::MaxCompression.to_string(), "max-compression");
    }
}
