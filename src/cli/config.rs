//! TOML configuration file for the convert command.
//!
//! The config file describes the row schema of the CSV input and, optionally,
//! writer settings:
//!
//! ```toml
//! # events.toml
//! [[fields]]
//! name = "user_id"
//! type = "int64"
//!
//! [[fields]]
//! name = "score"
//! type = "float64"
//! nullable = true
//!
//! [[fields]]
//! name = "country"
//! type = "utf8"
//! default = "unknown"
//!
//! [writer]
//! compression = "zstd"
//! compression_level = 9
//! strict_key_order = true
//! ```

use anyhow::{Context, Result};
use keyed_parquet::schema::{FieldDescriptor, RowSchema, ValueType};
use keyed_parquet::writer::{CompressionType, KeyOrder, WriterConfig};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Row schema, key column first. Empty means "all header columns as utf8".
    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    /// Writer settings.
    #[serde(default)]
    pub writer: WriterSection,
}

/// One `[[fields]]` entry.
#[derive(Debug, Deserialize)]
pub struct FieldConfig {
    /// Column name; must match the CSV header.
    pub name: String,

    /// Logical type, e.g. `int64`, `utf8`, `timestamp_micros`.
    #[serde(rename = "type")]
    pub value_type: ValueType,

    /// Whether empty cells are stored as null.
    #[serde(default)]
    pub nullable: bool,

    /// Default written into the index row group, as text.
    pub default: Option<String>,
}

/// Compression codec names accepted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// GZIP
    Gzip,
    /// ZSTD
    Zstd,
    /// Snappy
    Snappy,
    /// No compression
    #[serde(alias = "uncompressed")]
    None,
}

/// The `[writer]` table.
#[derive(Debug, Default, Deserialize)]
pub struct WriterSection {
    /// Compression codec.
    pub compression: Option<Codec>,

    /// Level for gzip or zstd.
    pub compression_level: Option<i32>,

    /// Reject rows that go backwards in key order.
    pub strict_key_order: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Row schema described by `[[fields]]`, or `None` if there are no fields.
    pub fn row_schema(&self) -> Result<Option<RowSchema>> {
        if self.fields.is_empty() {
            return Ok(None);
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let mut descriptor = if field.nullable {
                FieldDescriptor::nullable(field.name.as_str(), field.value_type)
            } else {
                FieldDescriptor::new(field.name.as_str(), field.value_type)
            };
            if let Some(text) = &field.default {
                let value = field
                    .value_type
                    .parse_value(text)
                    .with_context(|| format!("Invalid default for field '{}'", field.name))?;
                descriptor = descriptor
                    .with_default(value)
                    .with_context(|| format!("Invalid default for field '{}'", field.name))?;
            }
            fields.push(descriptor);
        }

        let schema = RowSchema::new(fields).context("Invalid row schema in config")?;
        Ok(Some(schema))
    }

    /// Apply `[writer]` settings and command-line overrides on top of `base`.
    pub fn writer_config(
        &self,
        base: WriterConfig,
        level_override: Option<i32>,
        strict: bool,
    ) -> WriterConfig {
        let mut config = base;
        let level = level_override.or(self.writer.compression_level);

        config.compression = match (self.writer.compression, level) {
            (Some(Codec::Gzip), level) => CompressionType::Gzip(gzip_level(level)),
            (Some(Codec::Zstd), level) => CompressionType::Zstd(level.unwrap_or(3)),
            (Some(Codec::Snappy), _) => CompressionType::Snappy,
            (Some(Codec::None), _) => CompressionType::Uncompressed,
            (None, Some(level)) => match config.compression {
                CompressionType::Gzip(_) => CompressionType::Gzip(gzip_level(Some(level))),
                CompressionType::Zstd(_) => CompressionType::Zstd(level),
                other => other,
            },
            (None, None) => config.compression,
        };

        if strict || self.writer.strict_key_order == Some(true) {
            config.key_order = KeyOrder::StrictAscending;
        }
        config
    }
}

fn gzip_level(level: Option<i32>) -> u32 {
    level.and_then(|l| u32::try_from(l).ok()).unwrap_or(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyed_parquet::schema::Value;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [[fields]]
            name = "user_id"
            type = "int64"

            [[fields]]
            name = "score"
            type = "float64"
            nullable = true

            [[fields]]
            name = "country"
            type = "utf8"
            default = "unknown"

            [writer]
            compression = "zstd"
            compression_level = 9
            strict_key_order = true
        "#;

        let config = Config::from_str(toml).unwrap();
        let schema = config.row_schema().unwrap().unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.key_field().name, "user_id");
        assert_eq!(schema.fields()[0].default, Value::Int64(0));
        assert_eq!(schema.fields()[1].default, Value::Null);
        assert_eq!(schema.fields()[2].default, Value::from("unknown"));

        let writer = config.writer_config(WriterConfig::default(), None, false);
        assert_eq!(writer.compression, CompressionType::Zstd(9));
        assert_eq!(writer.key_order, KeyOrder::StrictAscending);
    }

    #[test]
    fn test_cli_level_overrides_config() {
        let toml = r#"
            [writer]
            compression = "gzip"
            compression_level = 4
        "#;

        let config = Config::from_str(toml).unwrap();
        let writer = config.writer_config(WriterConfig::default(), Some(9), false);
        assert_eq!(writer.compression, CompressionType::Gzip(9));
        assert_eq!(writer.key_order, KeyOrder::Unchecked);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert!(config.row_schema().unwrap().is_none());

        let writer = config.writer_config(WriterConfig::fast_write(), Some(5), true);
        assert_eq!(writer.compression, CompressionType::Snappy);
        assert_eq!(writer.key_order, KeyOrder::StrictAscending);
    }

    #[test]
    fn test_bad_default_rejected() {
        let toml = r#"
            [[fields]]
            name = "id"
            type = "int32"
            default = "not a number"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert!(config.row_schema().is_err());
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let toml = r#"
            [[fields]]
            name = "id"
            type = "int32"

            [[fields]]
            name = "id"
            type = "utf8"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert!(config.row_schema().is_err());
    }
}
