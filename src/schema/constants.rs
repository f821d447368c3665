/// Keyed file format version - follows semantic versioning
pub const KEYED_FORMAT_VERSION: &str = "1.0.0";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "keyed:format_version";

/// Metadata key naming the key column (field 0)
pub const KEY_KEY_COLUMN: &str = "keyed:key_column";

/// Metadata key for the JSON-serialized row schema, defaults included
pub const KEY_ROW_SCHEMA: &str = "keyed:row_schema";

/// Metadata key for the number of data row groups preceding the index row group
pub const KEY_DATA_ROW_GROUPS: &str = "keyed:data_row_groups";
