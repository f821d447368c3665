use super::ValueType;

/// Errors raised while deriving a schema or checking values against it
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A schema needs at least the key field
    #[error("Schema has no fields")]
    EmptySchema,

    /// Two fields share a name
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// A value does not match the declared field type
    #[error("Type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the offending field
        field: String,
        /// Declared type
        expected: ValueType,
        /// Type of the supplied value
        found: ValueType,
    },

    /// Null supplied for a non-nullable field
    #[error("Field '{0}' is not nullable")]
    NullNotAllowed(String),

    /// NaN or infinite float used as an index-row default
    #[error("Default for field '{0}' must be a finite number")]
    NonFiniteDefault(String),

    /// Row arity differs from the schema
    #[error("Row has {found} values, schema has {expected} fields")]
    ArityMismatch {
        /// Number of fields in the schema
        expected: usize,
        /// Number of values in the row
        found: usize,
    },

    /// Text could not be parsed as the requested type
    #[error("Cannot parse {text:?} as {value_type}")]
    ParseValue {
        /// Target type
        value_type: ValueType,
        /// Offending text
        text: String,
    },

    /// Arrow column type that has no [`ValueType`] counterpart
    #[error("Unsupported Arrow type for column '{column}': {data_type}")]
    UnsupportedArrowType {
        /// Column name
        column: String,
        /// Arrow type rendered as text
        data_type: String,
    },
}
