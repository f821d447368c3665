use std::cmp::Ordering;
use std::fmt;

use arrow::datatypes::{DataType, TimeUnit};
use serde::{Deserialize, Serialize};

use super::error::SchemaError;

/// Logical column types supported by the keyed writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Boolean flag
    Boolean,
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// 32-bit IEEE float
    Float32,
    /// 64-bit IEEE float
    Float64,
    /// UTF-8 string
    Utf8,
    /// Opaque byte string
    Binary,
    /// Days since the UNIX epoch
    Date32,
    /// Microseconds since the UNIX epoch, no timezone
    TimestampMicros,
}

impl ValueType {
    /// Arrow data type used to store this column
    pub fn to_arrow(self) -> DataType {
        match self {
            Self::Boolean => DataType::Boolean,
            Self::Int8 => DataType::Int8,
            Self::Int16 => DataType::Int16,
            Self::Int32 => DataType::Int32,
            Self::Int64 => DataType::Int64,
            Self::Float32 => DataType::Float32,
            Self::Float64 => DataType::Float64,
            Self::Utf8 => DataType::Utf8,
            Self::Binary => DataType::Binary,
            Self::Date32 => DataType::Date32,
            Self::TimestampMicros => DataType::Timestamp(TimeUnit::Microsecond, None),
        }
    }

    /// Inverse of [`ValueType::to_arrow`]; `None` for Arrow types we do not write
    pub fn from_arrow(data_type: &DataType) -> Option<Self> {
        let value_type = match data_type {
            DataType::Boolean => Self::Boolean,
            DataType::Int8 => Self::Int8,
            DataType::Int16 => Self::Int16,
            DataType::Int32 => Self::Int32,
            DataType::Int64 => Self::Int64,
            DataType::Float32 => Self::Float32,
            DataType::Float64 => Self::Float64,
            DataType::Utf8 => Self::Utf8,
            DataType::Binary => Self::Binary,
            DataType::Date32 => Self::Date32,
            DataType::Timestamp(TimeUnit::Microsecond, None) => Self::TimestampMicros,
            _ => return None,
        };
        Some(value_type)
    }

    /// Placeholder written into non-key columns of index rows
    pub fn default_value(self) -> Value {
        match self {
            Self::Boolean => Value::Boolean(false),
            Self::Int8 => Value::Int8(0),
            Self::Int16 => Value::Int16(0),
            Self::Int32 => Value::Int32(0),
            Self::Int64 => Value::Int64(0),
            Self::Float32 => Value::Float32(0.0),
            Self::Float64 => Value::Float64(0.0),
            Self::Utf8 => Value::Utf8(String::new()),
            Self::Binary => Value::Binary(Vec::new()),
            Self::Date32 => Value::Date32(0),
            Self::TimestampMicros => Value::TimestampMicros(0),
        }
    }

    /// Parse a textual cell into a value of this type.
    ///
    /// Binary cells are hex encoded. `Date32` and `TimestampMicros` take their raw
    /// integer representation.
    pub fn parse_value(self, text: &str) -> Result<Value, SchemaError> {
        let invalid = || SchemaError::ParseValue {
            value_type: self,
            text: text.to_string(),
        };
        let trimmed = text.trim();

        let value = match self {
            Self::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" => Value::Boolean(true),
                "false" | "0" => Value::Boolean(false),
                _ => return Err(invalid()),
            },
            Self::Int8 => Value::Int8(trimmed.parse().map_err(|_| invalid())?),
            Self::Int16 => Value::Int16(trimmed.parse().map_err(|_| invalid())?),
            Self::Int32 => Value::Int32(trimmed.parse().map_err(|_| invalid())?),
            Self::Int64 => Value::Int64(trimmed.parse().map_err(|_| invalid())?),
            Self::Float32 => Value::Float32(trimmed.parse().map_err(|_| invalid())?),
            Self::Float64 => Value::Float64(trimmed.parse().map_err(|_| invalid())?),
            Self::Utf8 => Value::Utf8(text.to_string()),
            Self::Binary => {
                let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
                Value::Binary(hex::decode(digits).map_err(|_| invalid())?)
            }
            Self::Date32 => Value::Date32(trimmed.parse().map_err(|_| invalid())?),
            Self::TimestampMicros => {
                Value::TimestampMicros(trimmed.parse().map_err(|_| invalid())?)
            }
        };
        Ok(value)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Utf8 => "utf8",
            Self::Binary => "binary",
            Self::Date32 => "date32",
            Self::TimestampMicros => "timestamp_micros",
        };
        f.write_str(name)
    }
}

/// A single typed cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Missing value (only valid in nullable fields)
    Null,
    /// Boolean value
    Boolean(bool),
    /// 8-bit integer
    Int8(i8),
    /// 16-bit integer
    Int16(i16),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
    /// UTF-8 string
    Utf8(String),
    /// Byte string
    Binary(Vec<u8>),
    /// Days since epoch
    Date32(i32),
    /// Microseconds since epoch
    TimestampMicros(i64),
}

impl Value {
    /// Type of this value, `None` for `Null`
    pub fn value_type(&self) -> Option<ValueType> {
        let value_type = match self {
            Self::Null => return None,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Int8(_) => ValueType::Int8,
            Self::Int16(_) => ValueType::Int16,
            Self::Int32(_) => ValueType::Int32,
            Self::Int64(_) => ValueType::Int64,
            Self::Float32(_) => ValueType::Float32,
            Self::Float64(_) => ValueType::Float64,
            Self::Utf8(_) => ValueType::Utf8,
            Self::Binary(_) => ValueType::Binary,
            Self::Date32(_) => ValueType::Date32,
            Self::TimestampMicros(_) => ValueType::TimestampMicros,
        };
        Some(value_type)
    }

    /// Returns true for `Value::Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Key equality used to detect row group boundaries.
    ///
    /// Floats are equal when their bit patterns are equal, which is the equality
    /// induced by `total_cmp`: a run of NaN keys stays in one row group, while
    /// `0.0` and `-0.0` are distinct keys.
    pub fn key_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Float32(a), Self::Float32(b)) => a.to_bits() == b.to_bits(),
            (Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }

    /// Total order between two values of the same type, `Null` sorting first.
    ///
    /// Returns `None` when the values have different types.
    pub fn key_cmp(&self, other: &Value) -> Option<Ordering> {
        let ordering = match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Int8(a), Self::Int8(b)) => a.cmp(b),
            (Self::Int16(a), Self::Int16(b)) => a.cmp(b),
            (Self::Int32(a), Self::Int32(b)) => a.cmp(b),
            (Self::Int64(a), Self::Int64(b)) => a.cmp(b),
            (Self::Float32(a), Self::Float32(b)) => a.total_cmp(b),
            (Self::Float64(a), Self::Float64(b)) => a.total_cmp(b),
            (Self::Utf8(a), Self::Utf8(b)) => a.cmp(b),
            (Self::Binary(a), Self::Binary(b)) => a.cmp(b),
            (Self::Date32(a), Self::Date32(b)) => a.cmp(b),
            (Self::TimestampMicros(a), Self::TimestampMicros(b)) => a.cmp(b),
            _ => return None,
        };
        Some(ordering)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Int8(v) => write!(f, "{}", v),
            Self::Int16(v) => write!(f, "{}", v),
            Self::Int32(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::Float32(v) => write!(f, "{}", v),
            Self::Float64(v) => write!(f, "{}", v),
            Self::Utf8(v) => write!(f, "{:?}", v),
            Self::Binary(v) => f.write_str(&hex::encode(v)),
            Self::Date32(v) => write!(f, "date32({})", v),
            Self::TimestampMicros(v) => write!(f, "ts_us({})", v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Utf8(v)
    }
}
