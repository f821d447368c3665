use std::sync::Arc;

use arrow::array::{
    ArrayRef, BinaryArray, BooleanArray, Date32Array, Float32Array, Float64Array, Int16Array,
    Int32Array, Int64Array, Int8Array, StringArray, TimestampMicrosecondArray,
};

use crate::schema::{RowSchema, Value, ValueType};

use super::error::WriterError;

/// Typed, growable buffer holding one column of one row group
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnBuffer {
    /// Boolean column
    Boolean(Vec<Option<bool>>),
    /// Int8 column
    Int8(Vec<Option<i8>>),
    /// Int16 column
    Int16(Vec<Option<i16>>),
    /// Int32 column
    Int32(Vec<Option<i32>>),
    /// Int64 column
    Int64(Vec<Option<i64>>),
    /// Float32 column
    Float32(Vec<Option<f32>>),
    /// Float64 column
    Float64(Vec<Option<f64>>),
    /// UTF-8 column
    Utf8(Vec<Option<String>>),
    /// Binary column
    Binary(Vec<Option<Vec<u8>>>),
    /// Date32 column
    Date32(Vec<Option<i32>>),
    /// Timestamp (microseconds) column
    TimestampMicros(Vec<Option<i64>>),
}

/// Apply the same expression to the inner vector of every variant
macro_rules! each_column {
    ($buffer:expr, $vec:ident => $body:expr) => {
        match $buffer {
            ColumnBuffer::Boolean($vec) => $body,
            ColumnBuffer::Int8($vec) => $body,
            ColumnBuffer::Int16($vec) => $body,
            ColumnBuffer::Int32($vec) => $body,
            ColumnBuffer::Int64($vec) => $body,
            ColumnBuffer::Float32($vec) => $body,
            ColumnBuffer::Float64($vec) => $body,
            ColumnBuffer::Utf8($vec) => $body,
            ColumnBuffer::Binary($vec) => $body,
            ColumnBuffer::Date32($vec) => $body,
            ColumnBuffer::TimestampMicros($vec) => $body,
        }
    };
}

impl ColumnBuffer {
    /// Empty buffer for `value_type`
    pub fn new(value_type: ValueType) -> Self {
        Self::with_capacity(value_type, 0)
    }

    /// Empty buffer with room for `capacity` values
    pub fn with_capacity(value_type: ValueType, capacity: usize) -> Self {
        match value_type {
            ValueType::Boolean => Self::Boolean(Vec::with_capacity(capacity)),
            ValueType::Int8 => Self::Int8(Vec::with_capacity(capacity)),
            ValueType::Int16 => Self::Int16(Vec::with_capacity(capacity)),
            ValueType::Int32 => Self::Int32(Vec::with_capacity(capacity)),
            ValueType::Int64 => Self::Int64(Vec::with_capacity(capacity)),
            ValueType::Float32 => Self::Float32(Vec::with_capacity(capacity)),
            ValueType::Float64 => Self::Float64(Vec::with_capacity(capacity)),
            ValueType::Utf8 => Self::Utf8(Vec::with_capacity(capacity)),
            ValueType::Binary => Self::Binary(Vec::with_capacity(capacity)),
            ValueType::Date32 => Self::Date32(Vec::with_capacity(capacity)),
            ValueType::TimestampMicros => Self::TimestampMicros(Vec::with_capacity(capacity)),
        }
    }

    /// Column holding `count` copies of `value`
    pub fn repeat(value_type: ValueType, value: &Value, count: usize) -> Result<Self, WriterError> {
        let mut buffer = Self::with_capacity(value_type, count);
        for _ in 0..count {
            buffer.push(value)?;
        }
        Ok(buffer)
    }

    /// Logical type stored in this buffer
    pub fn value_type(&self) -> ValueType {
        match self {
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
        }
    }

    /// Number of buffered values
    pub fn len(&self) -> usize {
        each_column!(self, v => v.len())
    }

    /// Returns true when nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one value; `Null` is accepted by every variant
    pub fn push(&mut self, value: &Value) -> Result<(), WriterError> {
        match (self, value) {
            (Self::Boolean(v), Value::Boolean(x)) => v.push(Some(*x)),
            (Self::Int8(v), Value::Int8(x)) => v.push(Some(*x)),
            (Self::Int16(v), Value::Int16(x)) => v.push(Some(*x)),
            (Self::Int32(v), Value::Int32(x)) => v.push(Some(*x)),
            (Self::Int64(v), Value::Int64(x)) => v.push(Some(*x)),
            (Self::Float32(v), Value::Float32(x)) => v.push(Some(*x)),
            (Self::Float64(v), Value::Float64(x)) => v.push(Some(*x)),
            (Self::Utf8(v), Value::Utf8(x)) => v.push(Some(x.clone())),
            (Self::Binary(v), Value::Binary(x)) => v.push(Some(x.clone())),
            (Self::Date32(v), Value::Date32(x)) => v.push(Some(*x)),
            (Self::TimestampMicros(v), Value::TimestampMicros(x)) => v.push(Some(*x)),
            (buffer, Value::Null) => each_column!(buffer, v => v.push(None)),
            (buffer, other) => {
                return Err(WriterError::ColumnTypeMismatch {
                    expected: buffer.value_type(),
                    // Null was matched above
                    found: other.value_type().unwrap_or(buffer.value_type()),
                })
            }
        }
        Ok(())
    }

    /// Value at `index`
    pub fn get(&self, index: usize) -> Option<Value> {
        fn cell<T: Clone>(v: &[Option<T>], index: usize, wrap: fn(T) -> Value) -> Option<Value> {
            v.get(index).map(|cell| cell.clone().map_or(Value::Null, wrap))
        }

        match self {
            Self::Boolean(v) => cell(v, index, Value::Boolean),
            Self::Int8(v) => cell(v, index, Value::Int8),
            Self::Int16(v) => cell(v, index, Value::Int16),
            Self::Int32(v) => cell(v, index, Value::Int32),
            Self::Int64(v) => cell(v, index, Value::Int64),
            Self::Float32(v) => cell(v, index, Value::Float32),
            Self::Float64(v) => cell(v, index, Value::Float64),
            Self::Utf8(v) => cell(v, index, Value::Utf8),
            Self::Binary(v) => cell(v, index, Value::Binary),
            Self::Date32(v) => cell(v, index, Value::Date32),
            Self::TimestampMicros(v) => cell(v, index, Value::TimestampMicros),
        }
    }

    /// All buffered values, in order
    pub fn values(&self) -> Vec<Value> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }

    /// Convert into an Arrow array, transferring the buffered values
    pub fn into_array(self) -> ArrayRef {
        match self {
            Self::Boolean(v) => Arc::new(BooleanArray::from(v)),
            Self::Int8(v) => Arc::new(Int8Array::from(v)),
            Self::Int16(v) => Arc::new(Int16Array::from(v)),
            Self::Int32(v) => Arc::new(Int32Array::from(v)),
            Self::Int64(v) => Arc::new(Int64Array::from(v)),
            Self::Float32(v) => Arc::new(Float32Array::from(v)),
            Self::Float64(v) => Arc::new(Float64Array::from(v)),
            Self::Utf8(v) => Arc::new(StringArray::from(v)),
            Self::Binary(v) => Arc::new(v.iter().map(|b| b.as_deref()).collect::<BinaryArray>()),
            Self::Date32(v) => Arc::new(Date32Array::from(v)),
            Self::TimestampMicros(v) => Arc::new(TimestampMicrosecondArray::from(v)),
        }
    }
}

/// Column buffers of the row group currently being accumulated.
///
/// All columns are kept in lock-step and are replaced by fresh, empty buffers each
/// time the row group is flushed.
#[derive(Debug)]
pub(crate) struct RowGroupBuffers {
    columns: Vec<ColumnBuffer>,
}

impl RowGroupBuffers {
    pub(crate) fn new(schema: &RowSchema) -> Self {
        Self {
            columns: schema
                .fields()
                .iter()
                .map(|f| ColumnBuffer::new(f.value_type))
                .collect(),
        }
    }

    /// Append one row; values must already be checked against the schema
    pub(crate) fn push_row(&mut self, values: &[Value]) -> Result<(), WriterError> {
        self.columns
            .iter_mut()
            .zip(values)
            .try_for_each(|(column, value)| column.push(value))
    }

    pub(crate) fn row_count(&self) -> usize {
        self.columns.first().map_or(0, ColumnBuffer::len)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Hand the buffered columns out and start a new, empty row group
    pub(crate) fn take(&mut self) -> Vec<ColumnBuffer> {
        let fresh = self
            .columns
            .iter()
            .map(|c| ColumnBuffer::new(c.value_type()))
            .collect();
        std::mem::replace(&mut self.columns, fresh)
    }
}

/// Accumulator for the trailing index row group.
///
/// Lives for the whole file: one key per data row group, in flush order. The
/// non-key columns of the index hold only schema defaults, so they are
/// materialized when the index is written rather than buffered per entry.
#[derive(Debug)]
pub(crate) struct KeyIndex {
    keys: ColumnBuffer,
}

impl KeyIndex {
    pub(crate) fn new(key_type: ValueType) -> Self {
        Self {
            keys: ColumnBuffer::new(key_type),
        }
    }

    /// Register the key of a newly opened data row group
    pub(crate) fn record(&mut self, key: &Value) -> Result<(), WriterError> {
        self.keys.push(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Index columns in schema order: the keys, then one default column per field
    pub(crate) fn into_columns(self, schema: &RowSchema) -> Result<Vec<ColumnBuffer>, WriterError> {
        let count = self.keys.len();
        let mut columns = Vec::with_capacity(schema.len());
        columns.push(self.keys);
        for field in schema.fields().iter().skip(1) {
            columns.push(ColumnBuffer::repeat(field.value_type, &field.default, count)?);
        }
        Ok(columns)
    }
}
