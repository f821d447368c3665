use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    Date32Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type,
    TimestampMicrosecondType,
};

use super::error::SchemaError;
use super::value::{Value, ValueType};

/// Read one cell of an Arrow array as a typed [`Value`]
pub fn value_at(array: &dyn Array, row: usize) -> Result<Value, SchemaError> {
    let value_type = ValueType::from_arrow(array.data_type()).ok_or_else(|| {
        SchemaError::UnsupportedArrowType {
            column: String::new(),
            data_type: array.data_type().to_string(),
        }
    })?;

    if array.is_null(row) {
        return Ok(Value::Null);
    }

    let value = match value_type {
        ValueType::Boolean => Value::Boolean(array.as_boolean().value(row)),
        ValueType::Int8 => Value::Int8(array.as_primitive::<Int8Type>().value(row)),
        ValueType::Int16 => Value::Int16(array.as_primitive::<Int16Type>().value(row)),
        ValueType::Int32 => Value::Int32(array.as_primitive::<Int32Type>().value(row)),
        ValueType::Int64 => Value::Int64(array.as_primitive::<Int64Type>().value(row)),
        ValueType::Float32 => Value::Float32(array.as_primitive::<Float32Type>().value(row)),
        ValueType::Float64 => Value::Float64(array.as_primitive::<Float64Type>().value(row)),
        ValueType::Utf8 => Value::Utf8(array.as_string::<i32>().value(row).to_string()),
        ValueType::Binary => Value::Binary(array.as_binary::<i32>().value(row).to_vec()),
        ValueType::Date32 => Value::Date32(array.as_primitive::<Date32Type>().value(row)),
        ValueType::TimestampMicros => Value::TimestampMicros(
            array.as_primitive::<TimestampMicrosecondType>().value(row),
        ),
    };
    Ok(value)
}

/// Read every cell of an Arrow array
pub fn values_of(array: &dyn Array) -> Result<Vec<Value>, SchemaError> {
    (0..array.len()).map(|row| value_at(array, row)).collect()
}
