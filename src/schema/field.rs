use std::collections::HashSet;
use std::sync::Arc;

use arrow::datatypes::{Field, Schema};
use serde::{Deserialize, Serialize};

use super::error::SchemaError;
use super::value::{Value, ValueType};

/// Name, type and index-row default for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Column name
    pub name: String,
    /// Logical type of every value in the column
    pub value_type: ValueType,
    /// Whether `Value::Null` is accepted
    pub nullable: bool,
    /// Value written into this column for index rows
    pub default: Value,
}

impl FieldDescriptor {
    /// Non-nullable field whose default is the type default
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            nullable: false,
            default: value_type.default_value(),
        }
    }

    /// Nullable field; its default is `Null`
    pub fn nullable(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            nullable: true,
            default: Value::Null,
        }
    }

    /// Override the index-row default
    pub fn with_default(mut self, default: Value) -> Result<Self, SchemaError> {
        self.check_default(&default)?;
        self.default = default;
        Ok(self)
    }

    /// Check that `value` may be stored in this field
    pub fn check_value(&self, value: &Value) -> Result<(), SchemaError> {
        match value.value_type() {
            None if self.nullable => Ok(()),
            None => Err(SchemaError::NullNotAllowed(self.name.clone())),
            Some(found) if found == self.value_type => Ok(()),
            Some(found) => Err(SchemaError::TypeMismatch {
                field: self.name.clone(),
                expected: self.value_type,
                found,
            }),
        }
    }

    /// Defaults are stored as JSON in the footer, which has no NaN or infinity
    fn check_default(&self, value: &Value) -> Result<(), SchemaError> {
        self.check_value(value)?;
        let finite = match value {
            Value::Float32(v) => v.is_finite(),
            Value::Float64(v) => v.is_finite(),
            _ => true,
        };
        if finite {
            Ok(())
        } else {
            Err(SchemaError::NonFiniteDefault(self.name.clone()))
        }
    }

    /// Arrow field for this descriptor
    pub fn to_arrow_field(&self) -> Field {
        Field::new(&self.name, self.value_type.to_arrow(), self.nullable)
    }
}

/// Ordered field list shared by every row of one stream; field 0 is the key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRowSchema")]
pub struct RowSchema {
    fields: Vec<FieldDescriptor>,
}

#[derive(Deserialize)]
struct RawRowSchema {
    fields: Vec<FieldDescriptor>,
}

impl TryFrom<RawRowSchema> for RowSchema {
    type Error = SchemaError;

    fn try_from(raw: RawRowSchema) -> Result<Self, Self::Error> {
        Self::new(raw.fields)
    }
}

impl RowSchema {
    /// Build a schema, rejecting empty field lists and duplicate names
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            field.check_default(&field.default)?;
        }

        Ok(Self { fields })
    }

    /// Rebuild a schema from an Arrow schema, using type defaults
    pub fn from_arrow(schema: &Schema) -> Result<Self, SchemaError> {
        let fields = schema
            .fields()
            .iter()
            .map(|field| {
                let value_type = ValueType::from_arrow(field.data_type()).ok_or_else(|| {
                    SchemaError::UnsupportedArrowType {
                        column: field.name().clone(),
                        data_type: field.data_type().to_string(),
                    }
                })?;
                Ok(if field.is_nullable() {
                    FieldDescriptor::nullable(field.name().as_str(), value_type)
                } else {
                    FieldDescriptor::new(field.name().as_str(), value_type)
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        Self::new(fields)
    }

    /// All fields in order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Field at `index`
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// The key field (always field 0)
    pub fn key_field(&self) -> &FieldDescriptor {
        &self.fields[0]
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields (never true once constructed)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of the field named `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Arrow schema with one column per field
    pub fn to_arrow_schema(&self) -> Schema {
        Schema::new(
            self.fields
                .iter()
                .map(FieldDescriptor::to_arrow_field)
                .collect::<Vec<_>>(),
        )
    }

    /// Validate arity, types and nullability of a row's values
    pub fn check_values(&self, values: &[Value]) -> Result<(), SchemaError> {
        if values.len() != self.fields.len() {
            return Err(SchemaError::ArityMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }
        self.fields
            .iter()
            .zip(values)
            .try_for_each(|(field, value)| field.check_value(value))
    }

    /// Default values of every field, in order
    pub fn defaults(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|f| &f.default)
    }
}

/// One input row together with the schema that describes it
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<RowSchema>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row, validating `values` against `schema`
    pub fn new(schema: Arc<RowSchema>, values: Vec<Value>) -> Result<Self, SchemaError> {
        schema.check_values(&values)?;
        Ok(Self { schema, values })
    }

    /// Schema of this row
    pub fn schema(&self) -> &Arc<RowSchema> {
        &self.schema
    }

    /// Field values in schema order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The key value (field 0)
    pub fn key(&self) -> &Value {
        &self.values[0]
    }

    /// Number of fields
    pub fn field_count(&self) -> usize {
        self.values.len()
    }

    /// Take the values out of the row
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
