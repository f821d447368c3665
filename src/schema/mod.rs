//! # Row Schema Definition
//!
//! Typed rows, field descriptors and the conversions between them and Apache Arrow.
//!
//! Every stream written by [`crate::writer::SegmentedColumnWriter`] is described by a
//! single [`RowSchema`]. Field 0 is the *key field*: a change in its value opens a new
//! row group. Each field also carries a *default value*, written into that column for
//! the rows of the trailing index row group.
//!
//! ## Supported Types
//!
//! | ValueType | Arrow type | Default |
//! |-----------|------------|---------|
//! | boolean | Boolean | `false` |
//! | int8 / int16 / int32 / int64 | Int8 .. Int64 | `0` |
//! | float32 / float64 | Float32 / Float64 | `0.0` |
//! | utf8 | Utf8 | `""` |
//! | binary | Binary | empty |
//! | date32 | Date32 | day 0 |
//! | timestamp_micros | Timestamp(Microsecond) | epoch |
//!
//! Nullable fields default to `null`.

mod cells;
mod constants;
mod error;
mod field;
mod value;


pub use cells::{value_at, values_of};
pub use constants::*;
pub use error::SchemaError;
pub use field::{FieldDescriptor, Row, RowSchema};
pub use value::{Value, ValueType};
