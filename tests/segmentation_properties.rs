//! Property tests for key-driven row group segmentation
//!
//! Runs of equal keys map one-to-one onto data row groups, the index row group
//! mirrors them, and no row is reordered or lost.

use std::sync::Arc;

use keyed_parquet::schema::{FieldDescriptor, Row, RowSchema, Value, ValueType};
use keyed_parquet::writer::{MemoryFile, MemoryFileWriter, SegmentedColumnWriter, WriterConfig};
use proptest::prelude::*;

fn schema() -> Arc<RowSchema> {
    Arc::new(
        RowSchema::new(vec![
            FieldDescriptor::new("key", ValueType::Int32),
            FieldDescriptor::new("seq", ValueType::Int64),
            FieldDescriptor::nullable("note", ValueType::Utf8),
            FieldDescriptor::new("weight", ValueType::Float64)
                .with_default(Value::Float64(1.0))
                .unwrap(),
        ])
        .unwrap(),
    )
}

fn rows_for(keys: &[i32]) -> Vec<Vec<Value>> {
    keys.iter()
        .enumerate()
        .map(|(seq, key)| {
            vec![
                Value::Int32(*key),
                Value::Int64(seq as i64),
                if seq % 3 == 0 { Value::Null } else { Value::from(format!("n{}", seq)) },
                Value::Float64(seq as f64 * 0.5),
            ]
        })
        .collect()
}

fn write(rows: &[Vec<Value>]) -> MemoryFile {
    let schema = schema();
    let mut writer =
        SegmentedColumnWriter::<MemoryFileWriter>::new(MemoryFile::new(), WriterConfig::default());
    for values in rows {
        let row = Row::new(schema.clone(), values.clone()).unwrap();
        writer.add(&row).unwrap();
    }
    writer.finish_into_inner().unwrap()
}

/// Maximal runs of consecutive equal keys, in arrival order
fn runs(rows: &[Vec<Value>]) -> Vec<Vec<Vec<Value>>> {
    let mut runs: Vec<Vec<Vec<Value>>> = Vec::new();
    for row in rows {
        match runs.last_mut() {
            Some(run) if run[0][0] == row[0] => run.push(row.clone()),
            _ => runs.push(vec![row.clone()]),
        }
    }
    runs
}

proptest! {
    /// Sorted input: one data row group per run of equal keys, holding exactly that run
    #[test]
    fn test_sorted_runs_become_row_groups(mut keys in prop::collection::vec(0i32..20, 1..200)) {
        keys.sort();
        let rows = rows_for(&keys);
        let file = write(&rows);

        let expected = runs(&rows);
        prop_assert_eq!(file.data_row_groups, Some(expected.len()));
        prop_assert_eq!(file.data_rows(), expected);
    }

    /// Index row group: one row per data row group, key then schema defaults
    #[test]
    fn test_index_mirrors_data_row_groups(keys in prop::collection::vec(-5i32..5, 1..150)) {
        let rows = rows_for(&keys);
        let file = write(&rows);

        let data = file.data_rows();
        let index = file.index_rows();
        prop_assert_eq!(index.len(), data.len());
        for (entry, row_group) in index.iter().zip(&data) {
            prop_assert!(row_group.iter().all(|row| row[0] == entry[0]));
            prop_assert_eq!(
                &entry[1..],
                &[Value::Int64(0), Value::Null, Value::Float64(1.0)][..]
            );
        }
    }

    /// Concatenating data row groups reproduces the input exactly, sorted or not
    #[test]
    fn test_order_preserved(keys in prop::collection::vec(0i32..4, 0..150)) {
        let rows = rows_for(&keys);
        let file = write(&rows);

        let flattened: Vec<Vec<Value>> = file.data_rows().into_iter().flatten().collect();
        prop_assert_eq!(flattened, rows.clone());
        prop_assert_eq!(file.data_rows().len(), runs(&rows).len());
    }
}

#[test]
fn test_empty_input_writes_nothing() {
    let file = write(&[]);
    assert!(file.row_groups.is_empty());
    assert!(file.schema.is_none());
}

#[test]
fn test_single_key_input() {
    let rows = rows_for(&[7; 25]);
    let file = write(&rows);
    assert_eq!(file.row_groups.len(), 2);
    assert_eq!(file.data_rows(), vec![rows]);
    assert_eq!(file.index_rows().len(), 1);
}
