//! Integration tests for keyed-parquet
//!
//! These tests write real Parquet files and check them with both the plain
//! Parquet reader and the keyed reader.

use std::fs::{self, File};
use std::sync::Arc;

use keyed_parquet::prelude::*;
use keyed_parquet::schema::{values_of, KEY_DATA_ROW_GROUPS, KEY_KEY_COLUMN, KEY_ROW_SCHEMA};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::{FileReader, SerializedFileReader};
use tempfile::tempdir;

fn sensor_schema() -> Arc<RowSchema> {
    Arc::new(
        RowSchema::new(vec![
            FieldDescriptor::new("sensor", ValueType::Utf8),
            FieldDescriptor::new("ts", ValueType::TimestampMicros),
            FieldDescriptor::nullable("reading", ValueType::Float32),
            FieldDescriptor::new("ok", ValueType::Boolean)
                .with_default(Value::Boolean(true))
                .unwrap(),
            FieldDescriptor::nullable("raw", ValueType::Binary),
        ])
        .unwrap(),
    )
}

fn reading(schema: &Arc<RowSchema>, sensor: &str, ts: i64, value: Option<f32>) -> Row {
    Row::new(
        schema.clone(),
        vec![
            Value::from(sensor),
            Value::TimestampMicros(ts),
            value.map_or(Value::Null, Value::Float32),
            Value::Boolean(value.is_some()),
            Value::Binary(ts.to_le_bytes().to_vec()),
        ],
    )
    .unwrap()
}

/// Test the complete write-read cycle
#[test]
fn test_write_read_cycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sensors.parquet");
    let schema = sensor_schema();

    let sensors = ["alpha", "beta", "gamma", "delta"];
    let mut sorted = sensors;
    sorted.sort();

    let mut writer = KeyedParquetWriter::new_file(&path, WriterConfig::default()).unwrap();
    for (i, sensor) in sorted.iter().enumerate() {
        for t in 0..(i as i64 + 1) * 10 {
            let value = if t % 4 == 0 { None } else { Some(t as f32) };
            writer.add(&reading(&schema, sensor, t, value)).unwrap();
        }
    }
    let stats = writer.finish().unwrap();
    assert_eq!(stats.rows_written, 100);
    assert_eq!(stats.data_row_groups, 4);
    assert_eq!(stats.index_rows, 4);

    // Physical layout, checked with the plain Parquet reader
    let file = File::open(&path).unwrap();
    let parquet_reader = SerializedFileReader::new(file).unwrap();
    let metadata = parquet_reader.metadata();
    let row_counts: Vec<i64> = (0..metadata.num_row_groups())
        .map(|i| metadata.row_group(i).num_rows())
        .collect();
    assert_eq!(row_counts, vec![10, 20, 30, 40, 4]);

    let kv = metadata.file_metadata().key_value_metadata().unwrap();
    let find = |key: &str| {
        kv.iter()
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.value.clone())
    };
    assert_eq!(find(KEY_KEY_COLUMN).as_deref(), Some("sensor"));
    assert_eq!(find(KEY_DATA_ROW_GROUPS).as_deref(), Some("4"));
    assert!(find(KEY_ROW_SCHEMA).unwrap().contains("timestamp_micros"));

    // Index-driven access
    let reader = KeyedReader::open(&path).unwrap();
    let index = reader.index().unwrap();
    let keys: Vec<Value> = index.iter().map(|entry| entry.key.clone()).collect();
    let expected: Vec<Value> = sorted.iter().map(|s| Value::from(*s)).collect();
    assert_eq!(keys, expected);

    let gamma = reader.lookup(&Value::from("gamma")).unwrap();
    assert_eq!(gamma.len(), 40);
    assert_eq!(gamma[0][2], Value::Null);
    assert_eq!(gamma[1][2], Value::Float32(1.0));
    assert_eq!(gamma[39][1], Value::TimestampMicros(39));
    assert_eq!(gamma[5][4], Value::Binary(5i64.to_le_bytes().to_vec()));
}

/// The index row group carries schema defaults outside the key column
#[test]
fn test_index_row_group_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("defaults.parquet");
    let schema = sensor_schema();

    let mut writer = KeyedParquetWriter::new_file(&path, WriterConfig::default()).unwrap();
    writer.add(&reading(&schema, "a", 1, Some(1.0))).unwrap();
    writer.add(&reading(&schema, "b", 2, Some(2.0))).unwrap();
    writer.finish().unwrap();

    let reader = KeyedReader::open(&path).unwrap();
    let batches = reader.read_row_group(1).unwrap();
    assert_eq!(batches.len(), 1);

    // The index row group is only reachable through the raw Parquet reader
    let bytes = bytes::Bytes::from(fs::read(&path).unwrap());
    let index_batches: Vec<_> = ParquetRecordBatchReaderBuilder::try_new(bytes)
        .unwrap()
        .with_row_groups(vec![2])
        .build()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(index_batches.len(), 1);
    let batch = &index_batches[0];
    assert_eq!(batch.num_rows(), 2);

    let column = |i: usize| values_of(batch.column(i).as_ref()).unwrap();
    assert_eq!(column(0), vec![Value::from("a"), Value::from("b")]);
    assert_eq!(column(1), vec![Value::TimestampMicros(0); 2]);
    assert_eq!(column(2), vec![Value::Null; 2]);
    assert_eq!(column(3), vec![Value::Boolean(true); 2]);
    assert_eq!(column(4), vec![Value::Null; 2]);
}

/// Unsorted input still round-trips, spread across more row groups
#[test]
fn test_unsorted_input_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unsorted.parquet");
    let schema = sensor_schema();

    let mut writer = KeyedParquetWriter::new_file(&path, WriterConfig::fast_write()).unwrap();
    for (t, sensor) in ["x", "y", "x", "x", "y"].iter().enumerate() {
        writer
            .add(&reading(&schema, sensor, t as i64, Some(t as f32)))
            .unwrap();
    }
    let stats = writer.finish().unwrap();
    assert_eq!(stats.data_row_groups, 4);

    let reader = KeyedReader::open(&path).unwrap();
    assert_eq!(reader.row_groups_for_key(&Value::from("x")).unwrap(), vec![0, 2]);
    let xs = reader.lookup(&Value::from("x")).unwrap();
    let timestamps: Vec<Value> = xs.iter().map(|row| row[1].clone()).collect();
    assert_eq!(
        timestamps,
        vec![
            Value::TimestampMicros(0),
            Value::TimestampMicros(2),
            Value::TimestampMicros(3)
        ]
    );

    let summary = reader.summary().unwrap();
    assert_eq!(summary.distinct_keys, 2);
    assert_eq!(summary.fragmented_keys, 2);
}

/// Every compression preset produces a readable file
#[test]
fn test_compression_presets() {
    let dir = tempdir().unwrap();
    let schema = sensor_schema();

    let configs = [
        ("gzip", WriterConfig::default()),
        ("zstd", WriterConfig::max_compression()),
        ("snappy", WriterConfig::fast_write()),
        (
            "none",
            WriterConfig {
                compression: CompressionType::Uncompressed,
                ..WriterConfig::default()
            },
        ),
    ];

    for (name, config) in configs {
        let path = dir.path().join(format!("{}.parquet", name));
        let mut writer = KeyedParquetWriter::new_file(&path, config).unwrap();
        for t in 0..50 {
            writer
                .add(&reading(&schema, &format!("s{}", t / 10), t, Some(t as f32)))
                .unwrap();
        }
        writer.finish().unwrap();

        let reader = KeyedReader::open(&path).unwrap();
        assert_eq!(reader.data_row_groups(), 5, "{}", name);
        assert_eq!(reader.metadata().data_rows, 50, "{}", name);
    }
}

/// No rows: the file is created but nothing is written to it
#[test]
fn test_no_rows_leaves_file_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.parquet");

    let writer = KeyedParquetWriter::new_file(&path, WriterConfig::default()).unwrap();
    let stats = writer.finish().unwrap();

    assert_eq!(stats, WriterStats::default());
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}
