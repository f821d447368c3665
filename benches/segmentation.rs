use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keyed_parquet::reader::KeyedReader;
use keyed_parquet::schema::{FieldDescriptor, Row, RowSchema, Value, ValueType};
use keyed_parquet::writer::{
    KeyedParquetWriter, MemoryFile, MemoryFileWriter, SegmentedColumnWriter, WriterConfig,
};
use std::sync::Arc;

fn schema() -> Arc<RowSchema> {
    Arc::new(
        RowSchema::new(vec![
            FieldDescriptor::new("account", ValueType::Int64),
            FieldDescriptor::new("ts", ValueType::TimestampMicros),
            FieldDescriptor::new("amount", ValueType::Float64),
            FieldDescriptor::nullable("memo", ValueType::Utf8),
        ])
        .unwrap(),
    )
}

/// Sorted rows with `rows_per_key` rows for each key
fn generate_rows(total_rows: usize, rows_per_key: usize) -> Vec<Row> {
    let schema = schema();
    (0..total_rows)
        .map(|i| {
            let memo = if i % 5 == 0 {
                Value::Null
            } else {
                Value::from(format!("txn-{}", i))
            };
            Row::new(
                schema.clone(),
                vec![
                    Value::Int64((i / rows_per_key) as i64),
                    Value::TimestampMicros(i as i64 * 1_000),
                    Value::Float64(i as f64 * 0.01),
                    memo,
                ],
            )
            .unwrap()
        })
        .collect()
}

fn write_parquet(rows: &[Row], config: WriterConfig) -> Vec<u8> {
    let mut writer = KeyedParquetWriter::new(Vec::new(), config);
    for row in rows {
        writer.add(row).unwrap();
    }
    writer.finish_into_inner().unwrap()
}

/// Segmentation and buffering alone, no encoding
fn bench_memory_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_segmentation");
    let total_rows = 100_000;

    for rows_per_key in [1usize, 100, 10_000] {
        let rows = generate_rows(total_rows, rows_per_key);
        group.throughput(Throughput::Elements(total_rows as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(rows_per_key),
            &rows,
            |b, rows| {
                b.iter(|| {
                    let mut writer = SegmentedColumnWriter::<MemoryFileWriter>::new(
                        MemoryFile::new(),
                        WriterConfig::default(),
                    );
                    for row in rows {
                        writer.add(row).unwrap();
                    }
                    writer.finish().unwrap()
                });
            },
        );
    }
    group.finish();
}

/// Full Parquet write: many small row groups versus few large ones
fn bench_parquet_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("parquet_write");
    group.sample_size(10);
    let total_rows = 50_000;

    for rows_per_key in [10usize, 1_000, 50_000] {
        let rows = generate_rows(total_rows, rows_per_key);
        group.throughput(Throughput::Elements(total_rows as u64));
        group.bench_with_input(
            BenchmarkId::new("snappy", rows_per_key),
            &rows,
            |b, rows| b.iter(|| write_parquet(rows, WriterConfig::fast_write())),
        );
        group.bench_with_input(
            BenchmarkId::new("gzip", rows_per_key),
            &rows,
            |b, rows| b.iter(|| write_parquet(rows, WriterConfig::default())),
        );
    }
    group.finish();
}

/// Index-driven lookup against a full scan of the same file
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let rows = generate_rows(200_000, 1_000);
    let bytes = bytes::Bytes::from(write_parquet(&rows, WriterConfig::fast_write()));
    let reader = KeyedReader::from_bytes(bytes).unwrap();
    let key = Value::Int64(150);

    group.bench_function("index", |b| b.iter(|| reader.lookup(&key).unwrap()));
    group.bench_function("scan", |b| {
        b.iter(|| {
            reader
                .iter_batches()
                .unwrap()
                .map(|batch| batch.unwrap().num_rows())
                .sum::<usize>()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_memory_segmentation,
    bench_parquet_write,
    bench_lookup
);
criterion_main!(benches);
