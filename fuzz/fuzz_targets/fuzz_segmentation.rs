#![no_main]

use std::sync::Arc;

use keyed_parquet::schema::{FieldDescriptor, Row, RowSchema, Value, ValueType};
use keyed_parquet::writer::{MemoryFile, MemoryFileWriter, SegmentedColumnWriter, WriterConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let schema = Arc::new(
        RowSchema::new(vec![
            FieldDescriptor::new("key", ValueType::Int8),
            FieldDescriptor::nullable("pos", ValueType::Int64),
        ])
        .unwrap(),
    );

    let mut writer =
        SegmentedColumnWriter::<MemoryFileWriter>::new(MemoryFile::new(), WriterConfig::default());
    for (pos, byte) in data.iter().enumerate() {
        // Few distinct keys so runs of equal keys actually occur
        let key = (*byte % 4) as i8;
        let row = Row::new(schema.clone(), vec![Value::Int8(key), Value::Int64(pos as i64)]).unwrap();
        writer.add(&row).unwrap();
    }
    let file = writer.finish_into_inner().unwrap();

    // Every row lands in exactly one data row group, in arrival order
    let rows: Vec<Vec<Value>> = file.data_rows().into_iter().flatten().collect();
    assert_eq!(rows.len(), data.len());
    for (pos, row) in rows.iter().enumerate() {
        assert_eq!(row[1], Value::Int64(pos as i64));
    }

    // One index row per data row group, and neighbouring row groups differ in key
    let index = file.index_rows();
    assert_eq!(index.len(), file.data_rows().len());
    for pair in index.windows(2) {
        assert_ne!(pair[0][0], pair[1][0]);
    }
});
