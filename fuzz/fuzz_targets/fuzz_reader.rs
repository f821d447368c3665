#![no_main]

use bytes::Bytes;
use keyed_parquet::reader::KeyedReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must be rejected with an error, never a panic
    let Ok(reader) = KeyedReader::from_bytes(Bytes::copy_from_slice(data)) else {
        return;
    };

    if let Ok(index) = reader.index() {
        for entry in index.iter().take(16) {
            let _ = reader.row_group_rows(entry.row_group);
            let _ = reader.lookup(&entry.key);
        }
    }
    let _ = reader.summary();
});
