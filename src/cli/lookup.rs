use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use keyed_parquet::reader::KeyedReader;

use super::convert::parse_cell;

/// Print the rows stored under one key
pub fn run(file: PathBuf, key: String) -> Result<()> {
    let reader = KeyedReader::open(&file)
        .with_context(|| format!("Failed to open keyed file: {}", file.display()))?;
    let schema = reader.row_schema();
    let key_field = schema.key_field();
    let key = parse_cell(key_field, &key).with_context(|| {
        format!(
            "Key is not a valid {} for column '{}'",
            key_field.value_type, key_field.name
        )
    })?;

    let row_groups = reader.row_groups_for_key(&key)?;
    info!("Key {} is in row groups {:?}", key, row_groups);

    let header: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
    println!("{}", header.join("\t"));

    let rows = reader.lookup(&key)?;
    for row in &rows {
        let cells: Vec<String> = row.iter().map(|value| value.to_string()).collect();
        println!("{}", cells.join("\t"));
    }
    eprintln!("{} rows in {} row groups", rows.len(), row_groups.len());
    Ok(())
}
