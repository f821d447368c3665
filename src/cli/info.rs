use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

use keyed_parquet::reader::KeyedReader;
use parquet::file::reader::{FileReader, SerializedFileReader};

/// Display information about a keyed file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = KeyedReader::open(&file).context("Failed to read keyed file")?;
    let parquet_reader = SerializedFileReader::new(File::open(&file).context("Failed to open file")?)
        .context("Failed to read Parquet file")?;
    let parquet_metadata = parquet_reader.metadata();
    let metadata = reader.metadata();

    println!("Keyed File Information");
    println!("======================");
    println!("File: {}", file.display());
    println!();

    print!("{}", reader.summary()?);
    println!();

    println!("Row Groups:");
    let index = reader.index()?;
    for entry in &index {
        let row_group = parquet_metadata.row_group(entry.row_group);
        println!(
            "  {:5}  key {}  ({} rows, {} bytes)",
            entry.row_group,
            entry.key,
            row_group.num_rows(),
            row_group.total_byte_size()
        );
    }
    let index_row_group = parquet_metadata.row_group(metadata.index_row_group());
    println!(
        "  {:5}  index  ({} rows, {} bytes)",
        metadata.index_row_group(),
        index_row_group.num_rows(),
        index_row_group.total_byte_size()
    );
    println!();

    if !metadata.key_value_metadata.is_empty() {
        println!("Metadata Keys:");
        let mut keys: Vec<_> = metadata.key_value_metadata.iter().collect();
        keys.sort();
        for (key, value) in keys {
            let value_preview = if value.len() > 100 {
                format!("{}... ({} bytes)", value.chars().take(100).collect::<String>(), value.len())
            } else {
                value.clone()
            };
            println!("  {}: {}", key, value_preview);
        }
        println!();
    }

    println!("Schema:");
    for (i, field) in metadata.row_schema.fields().iter().enumerate() {
        println!(
            "  {:3}. {} ({}{}, default {})",
            i + 1,
            field.name,
            field.value_type,
            if field.nullable { ", nullable" } else { "" },
            field.default
        );
    }

    Ok(())
}
