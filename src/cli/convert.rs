use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use keyed_parquet::schema::{FieldDescriptor, Row, RowSchema, SchemaError, Value, ValueType};
use keyed_parquet::writer::KeyedParquetWriter;

use super::config::Config;
use super::Profile;

/// Convert a CSV file into a keyed Parquet file
pub fn run(
    input: PathBuf,
    output: PathBuf,
    profile: Profile,
    config_path: Option<PathBuf>,
    compression_level: Option<i32>,
    strict: bool,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let writer_config = config.writer_config(profile.writer_config(), compression_level, strict);

    info!("Converting {} -> {}", input.display(), output.display());
    info!("Profile: {}, compression: {:?}", profile, writer_config.compression);

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&input)
        .with_context(|| format!("Failed to open CSV file: {}", input.display()))?;
    let headers = csv_reader
        .headers()
        .context("Failed to read CSV header")?
        .clone();

    let schema = match config.row_schema()? {
        Some(schema) => schema,
        None => RowSchema::new(
            headers
                .iter()
                .map(|name| FieldDescriptor::new(name, ValueType::Utf8))
                .collect(),
        )
        .context("CSV header cannot be used as a row schema")?,
    };
    if schema.len() != headers.len() {
        bail!(
            "Schema has {} fields but the CSV header has {} columns",
            schema.len(),
            headers.len()
        );
    }
    for (field, header) in schema.fields().iter().zip(headers.iter()) {
        if field.name != header {
            warn!(
                "CSV column '{}' is stored as field '{}'",
                header, field.name
            );
        }
    }
    let schema = Arc::new(schema);

    let mut writer = KeyedParquetWriter::new_file(&output, writer_config)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;

    for (line, record) in csv_reader.records().enumerate() {
        // Header is line 1
        let line = line + 2;
        let record = record.with_context(|| format!("Failed to read CSV line {}", line))?;
        let values = schema
            .fields()
            .iter()
            .zip(record.iter())
            .map(|(field, text)| parse_cell(field, text))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Invalid value on CSV line {}", line))?;
        let row = Row::new(schema.clone(), values)
            .with_context(|| format!("Invalid row on CSV line {}", line))?;
        writer
            .add(&row)
            .with_context(|| format!("Failed to write CSV line {}", line))?;
    }

    let stats = writer.finish().context("Failed to finish output file")?;
    println!("{}", stats);
    Ok(())
}

/// Parse one text cell for `field`; empty cells of nullable fields are null
pub fn parse_cell(field: &FieldDescriptor, text: &str) -> Result<Value, SchemaError> {
    if field.nullable && text.is_empty() {
        return Ok(Value::Null);
    }
    field.value_type.parse_value(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyed_parquet::reader::KeyedReader;
    use tempfile::tempdir;

    #[test]
    fn test_parse_cell() {
        let nullable = FieldDescriptor::nullable("x", ValueType::Int32);
        let required = FieldDescriptor::new("x", ValueType::Int32);
        assert_eq!(parse_cell(&nullable, "").unwrap(), Value::Null);
        assert_eq!(parse_cell(&nullable, "7").unwrap(), Value::Int32(7));
        assert!(parse_cell(&required, "").is_err());

        let text = FieldDescriptor::new("s", ValueType::Utf8);
        assert_eq!(parse_cell(&text, "").unwrap(), Value::from(""));
    }

    #[test]
    fn test_convert_csv() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("events.csv");
        let config = dir.path().join("events.toml");
        let output = dir.path().join("events.parquet");

        std::fs::write(&input, "user,event,score\n1,login,0.5\n1,click,\n2,login,3\n")?;
        std::fs::write(
            &config,
            r#"
            [[fields]]
            name = "user"
            type = "int64"

            [[fields]]
            name = "event"
            type = "utf8"

            [[fields]]
            name = "score"
            type = "float64"
            nullable = true
            "#,
        )?;

        run(
            input,
            output.clone(),
            Profile::Fast,
            Some(config),
            None,
            true,
        )?;

        let reader = KeyedReader::open(&output)?;
        assert_eq!(reader.data_row_groups(), 2);
        assert_eq!(
            reader.lookup(&Value::Int64(1))?,
            vec![
                vec![Value::Int64(1), Value::from("login"), Value::Float64(0.5)],
                vec![Value::Int64(1), Value::from("click"), Value::Null],
            ]
        );
        Ok(())
    }

    #[test]
    fn test_convert_without_config_uses_utf8() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("plain.csv");
        let output = dir.path().join("plain.parquet");
        std::fs::write(&input, "k,v\na,1\na,2\nb,3\n")?;

        run(input, output.clone(), Profile::Balanced, None, None, false)?;

        let reader = KeyedReader::open(&output)?;
        assert_eq!(reader.row_schema().key_field().value_type, ValueType::Utf8);
        assert_eq!(reader.row_groups_for_key(&Value::from("b"))?, vec![1]);
        Ok(())
    }

    #[test]
    fn test_convert_empty_body_writes_empty_file() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("empty.csv");
        let output = dir.path().join("empty.parquet");
        std::fs::write(&input, "k,v\n")?;

        run(input, output.clone(), Profile::Balanced, None, None, false)?;
        assert_eq!(std::fs::metadata(&output)?.len(), 0);
        Ok(())
    }

    #[test]
    fn test_convert_strict_rejects_unsorted() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("unsorted.csv");
        let output = dir.path().join("unsorted.parquet");
        std::fs::write(&input, "k,v\nb,1\na,2\n")?;

        let result = run(input, output, Profile::Balanced, None, None, true);
        assert!(result.is_err());
        Ok(())
    }
}
