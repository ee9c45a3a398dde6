use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{BenchmarkDataset, CellValue, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a benchmark dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row of column names, one record per row
/// * `.json`    – `[{ "TEAM": "...", "YEAR": 2016, ... }, ...]`
/// * `.parquet` – flat table of scalar columns
pub fn load_file(path: &Path) -> Result<BenchmarkDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one benchmark entry per
/// row.  Cell types are guessed (integer, float, text); empty cells become
/// missing values.
fn load_csv(path: &Path) -> Result<BenchmarkDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

fn parse_csv<R: Read>(input: R) -> Result<BenchmarkDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut record = Record::new();
        for (col_idx, value) in row.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                bail!("CSV row {row_no} has more cells than the header");
            };
            record.insert(col_name.clone(), CellValue::parse(value));
        }
        records.push(record);
    }

    Ok(BenchmarkDataset::from_records(records, headers))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, what the benchmark site feeds its
/// pages):
///
/// ```json
/// [
///   { "PROGRAM": "AlphaGo", "YEAR": 2016, "ELO": 3586, "GFLOPS": 1.5e6 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<BenchmarkDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    let mut column_names: Vec<String> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut record = Record::new();
        for (key, val) in obj {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
            record.insert(key.clone(), json_to_cell(val));
        }
        records.push(record);
    }

    Ok(BenchmarkDataset::from_records(records, column_names))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::parse(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::String(b.to_string()),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing a flat benchmark table: one scalar column
/// per benchmark field (strings, ints, floats, bools).  Works with files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<BenchmarkDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut column_names: Vec<String> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if column_names.is_empty() {
            column_names = schema.fields().iter().map(|f| f.name().clone()).collect();
        }

        for row in 0..batch.num_rows() {
            let mut record: Record = BTreeMap::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_cell(batch.column(col_idx), row);
                record.insert(field.name().clone(), value);
            }
            records.push(record);
        }
    }

    Ok(BenchmarkDataset::from_records(records, column_names))
}

/// Extract a single scalar cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<arrow::array::StringArray>()
                .expect("Utf8 column downcasts to StringArray");
            CellValue::parse(arr.value(row))
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<arrow::array::LargeStringArray>()
                .expect("LargeUtf8 column downcasts to LargeStringArray");
            CellValue::parse(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CellValue::String(arr.value(row).to_string())
        }
        _ => CellValue::String(format!("{:?}", col.data_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_round_trip() {
        let csv = "\
PROGRAM,YEAR,ELO,GFLOPS
Zen,2011,2100,450
AlphaGo,2016,3586,1500000
Handtalk,1997,,0.5
";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names, vec!["PROGRAM", "YEAR", "ELO", "GFLOPS"]);
        assert_eq!(
            ds.records[0].get("PROGRAM"),
            Some(&CellValue::String("Zen".into()))
        );
        assert_eq!(ds.records[1].get("YEAR"), Some(&CellValue::Integer(2016)));
        // The empty ELO cell is a missing value, not an empty string.
        assert_eq!(ds.records[2].get("ELO"), Some(&CellValue::Null));
        assert_eq!(ds.records[2].get("GFLOPS"), Some(&CellValue::Float(0.5)));
    }

    #[test]
    fn json_cells_map_to_cell_values() {
        assert_eq!(json_to_cell(&serde_json::json!(2016)), CellValue::Integer(2016));
        assert_eq!(json_to_cell(&serde_json::json!(1.5)), CellValue::Float(1.5));
        assert_eq!(json_to_cell(&serde_json::json!(null)), CellValue::Null);
        assert_eq!(
            json_to_cell(&serde_json::json!("AlphaGo")),
            CellValue::String("AlphaGo".into())
        );
        // Numeric strings keep their numeric interpretation.
        assert_eq!(json_to_cell(&serde_json::json!("42")), CellValue::Integer(42));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("data.xlsx")).unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }
}
