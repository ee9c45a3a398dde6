use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{BenchmarkDataset, CellValue};

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write the full dataset (not the filtered view) as CSV, one column per
/// dataset column in source order.  Missing cells export as empty fields.
pub fn write_csv(dataset: &BenchmarkDataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv_to(dataset, file)
}

fn write_csv_to<W: Write>(dataset: &BenchmarkDataset, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    writer
        .write_record(&dataset.column_names)
        .context("writing CSV header")?;

    for (row_no, record) in dataset.records.iter().enumerate() {
        let row: Vec<String> = dataset
            .column_names
            .iter()
            .map(|col| match record.get(col) {
                Some(CellValue::Null) | None => String::new(),
                Some(v) => v.to_string(),
            })
            .collect();
        writer
            .write_record(&row)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    #[test]
    fn exports_all_columns_with_blanks_for_missing() {
        let mut a = Record::new();
        a.insert("PROGRAM".into(), CellValue::String("Zen".into()));
        a.insert("YEAR".into(), CellValue::Integer(2011));
        let mut b = Record::new();
        b.insert("PROGRAM".into(), CellValue::String("Goliath".into()));
        // YEAR missing entirely in b.
        let ds = BenchmarkDataset::from_records(
            vec![a, b],
            vec!["PROGRAM".into(), "YEAR".into()],
        );

        let mut buf = Vec::new();
        write_csv_to(&ds, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "PROGRAM,YEAR\nZen,2011\nGoliath,\n");
    }
}
