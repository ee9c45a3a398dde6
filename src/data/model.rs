use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CellValue – a single cell in a benchmark table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell.  Benchmark datasets have no fixed schema:
/// each column may hold numbers, free text, or nothing at all.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                String(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "-"),
        }
    }
}

impl CellValue {
    /// Guess the cell type from raw text (CSV cells, spreadsheet exports).
    /// Numbers win over text; empty text is a missing value.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::String(s.to_string())
    }

    /// Whether the cell holds a usable value.  Empty strings count as
    /// missing, matching the presence filter on chart axes.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    }

    /// Interpret the cell as `f64`, coercing numeric-looking strings
    /// (`"42"`, `"6.5e3"`) the way the sort comparator expects.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok(),
            CellValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of a benchmark table
// ---------------------------------------------------------------------------

/// A single benchmark entry (one table row): column name → cell value.
/// Records are immutable once loaded; every view is a fresh projection.
pub type Record = BTreeMap<String, CellValue>;

/// Look up a cell, treating both absent keys and empty cells as missing.
pub fn present_cell<'a>(record: &'a Record, column: &str) -> Option<&'a CellValue> {
    record.get(column).filter(|v| v.is_present())
}

// ---------------------------------------------------------------------------
// BenchmarkDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
#[derive(Debug, Clone)]
pub struct BenchmarkDataset {
    /// All records (rows), in file order.
    pub records: Vec<Record>,
    /// Column names in source order (CSV header / schema order).
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl BenchmarkDataset {
    /// Build column indices from loaded records.  `column_names` preserves
    /// the source order; columns seen only in record bodies are appended.
    pub fn from_records(records: Vec<Record>, mut column_names: Vec<String>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in rec {
                if !column_names.iter().any(|c| c == col) {
                    column_names.push(col.clone());
                }
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        BenchmarkDataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Columns where every present value coerces to a number (and at least
    /// one value is present).  These are the plottable axes.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|col| {
                let mut any = false;
                for rec in &self.records {
                    if let Some(v) = present_cell(rec, col) {
                        if v.as_f64().is_none() {
                            return false;
                        }
                        any = true;
                    }
                }
                any
            })
            .cloned()
            .collect()
    }

    /// First column that is not numeric, used to label chart points
    /// (TEAM, PROGRAM and the like).
    pub fn label_column(&self) -> Option<String> {
        let numeric = self.numeric_columns();
        self.column_names
            .iter()
            .find(|c| !numeric.contains(c))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_guesses_numbers_before_text() {
        assert_eq!(CellValue::parse("42"), CellValue::Integer(42));
        assert_eq!(CellValue::parse("6.5"), CellValue::Float(6.5));
        assert_eq!(
            CellValue::parse("AlphaFold"),
            CellValue::String("AlphaFold".to_string())
        );
        assert_eq!(CellValue::parse("   "), CellValue::Null);
    }

    #[test]
    fn numeric_strings_coerce() {
        assert_eq!(CellValue::String("1999".into()).as_f64(), Some(1999.0));
        assert_eq!(CellValue::String(" 2.5e3 ".into()).as_f64(), Some(2500.0));
        assert_eq!(CellValue::String("CASP13".into()).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn presence_treats_blank_strings_as_missing() {
        assert!(!CellValue::Null.is_present());
        assert!(!CellValue::String("  ".into()).is_present());
        assert!(CellValue::Integer(0).is_present());
        assert!(CellValue::String("x".into()).is_present());
    }

    #[test]
    fn from_records_keeps_source_column_order() {
        let mut rec = Record::new();
        rec.insert("YEAR".into(), CellValue::Integer(2001));
        rec.insert("ELO".into(), CellValue::Integer(1200));
        let ds = BenchmarkDataset::from_records(
            vec![rec],
            vec!["PROGRAM".into(), "YEAR".into(), "ELO".into()],
        );
        assert_eq!(ds.column_names, vec!["PROGRAM", "YEAR", "ELO"]);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn numeric_columns_ignore_text_columns() {
        let mut a = Record::new();
        a.insert("PROGRAM".into(), CellValue::String("Zen".into()));
        a.insert("YEAR".into(), CellValue::Integer(2011));
        a.insert("ELO".into(), CellValue::String("2100".into()));
        let ds = BenchmarkDataset::from_records(vec![a], vec![]);
        // String cells that parse as numbers still count as numeric.
        let numeric = ds.numeric_columns();
        assert!(numeric.contains(&"YEAR".to_string()));
        assert!(numeric.contains(&"ELO".to_string()));
        assert!(!numeric.contains(&"PROGRAM".to_string()));
        assert_eq!(ds.label_column(), Some("PROGRAM".to_string()));
    }
}
