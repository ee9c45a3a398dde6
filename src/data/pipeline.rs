//! The view pipeline: filter → sort → paginate.
//!
//! Every derived view is recomputed in full whenever the dataset, the axis
//! pair, or the sort request changes.  Datasets are tens to low hundreds of
//! rows, so there is no incremental bookkeeping to get wrong.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::error::DataError;
use super::model::{present_cell, BenchmarkDataset, Record};

/// Rows shown before the user asks for more.
pub const PAGE_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Axis and sort selections
// ---------------------------------------------------------------------------

/// What a chart axis (or sort request) reads from each record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Display label ("Computing Power (GFLOPS)").
    pub name: String,
    /// Record key ("GFLOPS").
    pub column: String,
}

impl AxisSpec {
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        AxisSpec {
            name: name.into(),
            column: column.into(),
        }
    }

    /// Axis over a raw column with the column name as label.
    pub fn column(column: impl Into<String>) -> Self {
        let column = column.into();
        AxisSpec {
            name: column.clone(),
            column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        SortSpec {
            column: column.into(),
            direction,
        }
    }

    /// Handle a user sort request: re-sorting the active column flips the
    /// direction, a new column resets to that column's default.
    pub fn request(&mut self, column: &str, default: SortDirection) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column.to_string();
            self.direction = default;
        }
    }
}

/// Whether a column holds compute-power magnitudes (plotted on a log scale
/// and rendered with metric prefixes).  Matched by name, as in the source
/// spreadsheets: "GFLOPS", "HARDWARE BURDEN (GFLOPS)".
pub fn is_compute_column(column: &str) -> bool {
    let upper = column.to_ascii_uppercase();
    upper.contains("FLOP") || upper.contains("HARDWARE BURDEN")
}

// ---------------------------------------------------------------------------
// Axis cell extraction
// ---------------------------------------------------------------------------

/// Read a record's cell as the number a chart axis needs.
///
/// Missing/empty cells and cells that do not coerce to a finite number are
/// reported as errors so the filter can drop the record instead of letting
/// NaN reach the plot.
pub fn numeric_cell(record: &Record, column: &str) -> Result<f64, DataError> {
    let cell = present_cell(record, column)
        .ok_or_else(|| DataError::MissingValue(column.to_string()))?;
    match cell.as_f64() {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(DataError::InvalidNumeric {
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Filter + sort
// ---------------------------------------------------------------------------

/// Comparison key for a sort column: numbers (after string coercion) order
/// before remaining text, text compares case-folded, missing cells always
/// sort to the end.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

fn sort_key(record: &Record, column: &str) -> SortKey {
    match present_cell(record, column) {
        None => SortKey::Missing,
        Some(v) => match v.as_f64() {
            Some(n) if n.is_finite() => SortKey::Number(n),
            _ => SortKey::Text(v.to_string().trim().to_lowercase()),
        },
    }
}

fn compare_keys(a: &SortKey, b: &SortKey, direction: SortDirection) -> Ordering {
    use SortKey::*;
    // Missing cells go last in both directions; this is policy, not a
    // comparator accident.
    let ord = match (a, b) {
        (Missing, Missing) => return Ordering::Equal,
        (Missing, _) => return Ordering::Greater,
        (_, Missing) => return Ordering::Less,
        (Number(x), Number(y)) => x.total_cmp(y),
        (Text(x), Text(y)) => x.cmp(y),
        (Number(_), Text(_)) => Ordering::Less,
        (Text(_), Number(_)) => Ordering::Greater,
    };
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Build the filtered, sorted view of a dataset as record indices.
///
/// A record survives the filter when both axis columns hold a value that
/// coerces to a finite number, and compute-power axes are additionally
/// strictly positive (they are log-scaled downstream).  The sort is stable:
/// equal keys keep their file order.
pub fn filtered_view(
    dataset: &BenchmarkDataset,
    x_axis: &AxisSpec,
    y_axis: &AxisSpec,
    sort: &SortSpec,
) -> Vec<usize> {
    let axis_ok = |record: &Record, axis: &AxisSpec| -> bool {
        match numeric_cell(record, &axis.column) {
            Ok(v) => !is_compute_column(&axis.column) || v > 0.0,
            Err(_) => false,
        }
    };

    let mut indices: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| axis_ok(rec, x_axis) && axis_ok(rec, y_axis))
        .map(|(i, _)| i)
        .collect();

    indices.sort_by(|&a, &b| {
        let ka = sort_key(&dataset.records[a], &sort.column);
        let kb = sort_key(&dataset.records[b], &sort.column);
        compare_keys(&ka, &kb, sort.direction)
    });

    indices
}

/// Expose the first [`PAGE_LIMIT`] rows unless the caller asked for all.
pub fn paginate(view: &[usize], show_more: bool) -> &[usize] {
    if show_more || view.len() <= PAGE_LIMIT {
        view
    } else {
        &view[..PAGE_LIMIT]
    }
}

// ---------------------------------------------------------------------------
// Chart presets
// ---------------------------------------------------------------------------

/// A preconfigured axis pair, like the chart menu on each benchmark page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPreset {
    pub title: String,
    pub x: AxisSpec,
    pub y: AxisSpec,
}

impl ChartPreset {
    fn new(x: AxisSpec, y: AxisSpec) -> Self {
        ChartPreset {
            title: format!("{} vs. {}", y.name, x.name),
            x,
            y,
        }
    }
}

/// Derive the standard preset charts from the loaded columns: score vs.
/// year, compute vs. year, score vs. compute (whichever pairs exist).
pub fn derive_presets(dataset: &BenchmarkDataset) -> Vec<ChartPreset> {
    let numeric = dataset.numeric_columns();

    let year = numeric
        .iter()
        .find(|c| c.eq_ignore_ascii_case("year"))
        .cloned();
    let compute = numeric.iter().find(|c| is_compute_column(c)).cloned();
    let score = numeric
        .iter()
        .find(|c| Some(*c) != year.as_ref() && !is_compute_column(c))
        .cloned();

    let year_axis = year.map(|c| AxisSpec::new("Year", c));
    let compute_axis = compute.map(|c| AxisSpec::new(format!("Computing Power ({c})"), c));
    let score_axis = score.map(AxisSpec::column);

    let mut presets = Vec::new();
    if let (Some(x), Some(y)) = (&year_axis, &score_axis) {
        presets.push(ChartPreset::new(x.clone(), y.clone()));
    }
    if let (Some(x), Some(y)) = (&year_axis, &compute_axis) {
        presets.push(ChartPreset::new(x.clone(), y.clone()));
    }
    if let (Some(x), Some(y)) = (&compute_axis, &score_axis) {
        presets.push(ChartPreset::new(x.clone(), y.clone()));
    }
    presets
}
