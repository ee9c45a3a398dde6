//! Chart projection: filtered records → plot-ready points, with log-scaled
//! compute axes and the trend line fitted on the same scale.

use eframe::egui::Color32;

use crate::color::{ColorMap, ACCENT};

use super::error::DataError;
use super::model::{present_cell, BenchmarkDataset};
use super::pipeline::{is_compute_column, numeric_cell, AxisSpec};
use super::regression::{self, Regression};

/// A single plotted observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    /// Hover label, from the dataset's label column ("AlphaGo", "Zen19").
    pub name: String,
    pub color: Color32,
}

/// Read one axis value from a record, log10-scaling compute-power columns
/// so hardware cost plots on the scale it is always shown at.
pub fn axis_value(
    record: &super::model::Record,
    axis: &AxisSpec,
) -> Result<f64, DataError> {
    let raw = numeric_cell(record, &axis.column)?;
    if is_compute_column(&axis.column) {
        // The filter guarantees raw > 0 for compute axes.
        Ok(raw.log10())
    } else {
        Ok(raw)
    }
}

/// Project the filtered view into chart points.
///
/// `view` holds record indices from the pipeline, so every record here has
/// valid values on both axes; rows that still fail (axis changed under a
/// stale view) are skipped rather than plotted as NaN.
pub fn project(
    dataset: &BenchmarkDataset,
    view: &[usize],
    x_axis: &AxisSpec,
    y_axis: &AxisSpec,
    label_column: Option<&str>,
    color_map: Option<&ColorMap>,
) -> Vec<ChartPoint> {
    view.iter()
        .filter_map(|&idx| {
            let record = &dataset.records[idx];
            let x = axis_value(record, x_axis).ok()?;
            let y = axis_value(record, y_axis).ok()?;

            let name = label_column
                .and_then(|col| present_cell(record, col))
                .map(|v| v.to_string())
                .unwrap_or_else(|| format!("record {idx}"));

            let color = color_map
                .and_then(|cm| record.get(&cm.column).map(|v| cm.color_for(v)))
                .unwrap_or(ACCENT);

            Some(ChartPoint { x, y, name, color })
        })
        .collect()
}

/// Fit the trend line over the same (log-scaled where applicable) series
/// the scatter shows, so the segment matches the displayed scale.
pub fn trend_line(
    dataset: &BenchmarkDataset,
    view: &[usize],
    x_axis: &AxisSpec,
    y_axis: &AxisSpec,
) -> Result<Regression, DataError> {
    let mut xs = Vec::with_capacity(view.len());
    let mut ys = Vec::with_capacity(view.len());
    for &idx in view {
        let record = &dataset.records[idx];
        if let (Ok(x), Ok(y)) = (axis_value(record, x_axis), axis_value(record, y_axis)) {
            xs.push(x);
            ys.push(y);
        }
    }
    regression::fit(&xs, &ys)
}

// ---------------------------------------------------------------------------
// Go-rating plot bands
// ---------------------------------------------------------------------------

/// A qualitative horizontal band on the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBand {
    pub from: f64,
    pub to: f64,
    pub label: &'static str,
    /// Alternating bands get a light tint.
    pub shaded: bool,
}

/// Kyu/dan skill bands for computer-go ELO axes.
const ELO_BANDS: [PlotBand; 5] = [
    PlotBand {
        from: -9_999_999.0,
        to: 200.0,
        label: "NOVICE PLAYER (20 kyu - 30 kyu)",
        shaded: true,
    },
    PlotBand {
        from: 200.0,
        to: 1200.0,
        label: "CASUAL PLAYER (10 kyu - 19 kyu)",
        shaded: false,
    },
    PlotBand {
        from: 1200.0,
        to: 2100.0,
        label: "INTERMEDIATE PLAYER (1 kyu - 9 kyu)",
        shaded: true,
    },
    PlotBand {
        from: 2100.0,
        to: 2700.0,
        label: "ADVANCED PLAYER (6 dan - 1 dan)",
        shaded: false,
    },
    PlotBand {
        from: 2700.0,
        to: 9000.0,
        label: "PROFESSIONAL (9 dan - 1 pro)",
        shaded: true,
    },
];

/// Static rating bands for the given y column; empty for everything that is
/// not a Go ELO axis.
pub fn plot_bands(y_column: &str) -> &'static [PlotBand] {
    if y_column.eq_ignore_ascii_case("elo") {
        &ELO_BANDS
    } else {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};
    use crate::data::pipeline::{filtered_view, SortDirection, SortSpec};

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn go_dataset() -> BenchmarkDataset {
        BenchmarkDataset::from_records(
            vec![
                record(&[
                    ("PROGRAM", CellValue::String("Zen".into())),
                    ("YEAR", CellValue::Integer(2011)),
                    ("GFLOPS", CellValue::Float(100.0)),
                ]),
                record(&[
                    ("PROGRAM", CellValue::String("AlphaGo".into())),
                    ("YEAR", CellValue::Integer(2016)),
                    ("GFLOPS", CellValue::Float(1000.0)),
                ]),
            ],
            vec!["PROGRAM".into(), "YEAR".into(), "GFLOPS".into()],
        )
    }

    #[test]
    fn compute_axes_are_log_scaled() {
        let ds = go_dataset();
        let x = AxisSpec::column("YEAR");
        let y = AxisSpec::column("GFLOPS");
        let view = filtered_view(&ds, &x, &y, &SortSpec::new("YEAR", SortDirection::Ascending));
        let points = project(&ds, &view, &x, &y, Some("PROGRAM"), None);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "Zen");
        assert!((points[0].y - 2.0).abs() < 1e-12); // log10(100)
        assert!((points[1].y - 3.0).abs() < 1e-12); // log10(1000)
        assert_eq!(points[0].x, 2011.0);
        assert_eq!(points[0].color, ACCENT);
    }

    #[test]
    fn trend_line_uses_the_displayed_scale() {
        let ds = go_dataset();
        let x = AxisSpec::column("YEAR");
        let y = AxisSpec::column("GFLOPS");
        let view = filtered_view(&ds, &x, &y, &SortSpec::new("YEAR", SortDirection::Ascending));
        let lr = trend_line(&ds, &view, &x, &y).unwrap();
        // log10(GFLOPS) goes 2 → 3 over 5 years.
        assert!((lr.slope - 0.2).abs() < 1e-12);
        assert_eq!(lr.points[0][0], 2011.0);
        assert_eq!(lr.points[1][0], 2016.0);
    }

    #[test]
    fn degenerate_view_reports_insufficient_data() {
        let ds = go_dataset();
        let x = AxisSpec::column("YEAR");
        let y = AxisSpec::column("GFLOPS");
        assert_eq!(
            trend_line(&ds, &[0], &x, &y),
            Err(DataError::DegenerateRegression)
        );
    }

    #[test]
    fn bands_only_apply_to_elo_axes() {
        let bands = plot_bands("ELO");
        assert_eq!(bands.len(), 5);
        assert_eq!(bands[4].label, "PROFESSIONAL (9 dan - 1 pro)");
        assert!(plot_bands("GDT_TS").is_empty());
        assert!(plot_bands("elo").len() == 5);
    }
}
