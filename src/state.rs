use crate::color::ColorMap;
use crate::data::model::BenchmarkDataset;
use crate::data::pipeline::{
    self, derive_presets, filtered_view, is_compute_column, AxisSpec, ChartPreset,
    SortDirection, SortSpec,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<BenchmarkDataset>,

    /// Benchmark name, from the loaded file's stem ("computer-go").
    pub benchmark_name: String,

    /// Preset axis pairs derived from the dataset columns.
    pub presets: Vec<ChartPreset>,

    /// Index of the selected preset, if an unmodified preset is active.
    pub active_preset: Option<usize>,

    /// Current chart axes.
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,

    /// Current table sort.
    pub sort: SortSpec,

    /// Whether the table shows every row or only the first page.
    pub show_more: bool,

    /// Indices of records passing the axis filter, in sort order (cached;
    /// rebuilt in full on every dataset/axis/sort change).
    pub view: Vec<usize>,

    /// Column used to name chart points.
    pub label_column: Option<String>,

    /// Which column is used for colouring points.
    pub color_column: Option<String>,

    /// Active colour map.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            benchmark_name: String::new(),
            presets: Vec::new(),
            active_preset: None,
            x_axis: AxisSpec::column("YEAR"),
            y_axis: AxisSpec::column("YEAR"),
            sort: SortSpec::new("YEAR", SortDirection::Ascending),
            show_more: false,
            view: Vec::new(),
            label_column: None,
            color_column: None,
            color_map: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: derive presets, pick default axes and
    /// sort, and build the first view.
    pub fn set_dataset(&mut self, name: String, dataset: BenchmarkDataset) {
        self.presets = derive_presets(&dataset);
        self.label_column = dataset.label_column();

        if let Some(preset) = self.presets.first() {
            self.x_axis = preset.x.clone();
            self.y_axis = preset.y.clone();
            self.active_preset = Some(0);
        } else {
            // No recognisable year/compute/score columns: fall back to the
            // first two numeric columns.
            let numeric = dataset.numeric_columns();
            if let Some(col) = numeric.first() {
                self.x_axis = AxisSpec::column(col.clone());
            }
            if let Some(col) = numeric.get(1).or_else(|| numeric.first()) {
                self.y_axis = AxisSpec::column(col.clone());
            }
            self.active_preset = None;
        }

        self.sort = SortSpec::new(self.x_axis.column.clone(), SortDirection::Ascending);
        self.show_more = false;
        self.color_column = None;
        self.color_map = None;
        self.benchmark_name = name;

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Switch to a preset chart (axis pair).
    pub fn select_preset(&mut self, index: usize) {
        if let Some(preset) = self.presets.get(index) {
            self.x_axis = preset.x.clone();
            self.y_axis = preset.y.clone();
            self.active_preset = Some(index);
            self.refilter();
        }
    }

    /// Select a raw column for one of the axes.
    pub fn set_x_axis(&mut self, column: String) {
        self.x_axis = axis_for(column);
        self.active_preset = None;
        self.refilter();
    }

    pub fn set_y_axis(&mut self, column: String) {
        self.y_axis = axis_for(column);
        self.active_preset = None;
        self.refilter();
    }

    /// Handle a header click: toggle on the active column, otherwise reset
    /// to the column's default direction.
    pub fn request_sort(&mut self, column: &str) {
        self.sort.request(column, default_direction(column));
        self.refilter();
    }

    /// Recompute the cached view after any input change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.view = filtered_view(ds, &self.x_axis, &self.y_axis, &self.sort);
        } else {
            self.view.clear();
        }
    }

    /// The rows the table currently exposes (first page or everything).
    pub fn visible_rows(&self) -> &[usize] {
        pipeline::paginate(&self.view, self.show_more)
    }

    /// Set colour column and rebuild the map.
    pub fn set_color_column(&mut self, col: Option<String>) {
        self.color_column = col;
        self.color_map = match (&self.color_column, &self.dataset) {
            (Some(col), Some(ds)) => ds
                .unique_values
                .get(col)
                .map(|vals| ColorMap::new(col, vals)),
            _ => None,
        };
    }
}

/// Build an axis spec for a raw column, giving compute-power columns their
/// conventional display label.
fn axis_for(column: String) -> AxisSpec {
    if is_compute_column(&column) {
        AxisSpec::new(format!("Computing Power ({column})"), column)
    } else {
        AxisSpec::column(column)
    }
}

/// Compute-power columns sort largest-first by default; everything else
/// smallest-first.
fn default_direction(column: &str) -> SortDirection {
    if is_compute_column(column) {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn dataset() -> BenchmarkDataset {
        let rows: Vec<Record> = (0..12)
            .map(|i| {
                [
                    ("PROGRAM".to_string(), CellValue::String(format!("p{i}"))),
                    ("YEAR".to_string(), CellValue::Integer(2000 + i)),
                    ("ELO".to_string(), CellValue::Integer(100 * i)),
                    ("GFLOPS".to_string(), CellValue::Float(10f64.powi(i as i32))),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        BenchmarkDataset::from_records(
            rows,
            vec![
                "PROGRAM".into(),
                "YEAR".into(),
                "ELO".into(),
                "GFLOPS".into(),
            ],
        )
    }

    #[test]
    fn loading_a_dataset_selects_the_first_preset() {
        let mut state = AppState::default();
        state.set_dataset("computer-go".into(), dataset());
        assert_eq!(state.active_preset, Some(0));
        assert_eq!(state.x_axis.column, "YEAR");
        assert_eq!(state.y_axis.column, "ELO");
        assert_eq!(state.label_column, Some("PROGRAM".into()));
        assert_eq!(state.view.len(), 12);
        // First page only until the user asks for more.
        assert_eq!(state.visible_rows().len(), 10);
        state.show_more = true;
        assert_eq!(state.visible_rows().len(), 12);
    }

    #[test]
    fn header_clicks_toggle_and_reset() {
        let mut state = AppState::default();
        state.set_dataset("computer-go".into(), dataset());

        state.request_sort("ELO");
        assert_eq!(state.sort.direction, SortDirection::Ascending);
        state.request_sort("ELO");
        assert_eq!(state.sort.direction, SortDirection::Descending);
        // Compute columns default to descending.
        state.request_sort("GFLOPS");
        assert_eq!(state.sort.direction, SortDirection::Descending);
    }

    #[test]
    fn changing_an_axis_clears_the_preset() {
        let mut state = AppState::default();
        state.set_dataset("computer-go".into(), dataset());
        state.set_y_axis("GFLOPS".into());
        assert_eq!(state.active_preset, None);
        assert_eq!(state.y_axis.name, "Computing Power (GFLOPS)");
    }
}
