use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::present_cell;
use crate::data::pipeline::{is_compute_column, SortDirection, PAGE_LIMIT};
use crate::data::units::format_unit;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Benchmark table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the sortable, paginated record table.
pub fn benchmark_table(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No dataset loaded.");
        });
        return;
    };

    let columns = dataset.column_names.clone();
    let rows: Vec<usize> = state.visible_rows().to_vec();
    let total = state.view.len();

    let mut sort_request: Option<String> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(80.0).clip(true), columns.len())
        .header(24.0, |mut header| {
            for col in &columns {
                header.col(|ui: &mut Ui| {
                    let active = state.sort.column == *col;
                    let arrow = match (active, state.sort.direction) {
                        (true, SortDirection::Ascending) => "  ⬆",
                        (true, SortDirection::Descending) => "  ⬇",
                        (false, _) => "",
                    };
                    let text = RichText::new(format!("{}{arrow}", col.to_uppercase())).strong();
                    if ui.button(text).clicked() {
                        sort_request = Some(col.clone());
                    }
                });
            }
        })
        .body(|mut body| {
            if rows.is_empty() {
                body.row(20.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label("No data available");
                    });
                    for _ in 1..columns.len() {
                        row.col(|_ui| {});
                    }
                });
                return;
            }
            for &idx in &rows {
                let record = &dataset.records[idx];
                body.row(20.0, |mut row| {
                    for col in &columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell_text(record, col));
                        });
                    }
                });
            }
        });

    if let Some(col) = sort_request {
        state.request_sort(&col);
    }

    // ---- Show more / show less ----
    if total > PAGE_LIMIT {
        ui.vertical_centered(|ui: &mut Ui| {
            let label = if state.show_more {
                "Show less".to_string()
            } else {
                format!("Show more ({total} rows)")
            };
            if ui.button(label).clicked() {
                state.show_more = !state.show_more;
            }
        });
    }
}

/// Display text for one table cell: "-" for missing values, metric-prefixed
/// FLOPs for compute-power columns (stored as GFLOPS in the datasets).
fn cell_text(record: &crate::data::model::Record, column: &str) -> String {
    match present_cell(record, column) {
        None => "-".to_string(),
        Some(v) => {
            if is_compute_column(column) {
                match v.as_f64() {
                    Some(gflops) => format_unit(gflops * 1e9, "FLOPs"),
                    None => "-".to_string(),
                }
            } else {
                v.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    #[test]
    fn compute_cells_render_with_metric_prefixes() {
        let mut rec = Record::new();
        rec.insert("GFLOPS".into(), CellValue::Float(1.5));
        rec.insert("YEAR".into(), CellValue::Integer(2016));
        rec.insert("ELO".into(), CellValue::Null);

        // 1.5 GFLOPS = 1.5e9 FLOPs
        assert_eq!(cell_text(&rec, "GFLOPS"), "1.50 GFLOPs");
        assert_eq!(cell_text(&rec, "YEAR"), "2016");
        assert_eq!(cell_text(&rec, "ELO"), "-");
        assert_eq!(cell_text(&rec, "TEAM"), "-");
    }
}
