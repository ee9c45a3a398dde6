use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::BAND_TINT;
use crate::data::pipeline::is_compute_column;
use crate::data::project::{plot_bands, project, trend_line};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Benchmark scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter chart with trend line and rating bands.
pub fn benchmark_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a benchmark file to browse it  (File → Open…)");
        });
        return;
    };

    // The site hides the chart below 3 points; same threshold here.
    if state.view.len() <= 2 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Not enough data is available for this benchmark. Try changing the axes.");
        });
        return;
    }

    let points = project(
        dataset,
        &state.view,
        &state.x_axis,
        &state.y_axis,
        state.label_column.as_deref(),
        state.color_map.as_ref(),
    );
    let trend = trend_line(dataset, &state.view, &state.x_axis, &state.y_axis);
    let bands = plot_bands(&state.y_axis.column);

    // The plot fills the remaining space, so the caption goes first.
    match &trend {
        Ok(lr) => {
            ui.label(format!(
                "Trend: slope {:.3}, intercept {:.3}, R² = {:.3}",
                lr.slope, lr.intercept, lr.r2
            ));
        }
        Err(_) => {
            ui.label("Insufficient data for a trend line.");
        }
    }

    Plot::new("benchmark_plot")
        .x_axis_label(axis_label(&state.x_axis))
        .y_axis_label(axis_label(&state.y_axis))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let bounds = plot_ui.plot_bounds();

            // ---- Rating bands behind everything else ----
            for band in bands {
                let from = band.from.max(bounds.min()[1]);
                let to = band.to.min(bounds.max()[1]);
                if from >= to {
                    continue;
                }
                let (x0, x1) = (bounds.min()[0], bounds.max()[0]);
                if band.shaded {
                    let corners: PlotPoints =
                        vec![[x0, from], [x1, from], [x1, to], [x0, to]].into();
                    plot_ui.polygon(
                        Polygon::new(corners)
                            .fill_color(BAND_TINT)
                            .stroke(Stroke::NONE),
                    );
                }
                plot_ui.text(
                    Text::new(
                        PlotPoint::new((x0 + x1) / 2.0, (from + to) / 2.0),
                        band.label,
                    )
                    .color(Color32::GRAY),
                );
            }

            // ---- Observations, one series per record so hover shows
            //      the record name ----
            for p in &points {
                plot_ui.points(
                    Points::new(vec![[p.x, p.y]])
                        .name(&p.name)
                        .color(p.color)
                        .radius(4.0),
                );
            }

            // ---- Trend segment on the same scale as the scatter ----
            if let Ok(lr) = &trend {
                let segment: PlotPoints = lr.points.to_vec().into();
                plot_ui.line(
                    Line::new(segment)
                        .color(Color32::DARK_GRAY)
                        .width(2.0)
                        .name("Trend"),
                );
            }
        });
}

/// Axis caption; compute axes are drawn on a log scale and say so.
fn axis_label(axis: &crate::data::pipeline::AxisSpec) -> String {
    if is_compute_column(&axis.column) {
        format!("{} (log10 scale)", axis.name)
    } else {
        axis.name.clone()
    }
}
