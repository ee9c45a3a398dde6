use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – chart and axis selection
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Bench Scope");
    if !state.benchmark_name.is_empty() {
        ui.label(RichText::new(&state.benchmark_name).italics());
    }
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let numeric_columns = dataset.numeric_columns();
    let all_columns = dataset.column_names.clone();
    let presets = state.presets.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Chart presets ----
            if !presets.is_empty() {
                ui.strong("Chart");
                for (i, preset) in presets.iter().enumerate() {
                    if ui
                        .selectable_label(state.active_preset == Some(i), &preset.title)
                        .clicked()
                    {
                        state.select_preset(i);
                    }
                }
                ui.separator();
            }

            // ---- Axis selectors ----
            ui.strong("X axis");
            let current_x = state.x_axis.column.clone();
            egui::ComboBox::from_id_salt("x_axis")
                .selected_text(&current_x)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &numeric_columns {
                        if ui.selectable_label(current_x == *col, col).clicked() {
                            state.set_x_axis(col.clone());
                        }
                    }
                });

            ui.strong("Y axis");
            let current_y = state.y_axis.column.clone();
            egui::ComboBox::from_id_salt("y_axis")
                .selected_text(&current_y)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &numeric_columns {
                        if ui.selectable_label(current_y == *col, col).clicked() {
                            state.set_y_axis(col.clone());
                        }
                    }
                });
            ui.separator();

            // ---- Colour-by selector ----
            ui.strong("Color by");
            let current_color = state.color_column.clone();
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(current_color.as_deref().unwrap_or("None"))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current_color.is_none(), "None").clicked() {
                        state.set_color_column(None);
                    }
                    for col in &all_columns {
                        if ui
                            .selectable_label(current_color.as_deref() == Some(col), col)
                            .clicked()
                        {
                            state.set_color_column(Some(col.clone()));
                        }
                    }
                });

            // ---- Legend for the active colour map ----
            if let Some(cm) = &state.color_map {
                ui.add_space(4.0);
                for (label, color) in cm.legend_entries() {
                    ui.label(RichText::new(format!("■ {label}")).color(color));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} plotted",
                ds.len(),
                state.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open benchmark data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("benchmark")
            .to_string();
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                state.set_dataset(name, dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

pub fn export_csv_dialog(state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export benchmark data")
        .set_file_name(format!("{}.csv", state.benchmark_name))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match crate::data::export::write_csv(dataset, &path) {
            Ok(()) => {
                log::info!("Exported {} records to {}", dataset.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
