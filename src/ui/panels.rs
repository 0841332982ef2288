use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use flixboard::{Category, FilterState};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dash) = &state.dashboard else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let dataset = dash.dataset().clone();
    let filters = dash.filters().clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            category_filter(
                ui,
                state,
                "Type",
                Category::Type,
                dataset.distinct_values(Category::Type),
                &filters,
            );
            ui.separator();

            // ---- Year added range ----
            ui.strong("Year added");
            let (lo, hi) = dataset.year_bounds();
            let mut from = filters.year_range.min;
            let mut to = filters.year_range.max;
            let from_changed = ui
                .add(egui::Slider::new(&mut from, lo..=hi).text("from"))
                .changed();
            let to_changed = ui
                .add(egui::Slider::new(&mut to, lo..=hi).text("to"))
                .changed();
            if from_changed || to_changed {
                state.set_year_range(from, to);
            }
            ui.separator();

            category_filter(
                ui,
                state,
                "Genre",
                Category::MainGenre,
                dataset.distinct_values(Category::MainGenre),
                &filters,
            );
        });
}

/// Collapsible multi-select for one categorical column.
fn category_filter(
    ui: &mut Ui,
    state: &mut AppState,
    label: &str,
    category: Category,
    all_values: &[String],
    filters: &FilterState,
) {
    let selected = filters.selected(category);

    // Show count of selected / total in the header
    let header_text = format!("{label}  ({}/{})", selected.len(), all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(category == Category::Type)
        .show(ui, |ui: &mut Ui| {
            // Select all / none buttons
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(category);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(category);
                }
            });

            for value in all_values {
                let mut text = RichText::new(value);
                if category == Category::Type {
                    if let Some(colors) = &state.type_colors {
                        text = text.color(colors.color_for(value));
                    }
                }

                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_filter_value(category, value);
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
            let can_export = state.dashboard.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("⬇ Download filtered data…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dash) = &state.dashboard {
            ui.label(format!(
                "{} titles loaded, {} visible",
                dash.dataset().len(),
                state.summary.total
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Search box and results
// ---------------------------------------------------------------------------

/// Search box over the titles of the current view, with a result table.
pub fn search_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 Search titles");
    let Some(dash) = &state.dashboard else {
        return;
    };
    let dataset = dash.dataset().clone();

    if ui.text_edit_singleline(&mut state.search_query).changed() {
        state.research();
    }
    if state.search_query.trim().is_empty() {
        return;
    }

    ui.label(format!("Found {} results", state.search_hits.len()));

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(260.0)
        .column(TableColumn::remainder().at_least(200.0))
        .column(TableColumn::auto())
        .column(TableColumn::auto())
        .column(TableColumn::auto())
        .header(20.0, |mut header| {
            for name in ["Title", "Type", "Year added", "Genre"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.search_hits.len(), |mut row| {
                let Some(record) = dataset.get(state.search_hits[row.index()]) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(record.title.as_deref().unwrap_or(""));
                });
                row.col(|ui| {
                    ui.label(&record.title_type);
                });
                row.col(|ui| {
                    ui.label(record.year_added.to_string());
                });
                row.col(|ui| {
                    ui.label(&record.main_genre);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open titles dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .add_filter("CSV", &["csv"])
        .set_file_name(&state.config.export_file_name)
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
