use std::time::Duration;

use eframe::egui::{Color32, RichText, Slider, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};
use flixboard::{Category, CategoryCount};

use crate::color::{sequential_palette, ColorMap};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Dashboard body (central panel)
// ---------------------------------------------------------------------------

/// Render the KPI cards and the three charts.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if state.dashboard.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a titles dataset to start  (File → Open…)");
        });
        return;
    }

    ui.heading("🎬 Titles Dashboard");
    kpi_cards(ui, state);
    ui.separator();

    ui.heading("📊 Count of Movies vs TV Shows");
    type_chart(ui, state);

    ui.heading("🎭 Top Genres");
    genre_chart(ui, &state.summary.top_genres);

    ui.heading("📈 Titles added per year");
    trend_chart(ui, state);
}

fn kpi_cards(ui: &mut Ui, state: &AppState) {
    let s = &state.summary;
    ui.columns(3, |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip([
            ("Total Titles", s.total),
            ("Movies", s.movies),
            ("TV Shows", s.tv_shows),
        ]) {
            col.vertical_centered(|ui: &mut Ui| {
                ui.label(label);
                ui.label(RichText::new(value.to_string()).size(28.0).strong());
            });
        }
    });
}

/// One single-bar chart per type so the legend names each bar. Each value
/// sits at its index in `slots`, so a bar keeps its place when others are
/// absent.
fn category_bars(
    ui: &mut Ui,
    id: &str,
    counts: &[CategoryCount],
    slots: &[String],
    colors: Option<&ColorMap>,
    y_max: Option<f64>,
) {
    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_y(0.0);
    if let Some(max) = y_max {
        plot = plot.include_y(max);
    }

    plot.show(ui, |plot_ui| {
        for (i, entry) in counts.iter().enumerate() {
            let color = colors
                .map(|c| c.color_for(&entry.value))
                .unwrap_or(Color32::LIGHT_BLUE);
            let x = bar_slot(slots, &entry.value, i);
            let bar = Bar::new(x as f64, entry.count as f64)
                .width(0.6)
                .name(&entry.value);
            plot_ui.bar_chart(BarChart::new(vec![bar]).name(&entry.value).color(color));
        }
    });
}

fn type_chart(ui: &mut Ui, state: &AppState) {
    category_bars(
        ui,
        "type_chart",
        &state.summary.type_counts,
        type_slots(state),
        state.type_colors.as_ref(),
        None,
    );
}

/// x position of `value`: its slot if known, otherwise after every slot.
fn bar_slot(slots: &[String], value: &str, fallback: usize) -> usize {
    slots
        .iter()
        .position(|s| s == value)
        .unwrap_or(slots.len() + fallback)
}

fn type_slots(state: &AppState) -> &[String] {
    state
        .dashboard
        .as_ref()
        .map(|d| d.dataset().distinct_values(Category::Type))
        .unwrap_or_default()
}

/// Horizontal ranking, highest count on top.
fn genre_chart(ui: &mut Ui, top_genres: &[CategoryCount]) {
    let palette = sequential_palette(top_genres.len());
    let n = top_genres.len();

    Plot::new("genre_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(0.0)
        .show(ui, |plot_ui| {
            for (rank, (entry, color)) in top_genres.iter().zip(palette).enumerate() {
                let bar = Bar::new((n - rank) as f64, entry.count as f64)
                    .width(0.7)
                    .name(&entry.value);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .horizontal()
                        .name(&entry.value)
                        .color(color),
                );
            }
        });
}

/// Per-type bars for one year at a time, with play / pause and a year slider.
/// The y-axis is fixed across years so the playback is comparable.
fn trend_chart(ui: &mut Ui, state: &mut AppState) {
    let frames = state.summary.trend_frames();
    if frames.is_empty() {
        ui.label("No titles match the current filters.");
        return;
    }
    let last = frames.len() - 1;

    // Advance playback.
    let now = ui.input(|i| i.time);
    let step = state.config.trend_frame_ms as f64 / 1000.0;
    if state.trend.playing {
        if now - state.trend.last_step >= step {
            state.trend.last_step = now;
            if state.trend.frame >= last {
                state.trend.playing = false;
            } else {
                state.trend.frame += 1;
            }
        }
        ui.ctx()
            .request_repaint_after(Duration::from_millis(state.config.trend_frame_ms));
    }
    state.trend.frame = state.trend.frame.min(last);

    ui.horizontal(|ui: &mut Ui| {
        let label = if state.trend.playing { "⏸ Pause" } else { "▶ Play" };
        if ui.button(label).clicked() {
            if !state.trend.playing && state.trend.frame >= last {
                state.trend.frame = 0;
            }
            state.trend.playing = !state.trend.playing;
            state.trend.last_step = now;
        }
        ui.add(Slider::new(&mut state.trend.frame, 0..=last).show_value(false));
        ui.strong(frames[state.trend.frame].year.to_string());
    });

    let frame = &frames[state.trend.frame];
    category_bars(
        ui,
        "trend_chart",
        &frame.counts,
        type_slots(state),
        state.type_colors.as_ref(),
        Some(state.summary.trend_axis_max() as f64),
    );
}
