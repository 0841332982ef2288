mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::FlixboardApp;
use eframe::egui;
use flixboard::Config;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::load(std::env::args_os().nth(1).map(PathBuf::from)).unwrap_or_else(|e| {
        log::error!("{e}; falling back to the default configuration");
        Config::default()
    });

    let mut state = AppState::new(config);
    let data_path = state.config.data_path.clone();
    state.open(&data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flixboard – Titles Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(FlixboardApp { state }))),
    )
}
