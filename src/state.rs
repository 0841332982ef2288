use std::path::Path;
use std::sync::Arc;

use flixboard::{AggregateResult, Category, Config, Dashboard, Dataset, FilterState, YearRange};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Loaded dataset and its filter session (None until a file loads).
    pub dashboard: Option<Dashboard>,

    /// Aggregates of the current view (cached, rebuilt on filter change).
    pub summary: AggregateResult,

    /// Contents of the search box.
    pub search_query: String,

    /// Dataset rows matching `search_query` within the current view (cached).
    pub search_hits: Vec<usize>,

    /// Colours for the `type` values.
    pub type_colors: Option<ColorMap>,

    /// Trend playback position.
    pub trend: TrendPlayback,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

/// Which year of the trend chart is on screen.
#[derive(Debug, Default)]
pub struct TrendPlayback {
    pub frame: usize,
    pub playing: bool,
    /// egui time (seconds) of the last automatic step.
    pub last_step: f64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dashboard: None,
            summary: AggregateResult::default(),
            search_query: String::new(),
            search_hits: Vec::new(),
            type_colors: None,
            trend: TrendPlayback::default(),
            status_message: None,
        }
    }

    /// Load a dataset file and make it the active one. On failure the
    /// previous dataset (if any) stays loaded.
    pub fn open(&mut self, path: &Path) {
        match flixboard::load(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.type_colors = Some(ColorMap::new(dataset.distinct_values(Category::Type)));
        let dashboard =
            Dashboard::new(Arc::new(dataset)).with_top_genres(self.config.top_genres);
        self.dashboard = Some(dashboard);
        self.trend = TrendPlayback::default();
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the cached summary and search hits after a filter change.
    pub fn refilter(&mut self) {
        if let Some(dash) = &self.dashboard {
            self.summary = dash.summary();
            let frames = self.summary.trend_frames().len();
            if self.trend.frame >= frames {
                self.trend.frame = frames.saturating_sub(1);
            }
        }
        self.research();
    }

    /// Recompute `search_hits` after the query or the view changed.
    pub fn research(&mut self) {
        if let Some(dash) = &self.dashboard {
            self.search_hits = dash.search(&self.search_query).indices().to_vec();
        }
    }

    fn edit_filters(&mut self, edit: impl FnOnce(&mut FilterState)) {
        let Some(dash) = &mut self.dashboard else {
            return;
        };
        match dash.update_filters(edit) {
            Ok(()) => {
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::warn!("{e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, category: Category, value: &str) {
        self.edit_filters(|f| f.toggle(category, value));
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, category: Category) {
        let Some(dataset) = self.dashboard.as_ref().map(|d| Arc::clone(d.dataset())) else {
            return;
        };
        self.edit_filters(|f| f.select_all(&dataset, category));
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, category: Category) {
        self.edit_filters(|f| f.select_none(category));
    }

    pub fn set_year_range(&mut self, min: i32, max: i32) {
        self.edit_filters(|f| f.year_range = YearRange::new(min, max));
    }

    /// Write the current view as CSV to `path`.
    pub fn export_to(&mut self, path: &Path) {
        let Some(dash) = &self.dashboard else {
            return;
        };
        let result = dash.export().map_err(|e| e.to_string()).and_then(|bytes| {
            std::fs::write(path, &bytes).map_err(|e| format!("writing {}: {e}", path.display()))
        });
        match result {
            Ok(()) => {
                log::info!("Exported filtered data to {}", path.display());
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
