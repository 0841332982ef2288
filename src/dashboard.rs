use std::sync::Arc;

use crate::data::aggregate::{summarize_top, AggregateResult, TOP_GENRES};
use crate::data::export::export;
use crate::data::filter::{apply, FilterState, FilteredView};
use crate::data::model::Dataset;
use crate::data::search::search;
use crate::error::Result;

/// One user's exploration session over a shared, immutable dataset.
///
/// Holds the last valid [`FilterState`] and the row indices it selects. The
/// view is recomputed only when the state actually changes.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    filters: FilterState,
    visible: Vec<usize>,
    top_genres: usize,
}

impl Dashboard {
    /// Start with every record selected.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let filters = FilterState::all(&dataset);
        let visible = apply(&dataset, &filters).indices().to_vec();
        Dashboard {
            dataset,
            filters,
            visible,
            top_genres: TOP_GENRES,
        }
    }

    /// Length of the genre ranking in [`Dashboard::summary`].
    pub fn with_top_genres(mut self, top_genres: usize) -> Self {
        self.top_genres = top_genres;
        self
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Replace the filter state.
    ///
    /// An invalid state is rejected with [`crate::Error::InvalidFilterState`]
    /// and the previous state stays in effect.
    pub fn set_filters(&mut self, filters: FilterState) -> Result<()> {
        filters.validate(&self.dataset)?;
        if filters == self.filters {
            return Ok(());
        }
        self.visible = apply(&self.dataset, &filters).indices().to_vec();
        log::debug!(
            "Filters changed: {} of {} titles visible",
            self.visible.len(),
            self.dataset.len()
        );
        self.filters = filters;
        Ok(())
    }

    /// Edit a copy of the current state and apply it.
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut FilterState)) -> Result<()> {
        let mut next = self.filters.clone();
        edit(&mut next);
        self.set_filters(next)
    }

    /// The records passing the current filters.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::from_indices(&self.dataset, self.visible.clone())
    }

    pub fn summary(&self) -> AggregateResult {
        summarize_top(&self.view(), self.top_genres)
    }

    /// Titles in the current view containing `query`.
    pub fn search(&self, query: &str) -> FilteredView<'_> {
        search(&self.view(), query)
    }

    /// CSV bytes of the current view.
    pub fn export(&self) -> Result<Vec<u8>> {
        export(&self.view())
    }
}
