use std::collections::BTreeSet;

use crate::error::{Error, Result};

use super::model::{Category, Dataset, Record};

// ---------------------------------------------------------------------------
// Filter predicate: selected categories plus an inclusive year range
// ---------------------------------------------------------------------------

/// Inclusive `year_added` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        YearRange { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// The active filter selections.
///
/// Ordered sets keep the state canonical: two states selecting the same
/// values compare equal regardless of the order the user clicked them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub types: BTreeSet<String>,
    pub year_range: YearRange,
    pub genres: BTreeSet<String>,
}

impl FilterState {
    /// Everything selected (i.e., show every record).
    pub fn all(dataset: &Dataset) -> Self {
        let (min, max) = dataset.year_bounds();
        FilterState {
            types: dataset
                .distinct_values(Category::Type)
                .iter()
                .cloned()
                .collect(),
            year_range: YearRange::new(min, max),
            genres: dataset
                .distinct_values(Category::MainGenre)
                .iter()
                .cloned()
                .collect(),
        }
    }

    /// Reject a year range that is inverted or leaves the dataset's
    /// observed bounds.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        let YearRange { min, max } = self.year_range;
        if min > max {
            return Err(Error::InvalidFilterState(format!(
                "year range start {min} is after its end {max}"
            )));
        }
        let (lo, hi) = dataset.year_bounds();
        if min < lo || max > hi {
            return Err(Error::InvalidFilterState(format!(
                "year range {min}..={max} is outside the dataset's {lo}..={hi}"
            )));
        }
        Ok(())
    }

    pub fn selected(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Type => &self.types,
            Category::MainGenre => &self.genres,
        }
    }

    fn selected_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Type => &mut self.types,
            Category::MainGenre => &mut self.genres,
        }
    }

    /// Toggle a single value in a categorical selection.
    pub fn toggle(&mut self, category: Category, value: &str) {
        let selected = self.selected_mut(category);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Select every known value of a column.
    pub fn select_all(&mut self, dataset: &Dataset, category: Category) {
        *self.selected_mut(category) = dataset.distinct_values(category).iter().cloned().collect();
    }

    /// Deselect everything in a column. Nothing selected means nothing matches.
    pub fn select_none(&mut self, category: Category) {
        self.selected_mut(category).clear();
    }

    /// Whether a record passes all three predicates.
    pub fn matches(&self, record: &Record) -> bool {
        self.types.contains(record.category(Category::Type))
            && self.year_range.contains(record.year_added)
            && self.genres.contains(record.category(Category::MainGenre))
    }
}

// ---------------------------------------------------------------------------
// FilteredView – indices of the records passing the filters
// ---------------------------------------------------------------------------

/// A read-only subset of a [`Dataset`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

// Two views are equal when they select the same rows of the same dataset.
impl PartialEq for FilteredView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.indices == other.indices
    }
}

impl Eq for FilteredView<'_> {}

impl<'a> FilteredView<'a> {
    /// The whole dataset, unfiltered.
    pub fn full(dataset: &'a Dataset) -> Self {
        FilteredView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub(crate) fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        FilteredView { dataset, indices }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Dataset row indices of the records in the view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Records in view order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}

/// Return the records that pass all active filters.
///
/// A record passes when:
/// * its type is in the selected types
/// * its `year_added` lies inside the inclusive year range
/// * its main genre is in the selected genres
///
/// An empty type or genre selection therefore yields an empty view.
pub fn apply<'a>(dataset: &'a Dataset, filters: &FilterState) -> FilteredView<'a> {
    if filters.types.is_empty() || filters.genres.is_empty() {
        return FilteredView::from_indices(dataset, Vec::new());
    }

    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| filters.matches(record))
        .map(|(i, _)| i)
        .collect();

    FilteredView::from_indices(dataset, indices)
}
