//! Filter-and-aggregate engine behind the titles dashboard.
//!
//! A [`Dataset`] is loaded once and never mutated. Every filter change runs
//! the same pure pipeline: [`apply`] produces a [`FilteredView`], from which
//! [`summarize`], [`search`] and [`export`] derive what the UI shows.
//! [`Dashboard`] bundles that pipeline with the current filter state.

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;

pub use config::Config;
pub use dashboard::Dashboard;
pub use data::aggregate::{
    summarize, summarize_top, AggregateResult, CategoryCount, TrendFrame, YearTypeCount, TOP_GENRES,
};
pub use data::export::{export, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
pub use data::filter::{apply, FilterState, FilteredView, YearRange};
pub use data::loader::load;
pub use data::model::{Category, Column, Dataset, Record, MOVIE, TV_SHOW};
pub use data::search::search;
pub use error::{Error, Result};
