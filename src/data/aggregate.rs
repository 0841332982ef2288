use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::FilteredView;
use super::model::{MOVIE, TV_SHOW};

/// Length of the genre ranking shown on the dashboard.
pub const TOP_GENRES: usize = 10;

/// Headroom added above the tallest trend bar so every playback frame
/// shares one y-axis.
pub const TREND_AXIS_HEADROOM: usize = 10;

/// A categorical value and the number of rows carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Rows added in `year` with type `title_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTypeCount {
    pub year: i32,
    pub title_type: String,
    pub count: usize,
}

/// All `(type, count)` bars of a single year, one step of the trend playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendFrame {
    pub year: i32,
    pub counts: Vec<CategoryCount>,
}

/// Read-only snapshot of everything the dashboard derives from a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
    /// Descending by count, ties in first-encountered order.
    pub type_counts: Vec<CategoryCount>,
    /// Same ordering as `type_counts`, truncated to the requested N.
    pub top_genres: Vec<CategoryCount>,
    /// Ascending by year, then by type name.
    pub year_type_trend: Vec<YearTypeCount>,
}

impl AggregateResult {
    /// The trend split into one frame per year, ascending.
    pub fn trend_frames(&self) -> Vec<TrendFrame> {
        let mut frames: Vec<TrendFrame> = Vec::new();
        for row in &self.year_type_trend {
            let entry = CategoryCount {
                value: row.title_type.clone(),
                count: row.count,
            };
            match frames.last_mut() {
                Some(frame) if frame.year == row.year => frame.counts.push(entry),
                _ => frames.push(TrendFrame {
                    year: row.year,
                    counts: vec![entry],
                }),
            }
        }
        frames
    }

    /// Upper bound of the trend chart's y-axis.
    pub fn trend_axis_max(&self) -> usize {
        self.year_type_trend
            .iter()
            .map(|row| row.count)
            .max()
            .unwrap_or(0)
            + TREND_AXIS_HEADROOM
    }
}

/// Summarize a view with the standard top-10 genre ranking.
pub fn summarize(view: &FilteredView<'_>) -> AggregateResult {
    summarize_top(view, TOP_GENRES)
}

/// Summarize a view, keeping the `top_n` most frequent genres.
pub fn summarize_top(view: &FilteredView<'_>, top_n: usize) -> AggregateResult {
    let mut types = EncounterCounter::default();
    let mut genres = EncounterCounter::default();
    let mut trend: BTreeMap<(i32, &str), usize> = BTreeMap::new();
    let mut movies = 0;
    let mut tv_shows = 0;

    for record in view.records() {
        match record.title_type.as_str() {
            MOVIE => movies += 1,
            TV_SHOW => tv_shows += 1,
            _ => {}
        }
        types.add(&record.title_type);
        genres.add(&record.main_genre);
        *trend
            .entry((record.year_added, record.title_type.as_str()))
            .or_default() += 1;
    }

    let mut top_genres = genres.ranked();
    top_genres.truncate(top_n);

    let year_type_trend = trend
        .into_iter()
        .map(|((year, title_type), count)| YearTypeCount {
            year,
            title_type: title_type.to_string(),
            count,
        })
        .collect();

    AggregateResult {
        total: view.len(),
        movies,
        tv_shows,
        type_counts: types.ranked(),
        top_genres,
        year_type_trend,
    }
}

/// Counts values while remembering the order they were first seen in.
#[derive(Default)]
struct EncounterCounter<'a> {
    slots: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, usize)>,
}

impl<'a> EncounterCounter<'a> {
    fn add(&mut self, value: &'a str) {
        let next = self.counts.len();
        let slot = *self.slots.entry(value).or_insert(next);
        if slot == next {
            self.counts.push((value, 0));
        }
        self.counts[slot].1 += 1;
    }

    /// Descending by count; the stable sort keeps first-encountered order
    /// among ties.
    fn ranked(self) -> Vec<CategoryCount> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .map(|(value, count)| CategoryCount {
                value: value.to_string(),
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Record};

    fn cc(value: &str, count: usize) -> CategoryCount {
        CategoryCount {
            value: value.to_string(),
            count,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new("A", TV_SHOW, 2020, "Comedy"),
            Record::new("B", MOVIE, 2019, "Drama"),
            Record::new("C", MOVIE, 2019, "Drama"),
            Record::new("D", MOVIE, 2020, "Action"),
            Record::new("E", "Short", 2018, "Comedy"),
            Record::new("F", TV_SHOW, 2019, "Horror"),
        ])
        .unwrap()
    }

    #[test]
    fn kpis_ignore_unknown_types() {
        let ds = dataset();
        let summary = summarize(&FilteredView::full(&ds));
        assert_eq!(summary.total, 6);
        assert_eq!(summary.movies, 3);
        assert_eq!(summary.tv_shows, 2);
        assert_eq!(
            summary.type_counts,
            vec![cc(MOVIE, 3), cc(TV_SHOW, 2), cc("Short", 1)]
        );
    }

    #[test]
    fn genre_ties_keep_encounter_order() {
        let ds = dataset();
        let summary = summarize(&FilteredView::full(&ds));
        assert_eq!(
            summary.top_genres,
            vec![cc("Comedy", 2), cc("Drama", 2), cc("Action", 1), cc("Horror", 1)]
        );
    }

    #[test]
    fn genre_ranking_is_truncated() {
        let records = (0..15)
            .map(|i| Record::new(format!("t{i}"), MOVIE, 2020, format!("genre{i}")))
            .collect();
        let ds = Dataset::from_records(records).unwrap();
        let summary = summarize(&FilteredView::full(&ds));
        assert_eq!(summary.top_genres.len(), TOP_GENRES);
        assert_eq!(summary.top_genres[0].value, "genre0");

        assert_eq!(summarize_top(&FilteredView::full(&ds), 3).top_genres.len(), 3);
    }

    #[test]
    fn trend_is_sorted_by_year_then_type() {
        let ds = dataset();
        let summary = summarize(&FilteredView::full(&ds));
        let keys: Vec<(i32, &str)> = summary
            .year_type_trend
            .iter()
            .map(|r| (r.year, r.title_type.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2018, "Short"),
                (2019, MOVIE),
                (2019, TV_SHOW),
                (2020, MOVIE),
                (2020, TV_SHOW),
            ]
        );
        assert_eq!(summary.year_type_trend[1].count, 2);
    }

    #[test]
    fn trend_frames_group_by_year() {
        let ds = dataset();
        let summary = summarize(&FilteredView::full(&ds));
        let frames = summary.trend_frames();
        let years: Vec<i32> = frames.iter().map(|f| f.year).collect();
        assert_eq!(years, vec![2018, 2019, 2020]);
        assert_eq!(frames[1].counts, vec![cc(MOVIE, 2), cc(TV_SHOW, 1)]);
        assert_eq!(summary.trend_axis_max(), 12);
    }

    #[test]
    fn empty_view_yields_zeroes() {
        let ds = dataset();
        let view = crate::data::filter::apply(
            &ds,
            &crate::data::filter::FilterState {
                types: Default::default(),
                ..crate::data::filter::FilterState::all(&ds)
            },
        );
        let summary = summarize(&view);
        assert_eq!(summary, AggregateResult::default());
        assert!(summary.trend_frames().is_empty());
        assert_eq!(summary.trend_axis_max(), TREND_AXIS_HEADROOM);
    }
}
