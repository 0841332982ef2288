//! Property tests for the filter / aggregate / search pipeline.

use std::collections::BTreeSet;

use proptest::prelude::*;

use flixboard::{
    apply, search, summarize, Dataset, FilterState, FilteredView, Record, YearRange, MOVIE,
    TOP_GENRES, TV_SHOW,
};

fn arb_type() -> impl Strategy<Value = String> {
    prop::sample::select(vec![MOVIE, TV_SHOW, "Special"]).prop_map(String::from)
}

fn arb_genre() -> impl Strategy<Value = String> {
    (0u8..14).prop_map(|g| format!("Genre {g}"))
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        prop::option::weighted(0.9, "[A-Za-z ]{1,12}"),
        arb_type(),
        2008i32..2022,
        arb_genre(),
    )
        .prop_map(|(title, title_type, year, genre)| {
            let mut record = Record::new("", title_type, year, genre);
            record.title = title;
            record
        })
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arb_record(), 1..80)
        .prop_map(|records| Dataset::from_records(records).unwrap())
}

/// A dataset plus a random (valid) filter state over it.
fn arb_dataset_and_filters() -> impl Strategy<Value = (Dataset, FilterState)> {
    arb_dataset().prop_flat_map(|ds| {
        let types: Vec<String> = ds.distinct_values(flixboard::Category::Type).to_vec();
        let genres: Vec<String> = ds.distinct_values(flixboard::Category::MainGenre).to_vec();
        let (lo, hi) = ds.year_bounds();
        (
            Just(ds),
            prop::sample::subsequence(types.clone(), 0..=types.len()),
            prop::sample::subsequence(genres.clone(), 0..=genres.len()),
            lo..=hi,
            lo..=hi,
        )
            .prop_map(|(ds, types, genres, a, b)| {
                let filters = FilterState {
                    types: types.into_iter().collect(),
                    year_range: YearRange::new(a.min(b), a.max(b)),
                    genres: genres.into_iter().collect(),
                };
                (ds, filters)
            })
    })
}

proptest! {
    #[test]
    fn empty_selection_yields_empty_view((ds, filters) in arb_dataset_and_filters()) {
        let no_types = FilterState { types: BTreeSet::new(), ..filters.clone() };
        prop_assert!(apply(&ds, &no_types).is_empty());
        let no_genres = FilterState { genres: BTreeSet::new(), ..filters };
        prop_assert!(apply(&ds, &no_genres).is_empty());
    }

    #[test]
    fn apply_is_idempotent_and_ordered((ds, filters) in arb_dataset_and_filters()) {
        let first = apply(&ds, &filters);
        let second = apply(&ds, &filters);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.indices().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(first.records().all(|r| filters.matches(r)));

        let expected = ds.records().iter().filter(|r| filters.matches(r)).count();
        prop_assert_eq!(first.len(), expected);
    }

    #[test]
    fn summary_is_consistent_with_the_view((ds, filters) in arb_dataset_and_filters()) {
        let view = apply(&ds, &filters);
        let summary = summarize(&view);

        prop_assert_eq!(summary.total, view.len());
        prop_assert!(summary.movies + summary.tv_shows <= summary.total);
        prop_assert_eq!(summary.type_counts.iter().map(|c| c.count).sum::<usize>(), summary.total);
        prop_assert_eq!(summary.year_type_trend.iter().map(|c| c.count).sum::<usize>(), summary.total);

        prop_assert!(summary.top_genres.len() <= TOP_GENRES);
        prop_assert!(summary.top_genres.windows(2).all(|w| w[0].count >= w[1].count));
        prop_assert!(summary.type_counts.windows(2).all(|w| w[0].count >= w[1].count));
        prop_assert!(summary.year_type_trend.windows(2).all(|w| w[0].year <= w[1].year));
    }

    #[test]
    fn blank_search_is_identity(ds in arb_dataset(), blank in "[ \t]{0,4}") {
        let view = FilteredView::full(&ds);
        prop_assert_eq!(search(&view, &blank), view);
    }

    #[test]
    fn search_hits_are_an_ordered_subset(ds in arb_dataset(), query in "[a-zA-Z]{1,3}") {
        let view = FilteredView::full(&ds);
        let hits = search(&view, &query);
        let needle = query.to_lowercase();
        prop_assert!(hits.indices().windows(2).all(|w| w[0] < w[1]));
        for record in hits.records() {
            let title = record.title.as_deref().unwrap_or_default().to_lowercase();
            prop_assert!(title.contains(&needle));
        }
    }
}
