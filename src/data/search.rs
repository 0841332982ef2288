use super::filter::FilteredView;

/// Case-insensitive substring search over the titles of a view.
///
/// A blank query means "no search active" and returns the view unchanged.
/// Records without a title never match.
pub fn search<'a>(view: &FilteredView<'a>, query: &str) -> FilteredView<'a> {
    if query.trim().is_empty() {
        return view.clone();
    }

    let needle = query.to_lowercase();
    let records = view.dataset().records();
    let indices = view
        .indices()
        .iter()
        .copied()
        .filter(|&i| {
            records[i]
                .title
                .as_deref()
                .is_some_and(|title| title.to_lowercase().contains(&needle))
        })
        .collect();

    FilteredView::from_indices(view.dataset(), indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Record, MOVIE, TV_SHOW};

    fn dataset() -> Dataset {
        let mut untitled = Record::new("", MOVIE, 2020, "Drama");
        untitled.title = None;
        Dataset::from_records(vec![
            Record::new("Stranger Things", TV_SHOW, 2016, "Sci-Fi"),
            untitled,
            Record::new("The Irishman", MOVIE, 2019, "Crime"),
            Record::new("STRANGE Days", MOVIE, 2018, "Thriller"),
        ])
        .unwrap()
    }

    #[test]
    fn blank_query_returns_view_unchanged() {
        let ds = dataset();
        let view = FilteredView::full(&ds);
        assert_eq!(search(&view, ""), view);
        assert_eq!(search(&view, "   \t"), view);
    }

    #[test]
    fn match_is_case_insensitive_and_ordered() {
        let ds = dataset();
        let view = FilteredView::full(&ds);
        assert_eq!(search(&view, "strange").indices(), &[0, 3]);
        assert_eq!(search(&view, "IRISH").indices(), &[2]);
    }

    #[test]
    fn missing_titles_never_match() {
        let ds = dataset();
        let view = FilteredView::full(&ds);
        assert!(search(&view, "drama").is_empty());
    }

    #[test]
    fn input_view_is_untouched() {
        let ds = dataset();
        let view = FilteredView::full(&ds);
        let before = view.clone();
        let _ = search(&view, "the");
        assert_eq!(view, before);
    }
}
