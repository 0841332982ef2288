use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use anyhow::{bail, Context, Result};

/// `type` value counted by the "Movies" KPI.
pub const MOVIE: &str = "Movie";
/// `type` value counted by the "TV Shows" KPI.
pub const TV_SHOW: &str = "TV Show";

// ---------------------------------------------------------------------------
// Column – the columns the core consumes
// ---------------------------------------------------------------------------

/// A column the core reads. Every source must carry all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Title,
    Type,
    YearAdded,
    MainGenre,
}

impl Column {
    pub const REQUIRED: [Column; 4] = [
        Column::Title,
        Column::Type,
        Column::YearAdded,
        Column::MainGenre,
    ];

    /// Header name in the source table.
    pub fn name(self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Type => "type",
            Column::YearAdded => "year_added",
            Column::MainGenre => "main_genre",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The categorical columns that feed the multi-select filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Type,
    MainGenre,
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// One media title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// `None` when the source cell was empty or null.
    pub title: Option<String>,
    /// "Movie" or "TV Show" in well-formed data, but any text is accepted.
    pub title_type: String,
    pub year_added: i32,
    pub main_genre: String,
    /// Columns the core does not read, kept as text for export.
    pub extra: BTreeMap<String, String>,
}

impl Record {
    pub fn new(
        title: impl Into<String>,
        title_type: impl Into<String>,
        year_added: i32,
        main_genre: impl Into<String>,
    ) -> Self {
        Record {
            title: Some(title.into()),
            title_type: title_type.into(),
            year_added,
            main_genre: main_genre.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn category(&self, category: Category) -> &str {
        match category {
            Category::Type => &self.title_type,
            Category::MainGenre => &self.main_genre,
        }
    }

    /// Text of the cell under `column`, as it would appear in a CSV.
    /// Missing values render as the empty string.
    pub fn cell(&self, column: &str) -> Cow<'_, str> {
        match column {
            "title" => Cow::Borrowed(self.title.as_deref().unwrap_or("")),
            "type" => Cow::Borrowed(&self.title_type),
            "year_added" => Cow::Owned(self.year_added.to_string()),
            "main_genre" => Cow::Borrowed(&self.main_genre),
            other => Cow::Borrowed(self.extra.get(other).map(String::as_str).unwrap_or("")),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – untyped rows handed over by the loaders
// ---------------------------------------------------------------------------

/// Column names plus text cells, `None` for empty / null cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable dataset with filter options pre-computed once.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    /// Source column order, used as the export header.
    column_names: Vec<String>,
    types: Vec<String>,
    genres: Vec<String>,
    year_bounds: (i32, i32),
}

impl Dataset {
    /// Build a dataset whose columns are exactly the four required ones.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let column_names = Column::REQUIRED
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        Self::with_columns(column_names, records)
    }

    /// Build a dataset with an explicit column order. The required columns
    /// must be present in `column_names`.
    pub fn with_columns(column_names: Vec<String>, records: Vec<Record>) -> Result<Self> {
        for col in Column::REQUIRED {
            if !column_names.iter().any(|c| c == col.name()) {
                bail!("missing required column '{col}'");
            }
        }

        let year_bounds = records
            .iter()
            .map(|r| r.year_added)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
            .context("dataset has no records with a usable year_added")?;

        let types = distinct(records.iter().map(|r| r.title_type.as_str()));
        let genres = distinct(records.iter().map(|r| r.main_genre.as_str()));

        Ok(Dataset {
            records,
            column_names,
            types,
            genres,
            year_bounds,
        })
    }

    /// Type the raw cells of a loaded table.
    ///
    /// Rows with an empty `year_added` are dropped; a non-empty value that is
    /// not an integral year fails the whole table.
    pub fn from_table(table: RawTable) -> Result<Self> {
        let index_of = |col: Column| {
            table
                .columns
                .iter()
                .position(|c| c == col.name())
                .with_context(|| format!("missing required column '{col}'"))
        };
        let title_idx = index_of(Column::Title)?;
        let type_idx = index_of(Column::Type)?;
        let year_idx = index_of(Column::YearAdded)?;
        let genre_idx = index_of(Column::MainGenre)?;

        let extra_cols: Vec<(usize, &String)> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| ![title_idx, type_idx, year_idx, genre_idx].contains(i))
            .collect();

        let mut records = Vec::with_capacity(table.rows.len());
        let mut dropped = 0usize;

        for (row_no, row) in table.rows.iter().enumerate() {
            let cell = |idx: usize| row.get(idx).cloned().flatten();

            let year_added = match cell(year_idx) {
                Some(raw) => parse_year(&raw).with_context(|| format!("row {row_no}"))?,
                None => {
                    dropped += 1;
                    continue;
                }
            };

            let extra = extra_cols
                .iter()
                .map(|(idx, name)| ((*name).clone(), cell(*idx).unwrap_or_default()))
                .collect();

            records.push(Record {
                title: cell(title_idx),
                title_type: cell(type_idx).unwrap_or_default(),
                year_added,
                main_genre: cell(genre_idx).unwrap_or_default(),
                extra,
            });
        }

        if dropped > 0 {
            log::warn!("Dropped {dropped} rows with an empty year_added");
        }

        Self::with_columns(table.columns, records)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, idx: usize) -> Option<&Record> {
        self.records.get(idx)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Distinct values of a categorical column, in first-encountered order.
    pub fn distinct_values(&self, category: Category) -> &[String] {
        match category {
            Category::Type => &self.types,
            Category::MainGenre => &self.genres,
        }
    }

    /// Smallest and largest `year_added`, inclusive.
    pub fn year_bounds(&self) -> (i32, i32) {
        self.year_bounds
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Accepts `2019` as well as `2019.0`, which pandas writes for integer
/// columns that contained nulls.
pub(crate) fn parse_year(raw: &str) -> Result<i32> {
    let s = raw.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Ok(y);
    }
    match s.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => Ok(f as i32),
        _ => bail!("'{raw}' is not a year"),
    }
}
