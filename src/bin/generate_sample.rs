use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Pick an item, weighting item `i` by `weights[i]`.
    fn weighted<'a>(&mut self, items: &[&'a str], weights: &[f64]) -> &'a str {
        let total: f64 = weights.iter().sum();
        let mut target = self.next_f64() * total;
        for (item, w) in items.iter().zip(weights) {
            if target < *w {
                return *item;
            }
            target -= w;
        }
        items[items.len() - 1]
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const ADJECTIVES: [&str; 12] = [
    "Silent", "Broken", "Golden", "Midnight", "Lost", "Wild", "Hidden", "Last", "Crimson",
    "Endless", "Little", "Dark",
];
const NOUNS: [&str; 12] = [
    "City", "Kingdom", "Summer", "Heist", "Garden", "Signal", "Frontier", "Letters", "River",
    "Empire", "Voices", "Island",
];
const MOVIE_GENRES: [&str; 8] = [
    "Dramas",
    "Comedies",
    "Action & Adventure",
    "Documentaries",
    "Horror Movies",
    "Thrillers",
    "Romantic Movies",
    "Children & Family Movies",
];
const MOVIE_GENRE_WEIGHTS: [f64; 8] = [8.0, 6.0, 4.0, 3.5, 2.0, 2.0, 1.5, 1.5];
const TV_GENRES: [&str; 6] = [
    "International TV Shows",
    "Crime TV Shows",
    "Kids' TV",
    "Docuseries",
    "TV Comedies",
    "Reality TV",
];
const TV_GENRE_WEIGHTS: [f64; 6] = [5.0, 3.0, 2.5, 2.0, 2.0, 1.0];
const RATINGS: [&str; 6] = ["TV-MA", "TV-14", "TV-PG", "R", "PG-13", "TV-Y7"];

/// Relative volume of titles added per year, 2008 → 2021.
const YEAR_WEIGHTS: [f64; 14] = [
    0.1, 0.1, 0.2, 0.3, 0.5, 0.8, 1.5, 3.0, 7.0, 13.0, 17.0, 20.0, 19.0, 14.0,
];
const FIRST_YEAR: i32 = 2008;

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);
    let n_titles = 2000;

    let years: Vec<String> = (0..YEAR_WEIGHTS.len())
        .map(|i| (FIRST_YEAR + i as i32).to_string())
        .collect();
    let year_refs: Vec<&str> = years.iter().map(String::as_str).collect();

    let mut show_id = Vec::with_capacity(n_titles);
    let mut kind = Vec::with_capacity(n_titles);
    let mut title = Vec::with_capacity(n_titles);
    let mut year_added: Vec<Option<f64>> = Vec::with_capacity(n_titles);
    let mut main_genre = Vec::with_capacity(n_titles);
    let mut rating = Vec::with_capacity(n_titles);

    for i in 0..n_titles {
        let is_movie = rng.next_f64() < 0.7;
        show_id.push(format!("s{}", i + 1));
        kind.push(if is_movie { "Movie" } else { "TV Show" });
        title.push(format!("The {} {}", rng.pick(&ADJECTIVES), rng.pick(&NOUNS)));
        main_genre.push(if is_movie {
            rng.weighted(&MOVIE_GENRES, &MOVIE_GENRE_WEIGHTS)
        } else {
            rng.weighted(&TV_GENRES, &TV_GENRE_WEIGHTS)
        });
        rating.push(rng.pick(&RATINGS));

        // About 1% of titles have no date added, as in the real catalogue.
        let year = rng.weighted(&year_refs, &YEAR_WEIGHTS);
        year_added.push(if rng.next_f64() < 0.01 {
            None
        } else {
            Some(year.parse::<f64>().context("generated year")?)
        });
    }

    // pandas writes a nullable integer column as float64; mirror that.
    let columns: Vec<(&str, ArrayRef)> = vec![
        ("show_id", Arc::new(StringArray::from(show_id)) as ArrayRef),
        ("type", Arc::new(StringArray::from(kind)) as ArrayRef),
        ("title", Arc::new(StringArray::from(title)) as ArrayRef),
        ("year_added", Arc::new(Float64Array::from(year_added)) as ArrayRef),
        ("main_genre", Arc::new(StringArray::from(main_genre)) as ArrayRef),
        ("rating", Arc::new(StringArray::from(rating)) as ArrayRef),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| {
                Field::new(*name, array.data_type().clone(), *name == "year_added")
            })
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.iter().map(|(_, array)| array.clone()).collect(),
    )
    .context("building record batch")?;

    // Write Parquet
    let parquet_path = "sample_titles.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    // Write CSV with the same rows
    let csv_path = "sample_titles.csv";
    let mut csv = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    csv.write_record(columns.iter().map(|(name, _)| *name))?;
    for row in 0..batch.num_rows() {
        let cells: Vec<String> = columns
            .iter()
            .map(|(_, array)| {
                arrow::util::display::array_value_to_string(array, row).unwrap_or_default()
            })
            .collect();
        csv.write_record(&cells)?;
    }
    csv.flush()?;

    log::info!("Wrote {n_titles} titles to {parquet_path} and {csv_path}");
    println!("Wrote {n_titles} titles to {parquet_path} and {csv_path}");
    Ok(())
}
