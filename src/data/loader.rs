use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use crate::error::Error;

use super::model::{Dataset, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a titles dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one title per line (the usual `netflix_clean.csv`)
/// * `.json`    – `[{ "title": ..., "type": ..., "year_added": ..., ... }, ...]`
/// * `.parquet` – flat Parquet file with the same columns
///
/// Fails with [`Error::Load`] when the file is unreadable, a required column
/// is missing, a year is unparsable, or no usable rows remain.
pub fn load(path: &Path) -> crate::Result<Dataset> {
    let dataset = read_table(path)
        .and_then(Dataset::from_table)
        .map_err(|e| Error::load(path, e))?;

    log::info!(
        "Loaded {} titles with columns {:?} (years {:?})",
        dataset.len(),
        dataset.column_names(),
        dataset.year_bounds()
    );
    Ok(dataset)
}

fn read_table(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(path),
        "json" => read_json(path),
        "parquet" | "pq" => read_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, every other row a title. Empty and
/// whitespace-only cells become missing values.
fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(
            record
                .iter()
                .map(|cell| (!cell.trim().is_empty()).then(|| cell.to_string()))
                .collect(),
        );
    }

    Ok(RawTable { columns, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Dick Johnson Is Dead", "type": "Movie", "year_added": 2021, "main_genre": "Documentaries" },
///   ...
/// ]
/// ```
///
/// Columns are the union of all object keys.
fn read_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(records.len());
    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).and_then(json_to_cell))
                .collect()
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) if s.trim().is_empty() => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file of titles.
///
/// Every column is read as text; nulls and float NaNs become missing
/// values. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let mut batch_rows: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(columns.len()); batch.num_rows()];
        for (col_idx, name) in columns.iter().enumerate() {
            let col = batch.column(col_idx);
            for (row, cells) in batch_rows.iter_mut().enumerate() {
                let cell = extract_cell(col, row)
                    .with_context(|| format!("column '{name}', row {}", rows.len() + row))?;
                cells.push(cell);
            }
        }
        rows.extend(batch_rows);
    }

    Ok(RawTable { columns, rows })
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row as text.
///
/// Common types are read directly; anything else (dates, timestamps,
/// dictionaries, unsigned ints) goes through Arrow's display formatting.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int16 => downcast::<Int16Array>(col)?.value(row).to_string(),
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row).to_string(),
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row).to_string(),
        // pandas stores integer columns with nulls as floats (NaN for null);
        // `2019.0` displays as `2019`.
        DataType::Float32 => {
            let v = downcast::<Float32Array>(col)?.value(row);
            if v.is_nan() {
                return Ok(None);
            }
            v.to_string()
        }
        DataType::Float64 => {
            let v = downcast::<Float64Array>(col)?.value(row);
            if v.is_nan() {
                return Ok(None);
            }
            v.to_string()
        }
        DataType::Boolean => downcast::<BooleanArray>(col)?.value(row).to_string(),
        other => array_value_to_string(col.as_ref(), row)
            .with_context(|| format!("formatting {other:?} value"))?,
    };
    Ok((!text.trim().is_empty()).then_some(text))
}

fn downcast<T: Array + 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column data does not match its type {:?}", col.data_type()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_quoted_fields_and_missing_years() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "titles.csv",
            "show_id,type,title,year_added,main_genre\n\
             s1,Movie,\"Love, Actually\",2019,Romantic Movies\n\
             s2,TV Show,Kota Factory,,TV Comedies\n\
             s3,TV Show,,2021.0,Docuseries\n",
        );

        let ds = load(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].title.as_deref(), Some("Love, Actually"));
        assert_eq!(ds.records()[1].title, None);
        assert_eq!(ds.year_bounds(), (2019, 2021));
    }

    #[test]
    fn loads_json_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "titles.json",
            r#"[
                {"title": "Ozark", "type": "TV Show", "year_added": 2017, "main_genre": "Crime TV Shows"},
                {"title": "Roma", "type": "Movie", "year_added": 2018.0, "main_genre": "Dramas", "rating": "R"},
                {"title": "Unknown", "type": "Movie", "year_added": null, "main_genre": "Dramas"}
            ]"#,
        );

        let ds = load(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names(), ["title", "type", "year_added", "main_genre", "rating"]);
        assert_eq!(ds.records()[1].year_added, 2018);
        assert_eq!(ds.records()[1].extra.get("rating").map(String::as_str), Some("R"));
        assert_eq!(ds.records()[0].extra.get("rating").map(String::as_str), Some(""));
    }

    #[test]
    fn json_column_order_follows_the_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "titles.json",
            r#"[{"year_added": 2020, "type": "Movie", "title": "Roma", "main_genre": "Dramas"}]"#,
        );

        let ds = load(&path).unwrap();
        assert_eq!(ds.column_names(), ["year_added", "type", "title", "main_genre"]);
        let csv = String::from_utf8(crate::export(&crate::FilteredView::full(&ds)).unwrap()).unwrap();
        assert!(csv.starts_with("year_added,type,title,main_genre\n"), "{csv}");
    }

    #[test]
    fn blank_csv_year_drops_the_row() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "titles.csv",
            "title,type,year_added,main_genre\n\
             A,Movie,2019,Dramas\n\
             B,Movie,   ,Dramas\n",
        );

        let ds = load(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].title.as_deref(), Some("A"));
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(&dir, "bad.csv", "title,type,year_added\nA,Movie,2020\n");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert!(err.to_string().contains("main_genre"), "{err}");
    }

    #[test]
    fn unparsable_year_is_a_load_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            "title,type,year_added,main_genre\nA,Movie,September 2020,Dramas\n",
        );
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("is not a year"), "{err}");
    }

    #[test]
    fn missing_file_and_unknown_extension_fail() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            load(&dir.path().join("nope.csv")),
            Err(Error::Load { .. })
        ));
        let path = write_file(&dir, "titles.xlsx", "");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"), "{err}");
    }
}
