use crate::error::{Error, Result};

use super::filter::FilteredView;

/// Suggested file name for the download button.
pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";
/// MIME type of the exported bytes.
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Encode a view as UTF-8 CSV: header row with the dataset's column names in
/// source order, one row per record. Fields containing commas, quotes or
/// newlines are double-quoted.
pub fn export(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let columns = view.dataset().column_names();
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(columns).map_err(encoding)?;
    for record in view.records() {
        writer
            .write_record(columns.iter().map(|col| record.cell(col).into_owned()))
            .map_err(encoding)?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Encoding {
        reason: e.to_string(),
    })?;
    log::debug!("Exported {} rows ({} bytes)", view.len(), bytes.len());
    Ok(bytes)
}

fn encoding(err: csv::Error) -> Error {
    Error::Encoding {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Record, MOVIE};

    #[test]
    fn header_follows_source_column_order() {
        let mut record = Record::new("Roma", MOVIE, 2018, "Dramas");
        record.extra.insert("director".into(), "Alfonso Cuarón".into());
        let ds = Dataset::with_columns(
            ["type", "title", "director", "year_added", "main_genre"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![record],
        )
        .unwrap();

        let bytes = export(&FilteredView::full(&ds)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "type,title,director,year_added,main_genre\nMovie,Roma,Alfonso Cuarón,2018,Dramas\n"
        );
    }

    #[test]
    fn awkward_fields_are_quoted() {
        let ds = Dataset::from_records(vec![Record::new(
            "Love, Death & \"Robots\"\nVol. 1",
            MOVIE,
            2019,
            "Sci-Fi",
        )])
        .unwrap();
        let text = String::from_utf8(export(&FilteredView::full(&ds)).unwrap()).unwrap();
        assert!(text.contains("\"Love, Death & \"\"Robots\"\"\nVol. 1\""), "{text}");
    }

    #[test]
    fn empty_view_still_has_a_header() {
        let ds = Dataset::from_records(vec![Record::new("A", MOVIE, 2020, "Drama")]).unwrap();
        let view = crate::data::search::search(&FilteredView::full(&ds), "zzz");
        let text = String::from_utf8(export(&view).unwrap()).unwrap();
        assert_eq!(text, "title,type,year_added,main_genre\n");
    }
}
