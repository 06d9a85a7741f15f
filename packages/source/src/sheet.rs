//! Published-sheet CSV ingest.
//!
//! The survey responses are published as a CSV export at a fixed URL.
//! [`PublishedSheet::fetch`] downloads the export (with retry for
//! transient failures) and parses it into typed survey rows. Any failure
//! leaves the caller's previous dataset untouched.

use carbon_fleet_survey_models::SurveyRow;

use crate::extract::{ColumnIndices, is_blank_row};
use crate::{SourceError, retry};

/// Default published CSV export of the survey responses.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSVYwJN-6wLczy2UWwjl36rdY6Ky8e-xVeFvkWZqNHF5xCLyxc0s5BBNhtyB_TzNIFienDrvlZ_WuyL/pub?output=csv";

/// Environment variable that overrides the published sheet URL.
pub const SHEET_URL_ENV: &str = "SHEET_URL";

/// Fetcher for the published-sheet CSV export.
#[derive(Debug, Clone)]
pub struct PublishedSheet {
    url: String,
    client: reqwest::Client,
}

impl PublishedSheet {
    /// Creates a fetcher for the given export URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Creates a fetcher for the URL in `SHEET_URL`, falling back to
    /// [`DEFAULT_SHEET_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let url = std::env::var(SHEET_URL_ENV).unwrap_or_else(|_| DEFAULT_SHEET_URL.to_owned());
        Self::new(url)
    }

    /// Returns the export URL this fetcher reads from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads and parses the published export.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the download fails after retries, the
    /// body is empty, a required column is missing, or no data rows are
    /// present.
    #[allow(clippy::future_not_send)]
    pub async fn fetch(&self) -> Result<Vec<SurveyRow>, SourceError> {
        log::info!("Fetching published sheet: {}", self.url);

        let body = retry::send_text(|| self.client.get(&self.url)).await?;
        if body.trim().is_empty() {
            return Err(SourceError::EmptyBody);
        }

        let rows = parse_sheet_csv(&body)?;
        log::info!("Parsed {} survey rows from published sheet", rows.len());
        Ok(rows)
    }
}

/// Parses a CSV export body into typed survey rows.
///
/// The first line is the header row (trimmed before matching); blank
/// lines are skipped; short rows are padded with blanks. Quoted fields
/// containing commas are handled by the CSV parser.
///
/// # Errors
///
/// Returns [`SourceError::MissingColumns`] when a required header is
/// absent, [`SourceError::NoRecords`] when only the header row is
/// present, or [`SourceError::Csv`] on malformed input.
pub fn parse_sheet_csv(text: &str) -> Result<Vec<SurveyRow>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_owned())
        .collect();

    let indices = ColumnIndices::resolve(&headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cells: Vec<String> = record.iter().map(|cell| cell.trim().to_owned()).collect();
        if is_blank_row(&cells) {
            continue;
        }
        rows.push(indices.extract(&cells));
    }

    if rows.is_empty() {
        return Err(SourceError::NoRecords);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_fleet_survey_models::SurveyColumn;

    fn header_line() -> String {
        SurveyColumn::all()
            .iter()
            .map(|column| format!("\"{}\"", column.header()))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn parses_export_rows_in_order() {
        let csv = format!(
            "{}\nToyota Hilux,Pickup,Diésel,500km,No\nHonda CB190,Moto,Gasolina,300km,Sí\n",
            header_line()
        );

        let rows = parse_sheet_csv(&csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].brand, "Toyota Hilux");
        assert_eq!(rows[1].brand, "Honda CB190");
        assert_eq!(rows[1].environmental_talk, "Sí");
    }

    #[test]
    fn skips_blank_lines() {
        let csv = format!(
            "{}\nToyota Hilux,Pickup,Diésel,500km,No\n\n,,,,\nHonda CB190,Moto,Gasolina,300km,Sí\n",
            header_line()
        );

        let rows = parse_sheet_csv(&csv).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn pads_short_rows_with_blanks() {
        let csv = format!("{}\nNissan Frontier,Pickup\n", header_line());

        let rows = parse_sheet_csv(&csv).unwrap();
        assert_eq!(rows[0].brand, "Nissan Frontier");
        assert_eq!(rows[0].fuel, "");
        assert_eq!(rows[0].distance_text, "");
    }

    #[test]
    fn quoted_commas_stay_in_one_field() {
        let csv = format!(
            "{}\n\"Chevrolet, D-Max\",Pickup,Diésel,400km,No\n",
            header_line()
        );

        let rows = parse_sheet_csv(&csv).unwrap();
        assert_eq!(rows[0].brand, "Chevrolet, D-Max");
        assert_eq!(rows[0].category, "Pickup");
    }

    #[test]
    fn missing_header_aborts_with_schema_error() {
        let csv = "Modelo / Marca del Vehiculo,Tipo de Vehiculo\nToyota,Pickup\n";

        let err = parse_sheet_csv(csv).unwrap_err();
        match err {
            SourceError::MissingColumns { missing } => {
                assert!(missing.contains(&"¿Que tipo de combustible usa el carro?".to_owned()));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn header_only_export_reports_no_records() {
        let err = parse_sheet_csv(&format!("{}\n", header_line())).unwrap_err();
        assert!(matches!(err, SourceError::NoRecords));
    }

    #[test]
    fn from_env_falls_back_to_default_url() {
        // SHEET_URL is not set in the test environment.
        let sheet = PublishedSheet::from_env();
        assert_eq!(sheet.url(), DEFAULT_SHEET_URL);
    }
}
