//! Spreadsheet file ingest.
//!
//! Uploaded workbooks (`.xlsx` / `.xls`) are parsed with calamine. Only
//! the first worksheet is read: its first row must carry the required
//! survey headers and every following non-blank row becomes one
//! [`SurveyRow`].
//!
//! [`SurveyRow`]: carbon_fleet_survey_models::SurveyRow

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader as _, open_workbook_auto_from_rs};
use carbon_fleet_survey_models::SurveyRow;

use crate::SourceError;
use crate::extract::{ColumnIndices, is_blank_row};

/// Returns `true` when the file name carries a spreadsheet extension
/// (`.xlsx` or `.xls`, case-insensitive).
#[must_use]
pub fn is_spreadsheet_filename(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls"))
}

/// Parses an in-memory workbook into typed survey rows.
///
/// The format is auto-detected from the bytes, so this accepts both
/// `.xlsx` and legacy `.xls` uploads.
///
/// # Errors
///
/// Returns [`SourceError`] when the bytes are not a readable workbook,
/// the workbook has no worksheet, a required column is missing from the
/// header row, or no data rows are present.
pub fn read_spreadsheet_bytes(bytes: &[u8]) -> Result<Vec<SurveyRow>, SourceError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SourceError::NoWorksheet)??;

    let mut row_iter = range.rows();
    let Some(header_cells) = row_iter.next() else {
        return Err(SourceError::NoRecords);
    };

    let headers: Vec<String> = header_cells.iter().map(cell_to_string).collect();
    let indices = ColumnIndices::resolve(&headers)?;

    let mut rows = Vec::new();
    for cells in row_iter {
        let cells: Vec<String> = cells.iter().map(cell_to_string).collect();
        if is_blank_row(&cells) {
            continue;
        }
        rows.push(indices.extract(&cells));
    }

    if rows.is_empty() {
        return Err(SourceError::NoRecords);
    }

    log::info!("Parsed {} survey rows from workbook", rows.len());
    Ok(rows)
}

/// Reads a workbook from disk after checking its extension.
///
/// # Errors
///
/// Returns [`SourceError::UnsupportedFormat`] for non-spreadsheet paths,
/// [`SourceError::Io`] when the file cannot be read, and everything
/// [`read_spreadsheet_bytes`] can return.
pub fn read_spreadsheet_file(path: &Path) -> Result<Vec<SurveyRow>, SourceError> {
    let name = path.to_string_lossy();
    if !is_spreadsheet_filename(&name) {
        return Err(SourceError::UnsupportedFormat(name.into_owned()));
    }

    let bytes = std::fs::read(path)?;
    read_spreadsheet_bytes(&bytes)
}

/// Renders a worksheet cell the way the survey pipeline expects: text as
/// typed, numbers without a trailing `.0`, blanks and cell errors empty.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_owned(),
        Data::Int(i) => i.to_string(),
        #[allow(clippy::cast_possible_truncation)]
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_spreadsheet_extensions() {
        assert!(is_spreadsheet_filename("encuesta.xlsx"));
        assert!(is_spreadsheet_filename("ENCUESTA.XLS"));
        assert!(is_spreadsheet_filename("respuestas.2024.xlsx"));
        assert!(!is_spreadsheet_filename("encuesta.csv"));
        assert!(!is_spreadsheet_filename("encuesta"));
        assert!(!is_spreadsheet_filename("xlsx"));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(read_spreadsheet_bytes(b"definitely not a workbook").is_err());
        assert!(read_spreadsheet_bytes(&[]).is_err());
    }

    #[test]
    fn non_spreadsheet_path_is_unsupported() {
        let err = read_spreadsheet_file(Path::new("datos.csv")).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat(_)));
    }

    #[test]
    fn numeric_cells_render_without_trailing_zero() {
        assert_eq!(cell_to_string(&Data::Float(300.0)), "300");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Int(500)), "500");
    }

    #[test]
    fn blank_and_error_cells_render_empty() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(
            cell_to_string(&Data::Error(calamine::CellErrorType::Div0)),
            ""
        );
    }

    #[test]
    fn text_cells_are_trimmed() {
        assert_eq!(cell_to_string(&Data::String("  Moto ".to_owned())), "Moto");
    }
}
