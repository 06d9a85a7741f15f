//! Typed column extraction.
//!
//! The survey schema is a fixed set of five question headers. They are
//! resolved to positional indices once per ingest, so row extraction never
//! repeats string-keyed lookups and a missing column aborts the ingest
//! up front with the complete missing list.

use carbon_fleet_survey_models::{SurveyColumn, SurveyRow};

use crate::SourceError;

/// Positions of the required survey columns within a header row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndices {
    brand: usize,
    category: usize,
    fuel: usize,
    distance: usize,
    environmental_talk: usize,
}

impl ColumnIndices {
    /// Resolves the required columns against a header row.
    ///
    /// Headers are compared trimmed but otherwise exactly. Extra columns
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingColumns`] naming every absent header
    /// when any required column is not found.
    pub fn resolve(headers: &[String]) -> Result<Self, SourceError> {
        let position = |column: SurveyColumn| {
            headers
                .iter()
                .position(|header| header.trim() == column.header())
        };

        let missing: Vec<String> = SurveyColumn::all()
            .iter()
            .filter(|column| position(**column).is_none())
            .map(|column| column.header().to_owned())
            .collect();

        if !missing.is_empty() {
            return Err(SourceError::MissingColumns { missing });
        }

        Ok(Self {
            brand: position(SurveyColumn::Brand).unwrap_or_default(),
            category: position(SurveyColumn::Category).unwrap_or_default(),
            fuel: position(SurveyColumn::Fuel).unwrap_or_default(),
            distance: position(SurveyColumn::Distance).unwrap_or_default(),
            environmental_talk: position(SurveyColumn::EnvironmentalTalk).unwrap_or_default(),
        })
    }

    /// Extracts a typed row from positional cells.
    ///
    /// Cells beyond the end of a short row read as blank, matching the
    /// blank-tolerance of the rest of the pipeline.
    #[must_use]
    pub fn extract(&self, cells: &[String]) -> SurveyRow {
        let cell = |index: usize| {
            cells
                .get(index)
                .map(|value| value.trim().to_owned())
                .unwrap_or_default()
        };

        SurveyRow {
            brand: cell(self.brand),
            category: cell(self.category),
            fuel: cell(self.fuel),
            distance_text: cell(self.distance),
            environmental_talk: cell(self.environmental_talk),
        }
    }
}

/// Returns `true` when every cell of a row is blank, so entirely empty
/// spreadsheet rows can be skipped.
#[must_use]
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}
