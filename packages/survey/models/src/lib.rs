#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Survey column schema and the canonical record types.
//!
//! The survey arrives as rows keyed by the exact question strings of the
//! source form. Ingest resolves those headers once into a typed
//! [`SurveyRow`], so the rest of the system never touches raw string keys.
//! Enrichment produces [`EnrichedVehicle`] records, and a completed ingest
//! yields a [`Dataset`] that is swapped in wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The affirmative answer to the environmental-talk question, as the form
/// records it.
pub const ENVIRONMENTAL_TALK_YES: &str = "Sí";

/// The five survey columns every ingest requires.
///
/// [`Self::header`] returns the exact question string of the source form;
/// ingest fails with the full list of missing headers when any is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyColumn {
    /// Vehicle brand / model free text.
    Brand,
    /// Vehicle category label.
    Category,
    /// Fuel type label.
    Fuel,
    /// Monthly distance free text (e.g. "300km").
    Distance,
    /// Whether the respondent attended environmental talks.
    EnvironmentalTalk,
}

impl SurveyColumn {
    /// Returns the exact header string the survey form uses for this
    /// column.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Brand => "Modelo / Marca del Vehiculo",
            Self::Category => "Tipo de Vehiculo",
            Self::Fuel => "¿Que tipo de combustible usa el carro?",
            Self::Distance => {
                "¿Cuántos km recorre por mes? (Ingresen un solo valor por ejemplo 100km)"
            }
            Self::EnvironmentalTalk => {
                "¿Han tenido charlas ambientales sobre la huella de carbono?"
            }
        }
    }

    /// Returns all required columns.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Brand,
            Self::Category,
            Self::Fuel,
            Self::Distance,
            Self::EnvironmentalTalk,
        ]
    }
}

/// One respondent's raw answers, extracted from the header-keyed row.
///
/// All fields are kept as the respondent typed them (trimmed); blanks are
/// allowed everywhere. Interpretation happens during enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRow {
    /// Vehicle brand / model.
    pub brand: String,
    /// Vehicle category answer (matched against the taxonomy labels).
    pub category: String,
    /// Fuel type answer.
    pub fuel: String,
    /// Monthly distance free text.
    pub distance_text: String,
    /// Environmental-talk answer ("Sí" / "No" / blank).
    pub environmental_talk: String,
}

/// A survey row augmented with the computed footprint metrics.
///
/// Pure function of the originating [`SurveyRow`] and the constants table
/// in `carbon_fleet_vehicle_models`; enriching the same row twice yields
/// identical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedVehicle {
    /// Vehicle brand / model (passthrough).
    pub brand: String,
    /// Vehicle category label (passthrough).
    pub category: String,
    /// Fuel type label (passthrough).
    pub fuel: String,
    /// Environmental-talk answer (passthrough).
    pub environmental_talk: String,
    /// Monthly distance parsed from the free-text answer (km); 0 when the
    /// answer was blank or unparseable.
    pub monthly_distance_km: f64,
    /// Monthly fuel consumption (liters).
    pub monthly_liters: f64,
    /// Monthly CO₂ footprint (kg).
    pub monthly_footprint_kg: f64,
    /// Daily CO₂ footprint (kg), monthly divided by the fixed 30-day
    /// month.
    pub daily_footprint_kg: f64,
}

/// Where a dataset came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    /// Spreadsheet file uploaded through the dashboard.
    FileUpload,
    /// Published-sheet CSV export fetched over HTTP.
    PublishedSheet,
}

/// A fully ingested dataset.
///
/// Created in one piece by an ingest and then only ever read; a newer
/// ingest replaces the whole value. Readers therefore always observe a
/// consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Enriched vehicles, in survey order.
    pub vehicles: Vec<EnrichedVehicle>,
    /// Which ingest path produced this dataset.
    pub source: SourceKind,
    /// When the ingest completed.
    pub ingested_at: DateTime<Utc>,
}

impl Dataset {
    /// Builds a dataset from enriched vehicles, stamped with the current
    /// time.
    #[must_use]
    pub fn new(vehicles: Vec<EnrichedVehicle>, source: SourceKind) -> Self {
        Self {
            vehicles,
            source,
            ingested_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_match_the_source_form() {
        assert_eq!(SurveyColumn::Brand.header(), "Modelo / Marca del Vehiculo");
        assert_eq!(SurveyColumn::Category.header(), "Tipo de Vehiculo");
        assert_eq!(
            SurveyColumn::Distance.header(),
            "¿Cuántos km recorre por mes? (Ingresen un solo valor por ejemplo 100km)"
        );
    }

    #[test]
    fn all_columns_have_distinct_headers() {
        let headers: Vec<&str> = SurveyColumn::all().iter().map(|c| c.header()).collect();
        let mut deduped = headers.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(headers.len(), deduped.len());
        assert_eq!(headers.len(), 5);
    }

    #[test]
    fn source_kind_round_trips_through_strum() {
        assert_eq!(SourceKind::FileUpload.to_string(), "FILE_UPLOAD");
        assert_eq!(
            "PUBLISHED_SHEET".parse::<SourceKind>().unwrap(),
            SourceKind::PublishedSheet
        );
    }
}
