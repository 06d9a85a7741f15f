#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-vehicle carbon footprint computation.
//!
//! [`enrich`] turns one raw [`SurveyRow`] into an [`EnrichedVehicle`] and
//! never fails: malformed answers degrade to zero or to the taxonomy
//! defaults instead of raising errors. [`enrich_all`] maps it over a whole
//! dataset, order-preserving and one-to-one.

use carbon_fleet_survey_models::{EnrichedVehicle, SurveyRow};
use carbon_fleet_vehicle_models::{FuelType, VehicleCategory};

/// Fixed days-per-month assumption for the daily footprint.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Parses a free-text monthly distance answer into kilometers.
///
/// Respondents write things like `"300km"`, `"1,200 km"`, or `"aprox
/// 250"`. Every character that is not an ASCII digit or a dot is stripped
/// before parsing; anything that still fails to parse (including an empty
/// answer or several dots) yields 0.
#[must_use]
pub fn parse_distance_km(text: &str) -> f64 {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    digits.parse().unwrap_or(0.0)
}

/// Computes the footprint metrics for one survey row.
///
/// The algorithm:
/// 1. fuel economy from the category answer (default 10 km/L),
/// 2. monthly km from the distance free text (default 0),
/// 3. liters = km / economy,
/// 4. emission factor from the fuel answer (default 0 kg/L),
/// 5. monthly footprint = liters × factor; daily = monthly / 30.
///
/// The economy table never stores zero (enforced by a table test in
/// `carbon_fleet_vehicle_models`), so the division is always defined.
#[must_use]
pub fn enrich(row: &SurveyRow) -> EnrichedVehicle {
    let economy = VehicleCategory::economy_for_label(&row.category);
    let monthly_distance_km = parse_distance_km(&row.distance_text);
    let monthly_liters = monthly_distance_km / economy;

    let factor = FuelType::emission_factor_for_label(&row.fuel);
    let monthly_footprint_kg = monthly_liters * factor;
    let daily_footprint_kg = monthly_footprint_kg / DAYS_PER_MONTH;

    EnrichedVehicle {
        brand: row.brand.clone(),
        category: row.category.clone(),
        fuel: row.fuel.clone(),
        environmental_talk: row.environmental_talk.clone(),
        monthly_distance_km,
        monthly_liters,
        monthly_footprint_kg,
        daily_footprint_kg,
    }
}

/// Enriches a whole ingested dataset, preserving survey order.
///
/// Rows are independent, so this is a plain map; at the few hundred rows a
/// survey produces there is nothing to gain from parallelism.
#[must_use]
pub fn enrich_all(rows: &[SurveyRow]) -> Vec<EnrichedVehicle> {
    let vehicles: Vec<EnrichedVehicle> = rows.iter().map(enrich).collect();
    log::debug!("Enriched {} survey rows", vehicles.len());
    vehicles
}
