#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation result and search types.
//!
//! These types are serialized to JSON for the dashboard, so every field is
//! camelCase. Ratio metrics are `Option<f64>` — an empty dataset reports
//! them as absent (`null`), never as NaN or ±∞.

use carbon_fleet_survey_models::EnrichedVehicle;
use serde::{Deserialize, Serialize};

/// Monthly footprint attributed to one vehicle category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFootprint {
    /// Category label as it appears in the survey answers.
    pub category: String,
    /// Sum of monthly footprints (kg CO₂) for vehicles in this category.
    pub footprint_kg: f64,
}

/// Monthly footprint attributed to one fuel type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelFootprint {
    /// Fuel label as it appears in the survey answers.
    pub fuel: String,
    /// Sum of monthly footprints (kg CO₂) for vehicles on this fuel.
    pub footprint_kg: f64,
}

/// Aggregate statistics over one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    /// Number of vehicles in the dataset.
    pub vehicle_count: u64,
    /// Total monthly CO₂ footprint (kg) across the fleet.
    pub total_footprint_kg: f64,
    /// Total monthly distance (km) across the fleet.
    pub total_monthly_distance_km: f64,
    /// Average monthly footprint per vehicle (kg); absent for an empty
    /// dataset.
    pub avg_monthly_footprint_kg: Option<f64>,
    /// Average daily footprint per vehicle (kg); absent for an empty
    /// dataset.
    pub avg_daily_footprint_kg: Option<f64>,
    /// Share of respondents (0.0–1.0) who attended environmental talks;
    /// absent for an empty dataset.
    pub environmental_talk_share: Option<f64>,
    /// Footprint grouped by category, in first-seen survey order.
    pub footprint_by_category: Vec<CategoryFootprint>,
    /// Footprint grouped by fuel type, in first-seen survey order.
    pub footprint_by_fuel: Vec<FuelFootprint>,
}

/// A search request against the current dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    /// Free-text query, matched case-insensitively as a substring of the
    /// brand, category, and fuel fields. Blank matches everything.
    pub query: String,
    /// Optional category filter, compared for exact (case-sensitive)
    /// equality with the vehicle's category answer.
    pub category: Option<String>,
}

impl SearchFilter {
    /// Builds a filter from the raw query-string values of a request.
    #[must_use]
    pub fn new(query: Option<String>, category: Option<String>) -> Self {
        Self {
            query: query.unwrap_or_default(),
            category: category.filter(|c| !c.is_empty()),
        }
    }
}

/// Outcome of a search.
///
/// "Nothing ingested yet" is a different answer from "ingested but nothing
/// matched", and the dashboard renders them differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchOutcome {
    /// No dataset has been ingested yet.
    NoDataset,
    /// The matching vehicles, in dataset order (possibly empty).
    Matches {
        /// Vehicles that satisfied both predicates.
        vehicles: Vec<EnrichedVehicle>,
    },
}
