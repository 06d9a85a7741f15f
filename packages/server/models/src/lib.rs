#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the dashboard server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the core analytics types to allow independent evolution of the
//! API contract.

use carbon_fleet_analytics_models::{CategoryFootprint, FleetSummary, FuelFootprint};
use carbon_fleet_survey_models::SourceKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Fleet summary with dataset provenance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    /// Whether any dataset has been ingested yet.
    pub dataset_loaded: bool,
    /// Which ingest path produced the current dataset.
    pub source: Option<SourceKind>,
    /// When the current dataset was ingested.
    pub ingested_at: Option<DateTime<Utc>>,
    /// Aggregate fleet statistics.
    pub summary: FleetSummary,
}

/// Query parameters for the vehicles (search) endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQueryParams {
    /// Free-text query over brand, category, and fuel.
    pub q: Option<String>,
    /// Exact category filter.
    pub category: Option<String>,
}

/// Chart-ready footprint breakdowns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBreakdowns {
    /// Footprint per vehicle category, first-seen order.
    pub by_category: Vec<CategoryFootprint>,
    /// Footprint per fuel type, first-seen order.
    pub by_fuel: Vec<FuelFootprint>,
}

/// One vehicle category with its assumed fuel economy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategoryInfo {
    /// Form label of the category.
    pub label: String,
    /// Average fuel economy (km per liter).
    pub economy_km_per_l: f64,
}

/// One fuel type with its emission factor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFuelInfo {
    /// Form label of the fuel.
    pub label: String,
    /// Emission factor (kg CO₂ per liter).
    pub emission_factor_kg_per_l: f64,
}

/// The taxonomy behind the dashboard's filter dropdown and info cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTaxonomy {
    /// Recognized vehicle categories.
    pub categories: Vec<ApiCategoryInfo>,
    /// Recognized fuel types.
    pub fuels: Vec<ApiFuelInfo>,
}

/// Successful ingest response (upload or refresh).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIngest {
    /// Number of vehicles in the new dataset.
    pub vehicle_count: u64,
    /// Which ingest path produced it.
    pub source: SourceKind,
}

/// Error payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable description of the failure.
    pub error: String,
    /// The required survey columns that were missing, when the failure
    /// was a schema fault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_columns: Option<Vec<String>>,
}

impl ApiError {
    /// Builds a plain error payload.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing_columns: None,
        }
    }
}

/// Query parameters for the upload endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQueryParams {
    /// Original file name, used for the extension check when provided.
    pub filename: Option<String>,
}

/// Refresh scheduler status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRefreshStatus {
    /// When the last successful sheet refresh completed.
    pub last_refreshed_at: Option<DateTime<Utc>>,
    /// Seconds elapsed since the last successful refresh.
    pub seconds_since_refresh: Option<i64>,
    /// Seconds between automatic refresh attempts.
    pub auto_refresh_interval_secs: u64,
}
