//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use carbon_fleet_analytics::{search_dataset, summarize};
use carbon_fleet_analytics_models::SearchFilter;
use carbon_fleet_server_models::{
    ApiBreakdowns, ApiCategoryInfo, ApiError, ApiFuelInfo, ApiHealth, ApiIngest,
    ApiRefreshStatus, ApiSummary, ApiTaxonomy, UploadQueryParams, VehicleQueryParams,
};
use carbon_fleet_source::{SourceError, workbook};
use carbon_fleet_survey_models::SourceKind;
use carbon_fleet_vehicle_models::{FuelType, VehicleCategory};
use chrono::Utc;

use crate::refresh::{AUTO_REFRESH_INTERVAL, RefreshError};
use crate::{AppState, refresh};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/summary`
///
/// Returns the fleet summary for the current dataset. Before the first
/// ingest the summary is the empty-fleet summary with `datasetLoaded`
/// false.
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    let dataset = state.dataset.load();

    let response = dataset.as_deref().map_or_else(
        || ApiSummary {
            dataset_loaded: false,
            source: None,
            ingested_at: None,
            summary: summarize(&[]),
        },
        |dataset| ApiSummary {
            dataset_loaded: true,
            source: Some(dataset.source),
            ingested_at: Some(dataset.ingested_at),
            summary: summarize(&dataset.vehicles),
        },
    );

    HttpResponse::Ok().json(response)
}

/// `GET /api/vehicles`
///
/// Searches the current dataset. The response carries an explicit
/// `NO_DATASET` status before the first ingest, distinct from a loaded
/// dataset with zero matches.
pub async fn vehicles(
    state: web::Data<AppState>,
    params: web::Query<VehicleQueryParams>,
) -> HttpResponse {
    let params = params.into_inner();
    let filter = SearchFilter::new(params.q, params.category);

    let dataset = state.dataset.load();
    let outcome = search_dataset(dataset.as_deref(), &filter);

    HttpResponse::Ok().json(outcome)
}

/// `GET /api/breakdowns`
///
/// Category and fuel footprint vectors for the dashboard charts.
pub async fn breakdowns(state: web::Data<AppState>) -> HttpResponse {
    let dataset = state.dataset.load();
    let summary = dataset
        .as_deref()
        .map_or_else(|| summarize(&[]), |dataset| summarize(&dataset.vehicles));

    HttpResponse::Ok().json(ApiBreakdowns {
        by_category: summary.footprint_by_category,
        by_fuel: summary.footprint_by_fuel,
    })
}

/// `GET /api/taxonomy`
///
/// The recognized categories and fuels with their constants, for the
/// filter dropdown and the info cards.
pub async fn taxonomy() -> HttpResponse {
    let categories: Vec<ApiCategoryInfo> = VehicleCategory::all()
        .iter()
        .map(|category| ApiCategoryInfo {
            label: category.to_string(),
            economy_km_per_l: category.economy_km_per_l(),
        })
        .collect();

    let fuels: Vec<ApiFuelInfo> = FuelType::all()
        .iter()
        .map(|fuel| ApiFuelInfo {
            label: fuel.to_string(),
            emission_factor_kg_per_l: fuel.emission_factor_kg_per_l(),
        })
        .collect();

    HttpResponse::Ok().json(ApiTaxonomy { categories, fuels })
}

/// `POST /api/upload`
///
/// Ingests an uploaded spreadsheet (request body = workbook bytes). On
/// any failure the previous dataset stays available.
pub async fn upload(
    state: web::Data<AppState>,
    params: web::Query<UploadQueryParams>,
    body: web::Bytes,
) -> HttpResponse {
    if let Some(filename) = params.filename.as_deref()
        && !workbook::is_spreadsheet_filename(filename)
    {
        return HttpResponse::UnsupportedMediaType().json(ApiError::new(format!(
            "unsupported file type '{filename}': expected .xlsx or .xls"
        )));
    }

    match refresh::ingest_workbook(&state, &body).await {
        Ok(vehicle_count) => HttpResponse::Ok().json(ApiIngest {
            vehicle_count,
            source: SourceKind::FileUpload,
        }),
        Err(e) => ingest_error_response(&e),
    }
}

/// `POST /api/refresh`
///
/// Manually re-ingests the published sheet.
pub async fn refresh(state: web::Data<AppState>) -> HttpResponse {
    match refresh::refresh_from_sheet(&state).await {
        Ok(vehicle_count) => HttpResponse::Ok().json(ApiIngest {
            vehicle_count,
            source: SourceKind::PublishedSheet,
        }),
        Err(e) => ingest_error_response(&e),
    }
}

/// `GET /api/refresh/status`
pub async fn refresh_status(state: web::Data<AppState>) -> HttpResponse {
    let last_refreshed_at = state.refresh.last_refreshed();
    let seconds_since_refresh =
        last_refreshed_at.map(|at| (Utc::now() - at).num_seconds().max(0));

    HttpResponse::Ok().json(ApiRefreshStatus {
        last_refreshed_at,
        seconds_since_refresh,
        auto_refresh_interval_secs: AUTO_REFRESH_INTERVAL.as_secs(),
    })
}

/// Maps an ingest failure to its HTTP response: 409 for an ingest that is
/// already running, 422 with the missing-column list for schema faults,
/// 502 for source fetch failures, and 422 for everything else that makes
/// the payload unusable.
fn ingest_error_response(error: &RefreshError) -> HttpResponse {
    log::error!("Ingest failed: {error}");

    match error {
        RefreshError::InProgress => HttpResponse::Conflict().json(ApiError::new(error.to_string())),
        RefreshError::Source(source) => match source {
            SourceError::MissingColumns { missing } => {
                HttpResponse::UnprocessableEntity().json(ApiError {
                    error: source.to_string(),
                    missing_columns: Some(missing.clone()),
                })
            }
            SourceError::Http(_) | SourceError::Status(_) | SourceError::EmptyBody => {
                HttpResponse::BadGateway().json(ApiError::new(source.to_string()))
            }
            _ => HttpResponse::UnprocessableEntity().json(ApiError::new(source.to_string())),
        },
    }
}
