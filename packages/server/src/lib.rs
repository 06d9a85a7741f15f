#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the carbon fleet dashboard.
//!
//! Serves the REST API the browser dashboard consumes (fleet summary,
//! chart breakdowns, vehicle search, taxonomy) plus the two ingest paths:
//! spreadsheet upload and the published-sheet refresh. The current
//! dataset lives in a [`DatasetCell`] that every successful ingest swaps
//! wholesale; the automatic 5-minute refresh runs as a background task
//! that is cancelled when the server shuts down.

mod handlers;
pub mod refresh;

use std::sync::{Arc, RwLock};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use carbon_fleet_source::sheet::PublishedSheet;
use carbon_fleet_survey_models::Dataset;
use chrono::{DateTime, Utc};

/// Maximum accepted upload size (spreadsheet bytes).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Single-owner cell holding the current dataset.
///
/// Ingest paths replace the whole `Arc<Dataset>` in one store; readers
/// clone the `Arc` and keep working on their snapshot. A reader therefore
/// observes either the fully-old or the fully-new dataset, never a
/// partial one.
#[derive(Debug, Default)]
pub struct DatasetCell {
    inner: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetCell {
    /// Creates an empty cell (no dataset ingested yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the current dataset, if any.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn load(&self) -> Option<Arc<Dataset>> {
        self.inner
            .read()
            .expect("dataset cell lock poisoned")
            .clone()
    }

    /// Replaces the current dataset wholesale.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    pub fn store(&self, dataset: Dataset) {
        *self.inner.write().expect("dataset cell lock poisoned") = Some(Arc::new(dataset));
    }
}

/// Ingest coordination: one guard shared by the manual refresh, the
/// automatic refresh, and file uploads, plus the last-success timestamp
/// the dashboard's "last updated" readout shows.
#[derive(Debug, Default)]
pub struct RefreshControl {
    /// Held for the duration of an ingest; acquired with `try_lock` so a
    /// second ingest is refused instead of queued.
    pub guard: tokio::sync::Mutex<()>,
    last_refreshed: RwLock<Option<DateTime<Utc>>>,
}

impl RefreshControl {
    /// Records a successful refresh at the current time.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    pub fn mark_refreshed(&self) {
        *self
            .last_refreshed
            .write()
            .expect("refresh timestamp lock poisoned") = Some(Utc::now());
    }

    /// When the last successful refresh completed.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        *self
            .last_refreshed
            .read()
            .expect("refresh timestamp lock poisoned")
    }
}

/// Shared application state.
pub struct AppState {
    /// The current dataset.
    pub dataset: DatasetCell,
    /// Published-sheet fetcher for the refresh paths.
    pub sheet: PublishedSheet,
    /// Ingest guard and refresh bookkeeping.
    pub refresh: RefreshControl,
}

impl AppState {
    /// Builds the state with the sheet URL from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            dataset: DatasetCell::new(),
            sheet: PublishedSheet::from_env(),
            refresh: RefreshControl::default(),
        }
    }
}

/// Starts the dashboard API server.
///
/// Spawns the automatic refresh task (which also performs the initial
/// sheet ingest), then runs the Actix-Web HTTP server until shutdown.
/// The refresh task is aborted when the server stops. This is a regular
/// async function — the caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    // May run under the CLI, which installs the logger first.
    pretty_env_logger::try_init_custom_env("RUST_LOG").ok();

    let state = web::Data::new(AppState::from_env());
    log::info!("Published sheet URL: {}", state.sheet.url());

    // Holds the task for the lifetime of the server; dropping it on the
    // way out cancels the interval timer.
    let _auto_refresh = refresh::spawn_auto_refresh(state.clone().into_inner());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/summary", web::get().to(handlers::summary))
                    .route("/vehicles", web::get().to(handlers::vehicles))
                    .route("/breakdowns", web::get().to(handlers::breakdowns))
                    .route("/taxonomy", web::get().to(handlers::taxonomy))
                    .route("/upload", web::post().to(handlers::upload))
                    .route("/refresh", web::post().to(handlers::refresh))
                    .route("/refresh/status", web::get().to(handlers::refresh_status)),
            )
            // Serve dashboard static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
