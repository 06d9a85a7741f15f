//! Dataset ingest and the automatic refresh scheduler.
//!
//! All three ingest paths (automatic refresh, manual refresh, file
//! upload) funnel through this module so they share one non-reentrant
//! guard: whichever ingest is running finishes and swaps the dataset;
//! a second attempt started in the meantime is refused with
//! [`RefreshError::InProgress`] rather than queued.

use std::sync::Arc;
use std::time::Duration;

use carbon_fleet_footprint::enrich_all;
use carbon_fleet_source::{SourceError, workbook};
use carbon_fleet_survey_models::{Dataset, SourceKind};
use tokio::task::JoinHandle;

use crate::AppState;

/// How often the published sheet is re-fetched automatically.
pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Errors surfaced by the ingest paths.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// Another ingest currently holds the guard.
    #[error("an ingest is already in progress")]
    InProgress,

    /// The source failed; the previous dataset is unchanged.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Re-ingests the published sheet and swaps the dataset on success.
///
/// # Errors
///
/// Returns [`RefreshError::InProgress`] when another ingest is running,
/// or the underlying [`SourceError`] when the fetch or parse fails — in
/// both cases the previous dataset stays available.
#[allow(clippy::future_not_send)]
pub async fn refresh_from_sheet(state: &AppState) -> Result<u64, RefreshError> {
    let Ok(_guard) = state.refresh.guard.try_lock() else {
        return Err(RefreshError::InProgress);
    };

    let rows = state.sheet.fetch().await?;
    let vehicles = enrich_all(&rows);
    let count = vehicles.len() as u64;

    state
        .dataset
        .store(Dataset::new(vehicles, SourceKind::PublishedSheet));
    state.refresh.mark_refreshed();

    log::info!("Refreshed dataset from published sheet: {count} vehicles");
    Ok(count)
}

/// Ingests an uploaded workbook and swaps the dataset on success.
///
/// # Errors
///
/// Returns [`RefreshError::InProgress`] when another ingest is running,
/// or the underlying [`SourceError`] (schema fault, unreadable workbook)
/// with the previous dataset unchanged.
pub async fn ingest_workbook(state: &AppState, bytes: &[u8]) -> Result<u64, RefreshError> {
    let Ok(_guard) = state.refresh.guard.try_lock() else {
        return Err(RefreshError::InProgress);
    };

    let rows = workbook::read_spreadsheet_bytes(bytes)?;
    let vehicles = enrich_all(&rows);
    let count = vehicles.len() as u64;

    state
        .dataset
        .store(Dataset::new(vehicles, SourceKind::FileUpload));

    log::info!("Ingested uploaded workbook: {count} vehicles");
    Ok(count)
}

/// Handle for the background refresh task; dropping it cancels the task,
/// so no interval timer outlives the server.
pub struct AutoRefreshHandle {
    handle: JoinHandle<()>,
}

impl Drop for AutoRefreshHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns the periodic sheet refresh.
///
/// The first tick fires immediately, so this also performs the initial
/// ingest at startup. A failed tick logs the error and waits for the
/// next one; there is no retry inside a tick beyond the HTTP-level
/// backoff.
pub fn spawn_auto_refresh(state: Arc<AppState>) -> AutoRefreshHandle {
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(AUTO_REFRESH_INTERVAL);

        loop {
            interval.tick().await;
            match refresh_from_sheet(&state).await {
                Ok(count) => log::info!("Auto-refresh complete: {count} vehicles"),
                Err(RefreshError::InProgress) => {
                    log::warn!("Auto-refresh skipped: an ingest is already running");
                }
                Err(RefreshError::Source(e)) => {
                    log::warn!("Auto-refresh failed (will retry next tick): {e}");
                }
            }
        }
    });

    AutoRefreshHandle { handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState {
            dataset: crate::DatasetCell::new(),
            sheet: carbon_fleet_source::sheet::PublishedSheet::new("http://127.0.0.1:9/export"),
            refresh: crate::RefreshControl::default(),
        }
    }

    #[tokio::test]
    async fn concurrent_ingest_is_refused() {
        let state = state();
        let _held = state.refresh.guard.lock().await;

        let err = refresh_from_sheet(&state).await.unwrap_err();
        assert!(matches!(err, RefreshError::InProgress));

        let err = ingest_workbook(&state, b"irrelevant").await.unwrap_err();
        assert!(matches!(err, RefreshError::InProgress));
    }

    #[tokio::test]
    async fn failed_upload_keeps_previous_dataset() {
        let state = state();
        state.dataset.store(Dataset::new(
            Vec::new(),
            SourceKind::PublishedSheet,
        ));

        let err = ingest_workbook(&state, b"not a workbook").await.unwrap_err();
        assert!(matches!(err, RefreshError::Source(_)));

        let snapshot = state.dataset.load().unwrap();
        assert_eq!(snapshot.source, SourceKind::PublishedSheet);
    }

    #[tokio::test]
    async fn guard_is_released_after_a_failed_ingest() {
        let state = state();
        assert!(ingest_workbook(&state, b"junk").await.is_err());

        // The guard must be free again for the next attempt.
        assert!(state.refresh.guard.try_lock().is_ok());
    }
}
