//! HTTP retry helper for transient errors.
//!
//! The sheet fetcher calls [`send_text`] instead of
//! `reqwest::RequestBuilder::send()` directly so every fetch gets retry
//! with exponential backoff on timeouts, connection resets, HTTP 429, and
//! HTTP 5xx. Other 4xx statuses are permanent and fail immediately.

use std::time::Duration;

use crate::SourceError;

/// Maximum retry attempts for transient failures. With exponential
/// backoff (2s, 4s, 8s) the total wait before giving up is 14 seconds.
const MAX_RETRIES: u32 = 3;

/// Sends an HTTP request and returns the response body as a `String`.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// # Errors
///
/// Returns [`SourceError`] when the request still fails after all retries
/// or the server answers with a non-retryable status.
#[allow(clippy::future_not_send)]
pub async fn send_text<F>(build_request: F) -> Result<String, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error: Option<SourceError> = None;

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_secs(1u64 << attempt);
            log::warn!("  retry {attempt}/{MAX_RETRIES} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && attempt < MAX_RETRIES {
                    log::warn!("  transient error: {e}");
                    last_error = Some(SourceError::Http(e));
                    continue;
                }
                return Err(SourceError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                let retryable = status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error();
                if retryable {
                    if attempt < MAX_RETRIES {
                        log::warn!("  HTTP {status}, retrying");
                        last_error = Some(SourceError::Status(status));
                        continue;
                    }
                    return Err(SourceError::Status(status));
                }

                if status.is_client_error() {
                    return Err(SourceError::Status(status));
                }

                return response.text().await.map_err(SourceError::Http);
            }
        }
    }

    Err(last_error.unwrap_or(SourceError::EmptyBody))
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_decode() || e.is_request()
}
