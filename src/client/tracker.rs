//! Task submission and polling loop.
//!
//! `TaskClient` owns no task state between calls; the only thing threaded
//! through a tracking loop is the handle it was given. Polls never overlap:
//! each round-trip finishes (or fails) before the next sleep is scheduled,
//! and observer invocations happen inline on the same logical thread of
//! control, so a slow observer delays the next poll rather than racing it.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::ScanService;
use super::error::ClientError;
use crate::config::SERVICE;
use crate::domain::{ScanRequest, Task, TaskHandle, TaskStatus};

/// Cadence and ceiling for one tracking loop.
#[derive(Debug, Clone, Copy)]
pub struct TrackOptions {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(SERVICE.polling.interval_ms),
            max_attempts: SERVICE.polling.max_attempts,
        }
    }
}

/// Cloneable cancellation flag checked before each poll.
///
/// Cancelling stops the loop at the next poll boundary; an in-flight fetch is
/// allowed to finish. This sits alongside the attempt-ceiling timeout, it
/// does not replace it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Client-side orchestration over a `ScanService`.
pub struct TaskClient<S> {
    service: S,
}

impl<S: ScanService> TaskClient<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Validate and submit a scan request. The request is not retried on
    /// transport failure.
    pub async fn submit(&self, request: &ScanRequest) -> Result<TaskHandle, ClientError> {
        request.validate()?;
        log::info!(
            "Submitting scan: {} tickers, period {}",
            request.tickers.len(),
            request.period
        );
        let handle = self.service.submit_scan(request).await?;
        log::info!("Scan accepted as task {}", handle);
        Ok(handle)
    }

    /// Exactly one status fetch. A `not_found` snapshot is a successful poll
    /// telling the caller the handle is stale.
    pub async fn poll(&self, handle: &TaskHandle) -> Result<Task, ClientError> {
        self.service.fetch_status(handle).await
    }

    pub async fn presets(&self) -> Result<BTreeMap<String, Vec<String>>, ClientError> {
        self.service.fetch_presets().await
    }

    /// Poll until a terminal status, the attempt ceiling, cancellation, or a
    /// transport failure.
    ///
    /// Every snapshot is handed to `on_update` in poll order; the terminal
    /// snapshot is both the last observer call and the returned value. A
    /// server-side failure (`status == failed`) is a normal return carrying
    /// the verbatim error string, not an `Err`.
    pub async fn track(
        &self,
        handle: &TaskHandle,
        options: &TrackOptions,
        cancel: Option<&CancelToken>,
        mut on_update: impl FnMut(&Task),
    ) -> Result<Task, ClientError> {
        for attempt in 1..=options.max_attempts {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    log::info!("Tracking of task {} cancelled at poll {}", handle, attempt);
                    return Err(ClientError::Cancelled);
                }
            }

            let snapshot = self.poll(handle).await?;
            on_update(&snapshot);

            if snapshot.is_terminal() {
                log::info!(
                    "Task {} reached {} after {} poll(s)",
                    handle,
                    snapshot.status,
                    attempt
                );
                return Ok(snapshot);
            }
            if snapshot.status == TaskStatus::NotFound {
                log::warn!("Task {} unknown to the service (poll {})", handle, attempt);
            }

            if attempt < options.max_attempts {
                tokio::time::sleep(options.poll_interval).await;
            }
        }

        Err(ClientError::PollTimeout {
            attempts: options.max_attempts,
        })
    }
}
