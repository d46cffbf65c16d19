// Asynchronous task-lifecycle client for the scan service
pub mod error;
pub mod http;
pub mod tracker;

// Re-export commonly used types
pub use error::ClientError;
pub use http::HttpScanService;
pub use tracker::{CancelToken, TaskClient, TrackOptions};

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{ScanRequest, Task, TaskHandle};

/// The scan service's request/response contract.
///
/// `HttpScanService` is the real implementation; tests script this trait to
/// drive the tracking loop through arbitrary status sequences.
#[async_trait]
pub trait ScanService: Send + Sync {
    /// Submit a scan, returning the opaque handle the service issued.
    async fn submit_scan(&self, request: &ScanRequest) -> Result<TaskHandle, ClientError>;

    /// Fetch the current status snapshot for a handle. A `not_found` body is
    /// a successful fetch, not an error.
    async fn fetch_status(&self, handle: &TaskHandle) -> Result<Task, ClientError>;

    /// Fetch the preset-name -> ticker-list mapping used to prefill requests.
    async fn fetch_presets(&self) -> Result<BTreeMap<String, Vec<String>>, ClientError>;
}
