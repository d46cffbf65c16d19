//! reqwest-backed implementation of the scan service contract.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::error::ClientError;
use super::ScanService;
use crate::config::SERVICE;
use crate::domain::{ScanRequest, Task, TaskHandle};

/// Submit response body: `{ "task_id": "..." }`
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    task_id: String,
}

/// HTTP client for the scan service.
///
/// Thin and stateless apart from the connection pool; every call is a single
/// round-trip with a per-request timeout and no retry. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpScanService {
    base_url: String,
    http: reqwest::Client,
}

impl HttpScanService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // Tolerate a trailing slash so endpoint joins stay predictable
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(SERVICE.http.request_timeout_ms)
    }

    fn scan_url(&self) -> String {
        format!("{}{}", self.base_url, SERVICE.endpoints.scan)
    }

    fn results_url(&self, handle: &TaskHandle) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            SERVICE.endpoints.results,
            handle.as_str()
        )
    }

    fn presets_url(&self) -> String {
        format!("{}{}", self.base_url, SERVICE.endpoints.presets)
    }
}

impl Default for HttpScanService {
    fn default() -> Self {
        Self::new(SERVICE.base_url)
    }
}

#[async_trait]
impl ScanService for HttpScanService {
    async fn submit_scan(&self, request: &ScanRequest) -> Result<TaskHandle, ClientError> {
        let response = self
            .http
            .post(self.scan_url())
            .timeout(self.request_timeout())
            .json(request)
            .send()
            .await
            .map_err(ClientError::Submission)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::SubmissionStatus(status));
        }

        let body: SubmitResponse = response.json().await.map_err(ClientError::Submission)?;
        Ok(TaskHandle::new(body.task_id))
    }

    async fn fetch_status(&self, handle: &TaskHandle) -> Result<Task, ClientError> {
        let response = self
            .http
            .get(self.results_url(handle))
            .timeout(self.request_timeout())
            .send()
            .await
            .map_err(ClientError::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::FetchStatus(status));
        }

        // A stale/unknown id still answers 200 with status "not_found"
        response.json().await.map_err(ClientError::Fetch)
    }

    async fn fetch_presets(&self) -> Result<BTreeMap<String, Vec<String>>, ClientError> {
        let response = self
            .http
            .get(self.presets_url())
            .timeout(self.request_timeout())
            .send()
            .await
            .map_err(ClientError::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::FetchStatus(status));
        }

        response.json().await.map_err(ClientError::Fetch)
    }
}
