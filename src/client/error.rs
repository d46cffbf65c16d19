//! Task-client error taxonomy.
//!
//! Every variant is terminal for the in-flight operation; nothing here is
//! retried internally. A server-reported `failed` status is deliberately NOT
//! an error: it is a successful fetch carrying a domain-level failure and is
//! returned as a normal `Task` snapshot.

use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed request, caught before any network round-trip
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Submit round-trip failed at the transport level
    #[error("scan submission failed: {0}")]
    Submission(#[source] reqwest::Error),

    /// Submit reached the service but was rejected
    #[error("scan submission rejected with HTTP {0}")]
    SubmissionStatus(reqwest::StatusCode),

    /// Status fetch failed at the transport level
    #[error("status fetch failed: {0}")]
    Fetch(#[source] reqwest::Error),

    /// Status fetch reached the service but was rejected
    #[error("status fetch rejected with HTTP {0}")]
    FetchStatus(reqwest::StatusCode),

    /// Attempt ceiling exhausted without a terminal status. Distinct from
    /// failure: the scan may well still be running server-side.
    #[error("no terminal status after {attempts} polls; the scan may still be running")]
    PollTimeout { attempts: u32 },

    /// Caller pulled the cancel token before a poll was issued
    #[error("tracking cancelled by caller")]
    Cancelled,
}

impl ClientError {
    /// True when retrying later with the same handle could still succeed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::PollTimeout { .. })
    }
}
