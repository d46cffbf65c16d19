// Domain types and value objects shared by the task client and the synthesizer
pub mod pair_result;
pub mod scan_request;
pub mod task;

// Re-export commonly used types
pub use pair_result::{DetectionMethod, PairResult, ZScorePoint};
pub use scan_request::{Period, ScanRequest};
pub use task::{Task, TaskHandle, TaskStatus};

use chrono::NaiveDate;
use thiserror::Error;

/// Data-model invariant violations, surfaced before any network call and
/// never retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("need at least two unique tickers to form a pair, got {count}")]
    TooFewTickers { count: usize },
    #[error("custom period requires both a start and an end date")]
    MissingCustomDates,
    #[error("custom date range is empty: {start} is not before {end}")]
    EmptyDateRange { start: NaiveDate, end: NaiveDate },
    #[error("half-life must be strictly positive, got {half_life}")]
    NonPositiveHalfLife { half_life: f64 },
    #[error(
        "profit probability bounds out of order: low {low} <= estimate {estimate} <= high {high} does not hold"
    )]
    ProbabilityBoundsOutOfOrder { low: f64, estimate: f64, high: f64 },
}
