//! User-facing scan request and its validation.
//!
//! A `ScanRequest` is immutable caller intent: normalize it once, validate it
//! before any network call, then hand it to the task client as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::ValidationError;

/// Minimum number of unique tickers needed to form at least one pair
pub const MIN_TICKERS: usize = 2;

/// Lookback period selector understood by the scan engine.
///
/// Wire strings match the engine's enum exactly (`6mo`, `1y`, ... `custom`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum Period {
    #[serde(rename = "6mo")]
    #[strum(serialize = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    #[strum(serialize = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    #[strum(serialize = "2y")]
    TwoYears,
    /// Engine default
    #[default]
    #[serde(rename = "3y")]
    #[strum(serialize = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    #[strum(serialize = "5y")]
    FiveYears,
    /// Explicit start/end date pair, both required
    #[serde(rename = "custom")]
    #[strum(serialize = "custom")]
    Custom,
}

/// A validated-on-submit scan request.
///
/// Tickers are trimmed, uppercased and deduplicated (first occurrence wins)
/// at construction time, so `validate` only has to count them.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRequest {
    pub tickers: Vec<String>,
    pub period: Period,
    pub interval: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ScanRequest {
    pub fn new<I, S>(tickers: I, period: Period) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tickers: normalize_tickers(tickers),
            period,
            // Engine default sampling interval
            interval: "1d".to_string(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = interval.into();
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Check the request invariants. Called by the task client before the
    /// submit round-trip; never retried, never auto-corrected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tickers.len() < MIN_TICKERS {
            return Err(ValidationError::TooFewTickers {
                count: self.tickers.len(),
            });
        }
        if self.period == Period::Custom {
            match (self.start_date, self.end_date) {
                (Some(start), Some(end)) if start < end => {}
                (Some(start), Some(end)) => {
                    return Err(ValidationError::EmptyDateRange { start, end });
                }
                _ => return Err(ValidationError::MissingCustomDates),
            }
        }
        Ok(())
    }
}

/// Trim, uppercase and deduplicate while preserving first-seen order.
fn normalize_tickers<I, S>(tickers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    for ticker in tickers {
        let normalized = ticker.as_ref().trim().to_uppercase();
        if normalized.is_empty() || seen.contains(&normalized) {
            continue;
        }
        seen.push(normalized);
    }
    seen
}
