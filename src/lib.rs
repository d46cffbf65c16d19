//! Client-side core for the OmniSpread pairs-trading scanner.
//!
//! Two independent pieces, both consumed by a presentation layer that lives
//! elsewhere: the asynchronous task-lifecycle client (`client`) that submits
//! a scan and polls it to completion, and the spread-path synthesizer
//! (`analysis`) that fabricates a mean-reverting context series when the
//! engine only returned a scalar summary. They share the data model in
//! `domain` and nothing else.

// Core modules
pub mod analysis;
pub mod client;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use analysis::{SynthError, SyntheticSeries, synthesize_spread_path};
pub use client::{CancelToken, ClientError, HttpScanService, ScanService, TaskClient, TrackOptions};
pub use domain::{
    PairResult, Period, ScanRequest, Task, TaskHandle, TaskStatus, ValidationError,
};
