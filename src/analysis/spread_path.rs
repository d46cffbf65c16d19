//! Mean-reverting spread path synthesis.
//!
//! The engine reports a scalar summary per pair (current z-score, half-life)
//! but not always a dense history, and the presentation layer still wants a
//! plausible mean-reverting path for context. This module manufactures one:
//! an AR(1) walk whose persistence matches the stated half-life, anchored so
//! its newest point equals the authoritative z-score. Every earlier point is
//! fabricated, which is why the output type is named `SyntheticSeries` and
//! must never be passed off as real history.

use std::f64::consts::LN_2;

use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use thiserror::Error;

use crate::config::SERVICE;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthError {
    #[error("half-life must be strictly positive and finite, got {0}")]
    InvalidHalfLife(f64),
}

/// A fabricated spread trajectory plus its stationary bands.
///
/// Parallel vectors, one entry per calendar day, oldest first. Carries no
/// statistical authority; purely a rendering aid.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
    /// Constant `+band_sigma * rolling_sigma` line
    pub upper_band: Vec<f64>,
    /// Constant `-band_sigma * rolling_sigma` line
    pub lower_band: Vec<f64>,
    /// Constant zero reference (the spread equilibrium)
    pub mean_line: Vec<f64>,
}

impl SyntheticSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The one non-fabricated point: today's date and the engine-reported
    /// deviation rescaled into spread units.
    pub fn anchor(&self) -> Option<(NaiveDate, f64)> {
        match (self.dates.last(), self.values.last()) {
            (Some(&date), Some(&value)) => Some((date, value)),
            _ => None,
        }
    }
}

/// Stationary standard deviation implied by a half-life under the AR(1)
/// model used here: `sqrt(half_life / (2 ln 2))`.
pub fn stationary_sigma(half_life: f64) -> f64 {
    (half_life / (2.0 * LN_2)).sqrt()
}

/// Synthesize a `length_days`-point spread path ending today.
///
/// The recursion is `x[i] = phi * x[i-1] + sqrt(1 - phi^2) * u[i]` with
/// `phi = exp(-ln 2 / half_life)`, `u` uniform on [-1, 1] and `x[-1] = 0`;
/// the `sqrt(1 - phi^2)` factor keeps the stationary variance at the
/// innovation's own variance regardless of persistence. The final point is
/// then overwritten with `current_z * stationary_sigma(half_life)` so the
/// rendered series agrees with the engine where it matters.
///
/// Repeated calls differ in every interior point but always share the anchor
/// and band values.
pub fn synthesize_spread_path(
    half_life: f64,
    current_z: f64,
    length_days: usize,
) -> Result<SyntheticSeries, SynthError> {
    if !half_life.is_finite() || half_life <= 0.0 {
        return Err(SynthError::InvalidHalfLife(half_life));
    }

    let phi = (-LN_2 / half_life).exp();
    let innovation_scale = (1.0 - phi * phi).sqrt();
    let sigma = stationary_sigma(half_life);

    let today = Utc::now().date_naive();
    let mut rng = rand::rng();

    let mut dates = Vec::with_capacity(length_days);
    let mut values = Vec::with_capacity(length_days);
    let mut previous = 0.0;
    for i in 0..length_days {
        let days_back = (length_days - 1 - i) as u64;
        dates.push(today - Days::new(days_back));
        let noise: f64 = rng.random_range(-1.0..=1.0);
        let next = phi * previous + innovation_scale * noise;
        values.push(next);
        previous = next;
    }

    // Anchor: the newest point is the engine's number, not ours
    if let Some(last) = values.last_mut() {
        *last = current_z * sigma;
    }

    let band = SERVICE.synth.band_sigma * sigma;
    Ok(SyntheticSeries {
        dates,
        values,
        upper_band: vec![band; length_days],
        lower_band: vec![-band; length_days],
        mean_line: vec![0.0; length_days],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_anchor_matches_engine_value() {
        let series = synthesize_spread_path(30.0, 2.5, 252).unwrap();
        let expected = 2.5 * (30.0 / (2.0 * LN_2)).sqrt();
        let (_, anchor) = series.anchor().unwrap();
        assert!(
            (anchor - expected).abs() < TOL,
            "anchor {anchor} should equal z * rolling sigma = {expected}"
        );
    }

    #[test]
    fn test_bands_are_constant_at_two_sigma() {
        let series = synthesize_spread_path(30.0, 2.5, 252).unwrap();
        let expected = 2.0 * (30.0 / (2.0 * LN_2)).sqrt();
        assert!(series.upper_band.iter().all(|&b| (b - expected).abs() < TOL));
        assert!(series.lower_band.iter().all(|&b| (b + expected).abs() < TOL));
        assert!(series.mean_line.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_shape_and_dates() {
        let series = synthesize_spread_path(18.0, 2.3, 252).unwrap();
        assert_eq!(series.len(), 252);
        assert_eq!(series.dates.len(), 252);
        assert_eq!(series.upper_band.len(), 252);
        assert_eq!(series.lower_band.len(), 252);
        assert_eq!(series.mean_line.len(), 252);
        // Consecutive calendar days ending today
        let today = Utc::now().date_naive();
        assert_eq!(*series.dates.last().unwrap(), today);
        for window in series.dates.windows(2) {
            assert_eq!(window[1] - window[0], chrono::Duration::days(1));
        }
    }

    #[test]
    fn test_interior_randomized_but_anchor_deterministic() {
        let a = synthesize_spread_path(30.0, 2.5, 252).unwrap();
        let b = synthesize_spread_path(30.0, 2.5, 252).unwrap();
        assert_eq!(a.anchor(), b.anchor(), "anchor is a pure function of inputs");
        assert_eq!(a.upper_band, b.upper_band);
        assert_eq!(a.lower_band, b.lower_band);
        assert_ne!(
            a.values[..251],
            b.values[..251],
            "interior points come from fresh randomness each call"
        );
    }

    #[test]
    fn test_values_stay_finite() {
        for half_life in [0.5, 1.0, 18.0, 250.0] {
            let series = synthesize_spread_path(half_life, -3.0, 252).unwrap();
            assert!(
                series.values.iter().all(|v| v.is_finite()),
                "no NaN/inf for half-life {half_life}"
            );
        }
    }

    #[test]
    fn test_non_positive_half_life_fails_fast() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = synthesize_spread_path(bad, 2.0, 252).unwrap_err();
            assert!(matches!(err, SynthError::InvalidHalfLife(_)));
        }
    }

    #[test]
    fn test_zero_length_yields_empty_series() {
        let series = synthesize_spread_path(10.0, 1.0, 0).unwrap();
        assert!(series.is_empty());
        assert!(series.anchor().is_none());
    }
}
