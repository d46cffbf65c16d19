//! One candidate trade out of a completed scan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::ValidationError;

/// Which cointegration test(s) flagged the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum DetectionMethod {
    #[serde(rename = "CADF")]
    #[strum(serialize = "CADF")]
    Cadf,
    Johansen,
    /// Both tests agreed, the strongest signal
    Both,
}

/// One point of the engine's dense z-score history, when it supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScorePoint {
    pub time: NaiveDate,
    pub value: f64,
}

/// A candidate trade produced inside a `completed` task.
///
/// Value object, freely copied; field names mirror the engine's response
/// schema one-to-one. The `Yes`/`No`/`N/A` flags keep their wire spelling and
/// are interpreted through the accessor methods.
#[derive(Debug, Clone, Deserialize)]
pub struct PairResult {
    /// Display label, e.g. `AAPL/MSFT`
    pub pair: String,
    /// Human-readable trade description ("Sell 1.2 of X & Buy 1 of Y ...")
    pub combo: String,
    pub method: DetectionMethod,
    pub price_corr: f64,
    /// Current spread deviation in standard-deviation units; the sign picks
    /// the trade direction
    pub z_score: f64,
    /// Mean-reversion half-life in bars; strictly positive, it ends up as a
    /// denominator in the spread synthesizer
    pub half_life: f64,
    pub move_to_mean: f64,
    pub exp_return: f64,
    pub unit_price: f64,
    /// Mean-reversion persistence in (0, 1); lower = stronger reversion
    pub hurst: f64,
    pub prob_profit: f64,
    pub prob_profit_low: f64,
    pub prob_profit_high: f64,
    pub same_sector: String,
    pub extreme_z_in_hl: String,
    pub extreme_z_detail: String,
    pub profitable_since_extreme: String,
    pub pnl_since_extreme: f64,
    /// Dense history, present only when the engine had enough data to build
    /// one. Empty means the caller should synthesize a path instead.
    #[serde(default)]
    pub historical_z_scores: Vec<ZScorePoint>,
}

impl PairResult {
    /// Check the numeric invariants the synthesizer and presentation rely on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.half_life.is_finite() && self.half_life > 0.0) {
            return Err(ValidationError::NonPositiveHalfLife {
                half_life: self.half_life,
            });
        }
        if !(self.prob_profit_low <= self.prob_profit && self.prob_profit <= self.prob_profit_high)
        {
            return Err(ValidationError::ProbabilityBoundsOutOfOrder {
                low: self.prob_profit_low,
                estimate: self.prob_profit,
                high: self.prob_profit_high,
            });
        }
        Ok(())
    }

    pub fn is_same_sector(&self) -> bool {
        self.same_sector == "Yes"
    }

    /// True when the current z-score is the most extreme seen inside the last
    /// half-life window.
    pub fn is_extreme_in_half_life(&self) -> bool {
        self.extreme_z_in_hl == "Yes"
    }

    pub fn has_history(&self) -> bool {
        !self.historical_z_scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "pair": "AAPL/MSFT",
            "combo": "Sell 1.2 of AAPL (230.1, Tech)  &  Buy 1 of MSFT (415.3, Tech)",
            "method": "Both",
            "price_corr": 0.94,
            "z_score": -2.3,
            "half_life": 18,
            "move_to_mean": 4.1,
            "exp_return": 1.8,
            "unit_price": 691.4,
            "hurst": 0.31,
            "prob_profit": 72.5,
            "prob_profit_low": 61.0,
            "prob_profit_high": 84.0,
            "same_sector": "Yes",
            "extreme_z_in_hl": "No",
            "extreme_z_detail": "-2.8 (2024-11-02)",
            "profitable_since_extreme": "Yes",
            "pnl_since_extreme": 3.2,
            "historical_z_scores": [
                {"time": "2024-11-01", "value": -2.6},
                {"time": "2024-11-02", "value": -2.8}
            ]
        }"#
    }

    #[test]
    fn test_decodes_engine_payload() {
        let result: PairResult = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(result.method, DetectionMethod::Both);
        assert_eq!(result.half_life, 18.0, "integer half-life widens to f64");
        assert!(result.is_same_sector());
        assert!(!result.is_extreme_in_half_life());
        assert!(result.has_history());
        assert_eq!(
            result.historical_z_scores[1].time,
            NaiveDate::from_ymd_opt(2024, 11, 2).unwrap()
        );
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_missing_history_defaults_to_empty() {
        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        value.as_object_mut().unwrap().remove("historical_z_scores");
        let result: PairResult = serde_json::from_value(value).unwrap();
        assert!(!result.has_history());
    }

    #[test]
    fn test_invariant_violations_are_caught() {
        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        value["half_life"] = serde_json::json!(0);
        let result: PairResult = serde_json::from_value(value).unwrap();
        assert!(matches!(
            result.validate(),
            Err(ValidationError::NonPositiveHalfLife { .. })
        ));

        let mut value: serde_json::Value = serde_json::from_str(sample_json()).unwrap();
        value["prob_profit_low"] = serde_json::json!(90.0);
        let result: PairResult = serde_json::from_value(value).unwrap();
        assert!(matches!(
            result.validate(),
            Err(ValidationError::ProbabilityBoundsOutOfOrder { .. })
        ));
    }
}
