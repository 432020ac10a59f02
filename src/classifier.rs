//! Threshold-based machine condition classifier.
//!
//! Two independent tests are applied: the mean against `thresholds.mean` and
//! the standard deviation against `thresholds.std`. Both exceeded is a fault,
//! one exceeded is a warning, neither is normal operation. Comparisons are
//! strict, so a value equal to its threshold does not count as exceeded.

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::features::{ComponentFeatures, FeatureRecord};

/// Machine condition derived from vibration features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Neither threshold exceeded.
    Normal,
    /// Exactly one threshold exceeded.
    Warning,
    /// Both thresholds exceeded.
    Fault,
}

impl Condition {
    /// Combine the two threshold tests.
    #[must_use]
    pub const fn from_exceedances(mean_exceeded: bool, std_exceeded: bool) -> Self {
        match (mean_exceeded, std_exceeded) {
            (true, true) => Self::Fault,
            (true, false) | (false, true) => Self::Warning,
            (false, false) => Self::Normal,
        }
    }

    /// Operator guidance for this condition.
    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::Normal => "Normal operation - no action required",
            Self::Warning => "Elevated vibration levels - monitor closely",
            Self::Fault => "High vibration levels detected - maintenance required",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning",
            Self::Fault => "Fault",
        };
        f.write_str(s)
    }
}

/// Statistics that drove a classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Resulting condition.
    pub condition: Condition,
    /// Mean statistic compared against the mean threshold.
    pub mean: f64,
    /// Spread statistic compared against the std threshold.
    pub std: f64,
    /// Thresholds in effect.
    pub thresholds: Thresholds,
}

impl Assessment {
    fn new(mean: f64, std: f64, thresholds: &Thresholds) -> Self {
        Self {
            condition: Condition::from_exceedances(mean > thresholds.mean, std > thresholds.std),
            mean,
            std,
            thresholds: *thresholds,
        }
    }
}

/// Classify a single feature record.
///
/// # Example
///
/// ```
/// use itd_decomposition::{classify, Condition, FeatureRecord, Thresholds};
///
/// let f = FeatureRecord::from_signal(&[0.0, 0.01, -0.01, 0.0])?;
/// assert_eq!(classify(&f, &Thresholds::default()).condition, Condition::Normal);
/// # Ok::<(), itd_decomposition::ItdError>(())
/// ```
#[must_use]
pub fn classify(features: &FeatureRecord, thresholds: &Thresholds) -> Assessment {
    Assessment::new(features.mean, features.std, thresholds)
}

/// Classify a whole decomposition from its per-component features.
///
/// Uses the largest component mean and the largest component standard
/// deviation. An empty slice is classified as normal.
#[must_use]
pub fn classify_components(rows: &[ComponentFeatures], thresholds: &Thresholds) -> Assessment {
    let max_mean = rows
        .iter()
        .map(|r| r.features.mean)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_std = rows
        .iter()
        .map(|r| r.features.std)
        .fold(f64::NEG_INFINITY, f64::max);
    Assessment::new(max_mean, max_std, thresholds)
}
