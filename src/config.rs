//! Configuration for the decomposition engine and the fault classifier.
//!
//! This module provides [`ItdConfig`], which centralizes the tunable
//! parameters of the decomposition loop, and [`Thresholds`], the two limits
//! used by the classifier.
//!
//! # Example
//!
//! ```
//! use itd_decomposition::ItdConfig;
//!
//! // Reference parameters: 10 iterations, alpha = 0.32
//! let config = ItdConfig::default();
//!
//! // Short budget, as offered by the interactive range 3..=10
//! let quick = ItdConfig::quick(5);
//! assert_eq!(quick.max_iterations, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ItdError, Result};

/// Blending weight between the upper and lower envelope.
pub const DEFAULT_ALPHA: f64 = 0.32;

/// Iteration budget used by the batch pipeline.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Fraction of the original energy below which the residual is negligible.
pub const DEFAULT_ENERGY_RATIO: f64 = 0.01;

/// A residual with this many distinct extrema or fewer is not decomposed further.
pub const DEFAULT_MIN_EXTREMA: usize = 7;

/// Configuration for the decomposition loop.
///
/// # Parameters
///
/// - `max_iterations`: Upper bound on rotation components (>= 1).
/// - `alpha`: Weight of the upper envelope in the baseline, `[0, 1]`.
/// - `energy_ratio`: Stop once the residual energy falls to this fraction
///   of the input energy.
/// - `min_extrema`: Stop once the residual has at most this many extrema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItdConfig {
    /// Maximum number of decomposition steps.
    pub max_iterations: usize,

    /// Baseline blend: `alpha * upper + (1 - alpha) * lower`.
    /// Fixed rather than adapted per signal.
    pub alpha: f64,

    /// Residual energy fraction treated as exhausted.
    pub energy_ratio: f64,

    /// Distinct extrema count at or below which the loop terminates.
    pub min_extrema: usize,
}

impl Default for ItdConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            alpha: DEFAULT_ALPHA,
            energy_ratio: DEFAULT_ENERGY_RATIO,
            min_extrema: DEFAULT_MIN_EXTREMA,
        }
    }
}

impl ItdConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ItdError::InvalidConfig`] if any parameter is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations < 1 {
            return Err(ItdError::invalid_config("max_iterations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ItdError::invalid_config(format!(
                "alpha must lie in [0, 1], got {}",
                self.alpha
            )));
        }
        if !(0.0..1.0).contains(&self.energy_ratio) {
            return Err(ItdError::invalid_config(format!(
                "energy_ratio must lie in [0, 1), got {}",
                self.energy_ratio
            )));
        }
        Ok(())
    }

    /// Parameters of the reference decomposition.
    #[must_use]
    pub fn reference() -> Self {
        Self::default()
    }

    /// Reference parameters with a shorter iteration budget.
    #[must_use]
    pub fn quick(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..Self::default()
        }
    }

    /// Set the iteration budget.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the envelope blending weight.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the residual energy fraction.
    #[must_use]
    pub const fn with_energy_ratio(mut self, energy_ratio: f64) -> Self {
        self.energy_ratio = energy_ratio;
        self
    }

    /// Set the minimum extrema count.
    #[must_use]
    pub const fn with_min_extrema(mut self, min_extrema: usize) -> Self {
        self.min_extrema = min_extrema;
        self
    }
}

/// Classifier limits on the mean-like and spread-like statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Limit on the (maximum) component mean.
    pub mean: f64,
    /// Limit on the (maximum) component standard deviation.
    pub std: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            mean: 0.05,
            std: 0.2,
        }
    }
}

impl Thresholds {
    /// Create thresholds from explicit limits.
    #[must_use]
    pub const fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Validate the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ItdError::InvalidConfig`] for negative or non-finite limits.
    pub fn validate(&self) -> Result<()> {
        if !self.mean.is_finite() || self.mean < 0.0 {
            return Err(ItdError::invalid_config(
                "mean threshold must be finite and non-negative",
            ));
        }
        if !self.std.is_finite() || self.std < 0.0 {
            return Err(ItdError::invalid_config(
                "std threshold must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
