//! Termination rule for the decomposition loop.
//!
//! The loop stops as soon as any of three conditions holds:
//!
//! 1. the iteration budget is exhausted,
//! 2. the residual keeps at most `energy_ratio` of the input energy,
//! 3. the residual has at most `min_extrema` distinct extrema.

use serde::{Deserialize, Serialize};

use crate::config::ItdConfig;
use crate::math::{count_extrema, energy};

/// Why the decomposition loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// `iteration_count > max_iterations`.
    IterationBudget,
    /// Residual energy dropped to the negligible fraction.
    EnergyExhausted,
    /// Residual has too few oscillations to build envelopes from.
    TooFewExtrema,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::IterationBudget => "iteration budget exhausted",
            Self::EnergyExhausted => "residual energy exhausted",
            Self::TooFewExtrema => "too few extrema left",
        };
        f.write_str(s)
    }
}

/// Evaluate the stopping rule and report which clause fired.
///
/// Clauses are checked in order: budget, energy, extrema. `iteration_count`
/// is the ordinal of the step that would run next, so a budget of `k` admits
/// exactly `k` steps.
#[must_use]
pub fn stop_reason(
    residual: &[f64],
    iteration_count: usize,
    original_energy: f64,
    config: &ItdConfig,
) -> Option<StopReason> {
    if iteration_count > config.max_iterations {
        return Some(StopReason::IterationBudget);
    }
    if energy(residual) <= config.energy_ratio * original_energy {
        return Some(StopReason::EnergyExhausted);
    }
    if count_extrema(residual) <= config.min_extrema {
        return Some(StopReason::TooFewExtrema);
    }
    None
}

/// Whether the loop should stop, with the reference energy ratio and
/// extrema count.
#[must_use]
pub fn should_stop(
    residual: &[f64],
    iteration_count: usize,
    max_iterations: usize,
    original_energy: f64,
) -> bool {
    let config = ItdConfig::default().with_max_iterations(max_iterations);
    stop_reason(residual, iteration_count, original_energy, &config).is_some()
}
