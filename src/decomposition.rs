//! Decomposition result.
//!
//! A [`Decomposition`] holds the rotation components in extraction order
//! (finest time scale first) followed by exactly one terminal residual. All
//! components have the length of the input, and their elementwise sum
//! reproduces the input up to floating-point rounding.

use serde::{Deserialize, Serialize};

use crate::math::sum_signals;
use crate::stopping::StopReason;

/// Ordered rotation components plus the terminal residual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Rotation components followed by the residual.
    components: Vec<Vec<f64>>,

    /// Clause of the stopping rule that ended the loop.
    pub stop_reason: StopReason,

    /// Number of decomposition steps performed.
    pub iterations: usize,

    /// Steps at which an envelope had no control points.
    pub fallback_steps: Vec<usize>,
}

impl Decomposition {
    pub(crate) fn new(
        components: Vec<Vec<f64>>,
        stop_reason: StopReason,
        fallback_steps: Vec<usize>,
    ) -> Self {
        debug_assert!(components.len() >= 2);
        Self {
            iterations: components.len() - 1,
            components,
            stop_reason,
            fallback_steps,
        }
    }

    /// Total number of components, residual included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True only for a deserialized value without components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Length of each component (the input length).
    #[must_use]
    pub fn signal_len(&self) -> usize {
        self.components.first().map_or(0, Vec::len)
    }

    /// All components, residual last.
    #[must_use]
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    /// Component at `index`, residual included.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&[f64]> {
        self.components.get(index).map(Vec::as_slice)
    }

    /// Rotation components only.
    #[must_use]
    pub fn rotations(&self) -> &[Vec<f64>] {
        &self.components[..self.components.len().saturating_sub(1)]
    }

    /// Terminal residual baseline.
    #[must_use]
    pub fn residual(&self) -> &[f64] {
        self.components.last().map_or(&[][..], Vec::as_slice)
    }

    /// Iterate over all components, residual last.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.components.iter().map(Vec::as_slice)
    }

    /// Elementwise sum of every component.
    #[must_use]
    pub fn reconstruct(&self) -> Vec<f64> {
        sum_signals(&self.components, self.signal_len())
    }

    /// Whether some step ran without a full set of envelope control points.
    ///
    /// Signals too short or too flat to have extrema still decompose, but
    /// their baselines come from the constant fallback.
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        !self.fallback_steps.is_empty()
    }

    /// Take ownership of the components.
    #[must_use]
    pub fn into_components(self) -> Vec<Vec<f64>> {
        self.components
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a Vec<f64>;
    type IntoIter = std::slice::Iter<'a, Vec<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
