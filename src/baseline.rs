//! Baseline extraction from the extrema envelopes.
//!
//! The upper envelope runs through `(i, x[i])` for every maximum and the lower
//! envelope through `(i, x[i])` for every minimum. Both are evaluated on the
//! full sample grid by piecewise-linear interpolation with flat extrapolation
//! and then blended:
//!
//! ```text
//! baseline = alpha * upper + (1 - alpha) * lower
//! ```
//!
//! # Fallback policy
//!
//! An envelope with a single control point is the constant through that point.
//! An envelope with no control points is the constant mean of the signal. The
//! baseline is therefore always finite for finite input; the fallback is
//! reported through [`Envelopes::fallback`] so callers can treat the result as
//! low confidence.

use crate::math::{interp_linear, mean, Extrema};

/// Which envelopes had to be replaced by the signal mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvelopeFallback {
    /// Upper envelope had no maxima.
    pub upper: bool,
    /// Lower envelope had no minima.
    pub lower: bool,
}

impl EnvelopeFallback {
    /// True when either envelope fell back to the mean.
    #[must_use]
    pub const fn any(self) -> bool {
        self.upper || self.lower
    }
}

/// Upper and lower envelopes of a signal on its sample grid.
#[derive(Debug, Clone)]
pub struct Envelopes {
    /// Curve through the maxima.
    pub upper: Vec<f64>,
    /// Curve through the minima.
    pub lower: Vec<f64>,
    /// Envelopes that were replaced by a constant.
    pub fallback: EnvelopeFallback,
}

impl Envelopes {
    /// Build both envelopes of `signal` from its extrema.
    #[must_use]
    pub fn build(signal: &[f64], extrema: &Extrema) -> Self {
        let (upper, upper_fallback) = envelope(signal, &extrema.maxima);
        let (lower, lower_fallback) = envelope(signal, &extrema.minima);
        Self {
            upper,
            lower,
            fallback: EnvelopeFallback {
                upper: upper_fallback,
                lower: lower_fallback,
            },
        }
    }

    /// Blend the envelopes into a baseline.
    #[must_use]
    pub fn blend(&self, alpha: f64) -> Vec<f64> {
        self.upper
            .iter()
            .zip(self.lower.iter())
            .map(|(&u, &l)| alpha * u + (1.0 - alpha) * l)
            .collect()
    }
}

/// Interpolate one envelope through the samples at `indices`.
///
/// Control values are the signal's own samples at those indices, so the lower
/// envelope passes through the minima themselves and not their negation.
fn envelope(signal: &[f64], indices: &[usize]) -> (Vec<f64>, bool) {
    let values: Vec<f64> = indices.iter().map(|&i| signal[i]).collect();
    match interp_linear(indices, &values, signal.len()) {
        Some(curve) => (curve, false),
        None => (vec![mean(signal); signal.len()], true),
    }
}

/// Build the baseline of `signal` from its extrema.
///
/// `alpha` is expected to be in `[0, 1]`; the decomposer validates it before
/// the first step.
///
/// # Example
///
/// ```
/// use itd_decomposition::{build_baseline, math::detect_extrema};
///
/// let x = [0.0, 1.0, 0.0, -1.0, 0.0];
/// let extrema = detect_extrema(&x);
/// let (baseline, fallback) = build_baseline(&x, &extrema, 0.5);
/// assert!(baseline.iter().all(|v| v.abs() < 1e-12));
/// assert!(!fallback.any());
/// ```
#[must_use]
pub fn build_baseline(
    signal: &[f64],
    extrema: &Extrema,
    alpha: f64,
) -> (Vec<f64>, EnvelopeFallback) {
    let envelopes = Envelopes::build(signal, extrema);
    (envelopes.blend(alpha), envelopes.fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::detect_extrema;
    use approx::assert_relative_eq;

    #[test]
    fn test_lower_envelope_keeps_sample_sign() {
        let x = [0.0, 2.0, -3.0, 2.0, -3.0, 0.0];
        let env = Envelopes::build(&x, &detect_extrema(&x));
        assert_eq!(env.lower[2], -3.0);
        assert_eq!(env.lower[4], -3.0);
        assert_eq!(env.upper[1], 2.0);
        assert!(!env.fallback.any());
    }

    #[test]
    fn test_alpha_extremes_select_envelopes() {
        let x = [0.0, 2.0, -1.0, 3.0, -2.0, 0.0];
        let extrema = detect_extrema(&x);
        let env = Envelopes::build(&x, &extrema);

        let (upper_only, _) = build_baseline(&x, &extrema, 1.0);
        let (lower_only, _) = build_baseline(&x, &extrema, 0.0);
        assert_eq!(upper_only, env.upper);
        assert_eq!(lower_only, env.lower);
    }

    #[test]
    fn test_blend_weights() {
        let x = [0.0, 4.0, -2.0, 4.0, -2.0, 0.0];
        let (baseline, _) = build_baseline(&x, &detect_extrema(&x), 0.32);
        // Both envelopes are flat here: 4 above, -2 below.
        for v in baseline {
            assert_relative_eq!(v, 0.32 * 4.0 + 0.68 * -2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_control_point_is_constant() {
        let x = [0.0, 1.0, 5.0, 1.0, 0.0];
        let env = Envelopes::build(&x, &detect_extrema(&x));
        assert!(env.upper.iter().all(|&v| v == 5.0));
        assert!(env.fallback.lower);
        assert!(!env.fallback.upper);
    }

    #[test]
    fn test_no_control_points_uses_mean() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let (baseline, fallback) = build_baseline(&x, &detect_extrema(&x), 0.32);
        assert!(fallback.upper && fallback.lower);
        for v in baseline {
            assert_relative_eq!(v, 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_length_one_signal() {
        let x = [7.0];
        let (baseline, fallback) = build_baseline(&x, &detect_extrema(&x), 0.32);
        assert_eq!(baseline.len(), 1);
        assert_relative_eq!(baseline[0], 7.0, epsilon = 1e-12);
        assert!(fallback.any());
    }
}
