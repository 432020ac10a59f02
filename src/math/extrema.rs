//! Strict local extrema detection.
//!
//! A sample is a maximum when it is strictly greater than both immediate
//! neighbours, and a minimum when it is strictly less than both. The first
//! and last samples are never extrema. Plateaus produce no extremum, even when
//! the slope changes sign across them.

/// Indices of the local maxima and minima of a signal.
///
/// Both index lists are strictly increasing and disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extrema {
    /// Indices of strict local maxima.
    pub maxima: Vec<usize>,
    /// Indices of strict local minima.
    pub minima: Vec<usize>,
}

impl Extrema {
    /// Number of distinct extrema (maxima and minima together).
    ///
    /// The two lists are disjoint, so this is the size of their union.
    #[must_use]
    pub fn count(&self) -> usize {
        self.maxima.len() + self.minima.len()
    }

    /// True when no extremum was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty() && self.minima.is_empty()
    }
}

/// Locate the strict local maxima and minima of `signal`.
///
/// Returns empty lists for monotonic input or when `signal.len() < 3`.
///
/// # Example
///
/// ```
/// use itd_decomposition::math::detect_extrema;
///
/// let extrema = detect_extrema(&[1.0, 3.0, 2.0, 3.0, 1.0]);
/// assert_eq!(extrema.maxima, vec![1, 3]);
/// assert_eq!(extrema.minima, vec![2]);
/// ```
#[must_use]
pub fn detect_extrema(signal: &[f64]) -> Extrema {
    let mut extrema = Extrema::default();

    for (offset, w) in signal.windows(3).enumerate() {
        let i = offset + 1;
        if w[1] > w[0] && w[1] > w[2] {
            extrema.maxima.push(i);
        } else if w[1] < w[0] && w[1] < w[2] {
            extrema.minima.push(i);
        }
    }

    extrema
}

/// Count distinct strict extrema without collecting their indices.
#[must_use]
pub fn count_extrema(signal: &[f64]) -> usize {
    signal
        .windows(3)
        .filter(|w| (w[1] > w[0] && w[1] > w[2]) || (w[1] < w[0] && w[1] < w[2]))
        .count()
}
