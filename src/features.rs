//! Statistical features of a single component.
//!
//! Each component of a decomposition is summarised by a fixed record of ten
//! scalars. Moments use population (biased) estimators; kurtosis is the Fisher
//! (excess) kurtosis, so a Gaussian scores about zero.
//!
//! | Column | Definition |
//! |--------|------------|
//! | Mean | `sum(x) / n` |
//! | Max / Min | extreme samples |
//! | Standard Deviation | `sqrt(m2)` |
//! | Variance | `m2` |
//! | RMS | `sqrt(sum(x^2) / n)` |
//! | Kurtosis | `m4 / m2^2 - 3` |
//! | Skewness | `m3 / m2^1.5` |
//! | Peak to Peak | `max - min` |
//! | Crest Factor | `max / rms` |

use serde::{Deserialize, Serialize};

use crate::decomposition::Decomposition;
use crate::error::{validate_signal, Result};
use crate::math::{central_moment, mean, rms};

/// Scalar summary of one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Mean")]
    pub mean: f64,
    #[serde(rename = "Max")]
    pub max: f64,
    #[serde(rename = "Min")]
    pub min: f64,
    #[serde(rename = "Standard Deviation")]
    pub std: f64,
    #[serde(rename = "Variance")]
    pub variance: f64,
    #[serde(rename = "RMS")]
    pub rms: f64,
    /// Excess kurtosis, `0.0` for a constant signal.
    #[serde(rename = "Kurtosis")]
    pub kurtosis: f64,
    /// Skewness, `0.0` for a constant signal.
    #[serde(rename = "Skewness")]
    pub skewness: f64,
    #[serde(rename = "Peak to Peak")]
    pub peak_to_peak: f64,
    /// `max / rms`, `0.0` for an all-zero signal.
    #[serde(rename = "Crest Factor")]
    pub crest_factor: f64,
}

impl FeatureRecord {
    /// CSV column names, in [`FeatureRecord::values`] order.
    pub const COLUMNS: [&'static str; 10] = [
        "Mean",
        "Max",
        "Min",
        "Standard Deviation",
        "Variance",
        "RMS",
        "Kurtosis",
        "Skewness",
        "Peak to Peak",
        "Crest Factor",
    ];

    /// Compute the feature record of `signal`.
    ///
    /// # Errors
    ///
    /// Returns an input error for empty or non-finite signals.
    ///
    /// # Example
    ///
    /// ```
    /// use itd_decomposition::FeatureRecord;
    ///
    /// let f = FeatureRecord::from_signal(&[1.0, -1.0, 1.0, -1.0])?;
    /// assert_eq!(f.mean, 0.0);
    /// assert_eq!(f.rms, 1.0);
    /// assert_eq!(f.peak_to_peak, 2.0);
    /// # Ok::<(), itd_decomposition::ItdError>(())
    /// ```
    pub fn from_signal(signal: &[f64]) -> Result<Self> {
        validate_signal(signal)?;

        let mean = mean(signal);
        let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
        let m2 = central_moment(signal, mean, 2);
        let rms = rms(signal);

        let (kurtosis, skewness) = if m2 > 0.0 {
            let m3 = central_moment(signal, mean, 3);
            let m4 = central_moment(signal, mean, 4);
            (m4 / (m2 * m2) - 3.0, m3 / m2.powf(1.5))
        } else {
            (0.0, 0.0)
        };

        Ok(Self {
            mean,
            max,
            min,
            std: m2.sqrt(),
            variance: m2,
            rms,
            kurtosis,
            skewness,
            peak_to_peak: max - min,
            crest_factor: if rms > 0.0 { max / rms } else { 0.0 },
        })
    }

    /// Feature values in [`FeatureRecord::COLUMNS`] order.
    #[must_use]
    pub const fn values(&self) -> [f64; 10] {
        [
            self.mean,
            self.max,
            self.min,
            self.std,
            self.variance,
            self.rms,
            self.kurtosis,
            self.skewness,
            self.peak_to_peak,
            self.crest_factor,
        ]
    }
}

/// Feature record of one labelled decomposition component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentFeatures {
    /// `PRC_1`, `PRC_2`, ... with the residual last.
    pub label: String,
    /// Statistics of the component.
    pub features: FeatureRecord,
}

/// Label of the component at zero-based `index`.
#[must_use]
pub fn component_label(index: usize) -> String {
    format!("PRC_{}", index + 1)
}

/// Compute one feature row per component, residual included.
///
/// # Errors
///
/// Only fails if a component is non-finite, which a decomposition of a
/// validated signal never produces.
pub fn component_features(decomposition: &Decomposition) -> Result<Vec<ComponentFeatures>> {
    decomposition
        .iter()
        .enumerate()
        .map(|(i, component)| {
            Ok(ComponentFeatures {
                label: component_label(i),
                features: FeatureRecord::from_signal(component)?,
            })
        })
        .collect()
}
