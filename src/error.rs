//! Error types for decomposition operations.
//!
//! The engine fails fast: every error here is raised before the first
//! decomposition step runs. Numerical degeneracies that appear during the
//! iteration (an envelope without control points) are recovered locally and
//! never surface as errors.

use thiserror::Error;

/// Main error type for decomposition and pipeline operations.
#[derive(Error, Debug)]
pub enum ItdError {
    /// Input validation errors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Signal has no samples.
    #[error("Invalid input: signal is empty")]
    EmptySignal,

    /// Signal contains NaN or an infinity.
    #[error("Invalid input: non-finite sample at index {index}")]
    NonFiniteSample { index: usize },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Signal and time axis have mismatched lengths.
    #[error("Length mismatch: {signal} samples vs {time} timestamps")]
    LengthMismatch { signal: usize, time: usize },

    /// A required CSV column could not be identified.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for decomposition operations.
pub type Result<T> = std::result::Result<T, ItdError>;

impl ItdError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a non-finite sample error.
    #[must_use]
    pub const fn non_finite(index: usize) -> Self {
        Self::NonFiniteSample { index }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(signal: usize, time: usize) -> Self {
        Self::LengthMismatch { signal, time }
    }

    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(msg: impl Into<String>) -> Self {
        Self::MissingColumn(msg.into())
    }

    /// Whether this error rejects the input signal itself.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::EmptySignal | Self::NonFiniteSample { .. }
        )
    }

    /// Whether this error rejects the engine configuration.
    #[must_use]
    pub const fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

/// Reject empty signals and signals with NaN or infinite samples.
///
/// # Errors
///
/// Returns [`ItdError::EmptySignal`] or [`ItdError::NonFiniteSample`].
pub fn validate_signal(signal: &[f64]) -> Result<()> {
    if signal.is_empty() {
        return Err(ItdError::EmptySignal);
    }
    if let Some(index) = signal.iter().position(|v| !v.is_finite()) {
        return Err(ItdError::non_finite(index));
    }
    Ok(())
}
