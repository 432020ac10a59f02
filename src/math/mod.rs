//! Numerical building blocks for the decomposition.
//!
//! This module provides:
//! - [`extrema`]: strict local maxima/minima detection
//! - [`interp`]: piecewise-linear interpolation with flat extrapolation
//! - [`stats`]: energy, mean, RMS and central moments

pub mod extrema;
pub mod interp;
pub mod stats;

pub use extrema::{count_extrema, detect_extrema, Extrema};
pub use interp::interp_linear;
pub use stats::{central_moment, energy, mean, rms, sum_signals};
