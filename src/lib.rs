//! Intrinsic Time-scale Decomposition
//!
//! Splits a one-dimensional signal into "rotation" components of increasingly
//! coarse time scale plus a terminal residual baseline, and summarises the
//! components for vibration-based fault detection.
//!
//! # Pipeline
//!
//! 1. Detect strict local maxima and minima ([`math::detect_extrema`])
//! 2. Interpolate upper and lower envelopes and blend them into a baseline
//!    ([`build_baseline`])
//! 3. Subtract the baseline to obtain a rotation component ([`split`])
//! 4. Repeat on the baseline until the stopping rule fires ([`Decomposer`])
//! 5. Summarise each component ([`FeatureRecord`]) and classify the machine
//!    condition ([`classify_components`])
//!
//! # Quick Start
//!
//! ```
//! use itd_decomposition::{decompose, DEFAULT_ALPHA};
//!
//! let signal: Vec<f64> = (0..1000)
//!     .map(|i| (i as f64 * 0.01).sin() + 0.1 * (i as f64 * 1.3).sin())
//!     .collect();
//!
//! let result = decompose(&signal, 5, DEFAULT_ALPHA)?;
//! assert!(result.len() <= 6);
//!
//! // Components always sum back to the input.
//! let sum = result.reconstruct();
//! assert!(sum.iter().zip(&signal).all(|(a, b)| (a - b).abs() < 1e-9));
//! # Ok::<(), itd_decomposition::ItdError>(())
//! ```
//!
//! # Guarantees
//!
//! | Property | Holds |
//! |----------|-------|
//! | Reconstruction | sum of all components equals the input |
//! | Length | every component has the input length |
//! | Bounded | at most `max_iterations + 1` components |
//! | Pure | no shared state; independent calls may run on any thread |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod baseline;
pub mod classifier;
pub mod config;
pub mod decomposer;
pub mod decomposition;
pub mod error;
pub mod features;
pub mod io;
pub mod math;
pub mod step;
pub mod stopping;

// Re-exports for convenient access
pub use baseline::{build_baseline, EnvelopeFallback, Envelopes};
pub use classifier::{classify, classify_components, Assessment, Condition};
pub use config::{ItdConfig, Thresholds, DEFAULT_ALPHA, DEFAULT_MAX_ITERATIONS};
pub use decomposer::{decompose, decompose_with, Decomposer, StepOutcome};
pub use decomposition::Decomposition;
pub use error::{ItdError, Result};
pub use features::{component_features, ComponentFeatures, FeatureRecord};
pub use io::TimedSignal;
pub use step::{split, StepOutput};
pub use stopping::{should_stop, stop_reason, StopReason};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
