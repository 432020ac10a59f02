//! Iterative decomposition controller.
//!
//! [`Decomposer`] holds the loop state explicitly: the step counter, the
//! current residual and the energy of the input. Each call to
//! [`Decomposer::step`] splits the residual once and evaluates the stopping
//! rule on the fresh baseline:
//!
//! ```text
//! Running --step--> split --check--> Running | Terminated
//! ```
//!
//! When the rule fires the baseline is appended as the terminal residual.
//! Otherwise it becomes the input of the next step. The budget clause does not
//! depend on the data, so at most `max_iterations` steps run and the result
//! holds at most `max_iterations + 1` components.

use log::{debug, info, warn};

use crate::config::ItdConfig;
use crate::decomposition::Decomposition;
use crate::error::{validate_signal, Result};
use crate::math::energy;
use crate::step::split;
use crate::stopping::{stop_reason, StopReason};

/// Result of advancing the controller by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A rotation component was extracted and the loop continues.
    Continue,
    /// The loop has terminated; further calls are no-ops.
    Terminated(StopReason),
}

/// Explicit state machine driving the decomposition loop.
///
/// # Example
///
/// ```
/// use itd_decomposition::{Decomposer, ItdConfig, StepOutcome};
///
/// let x: Vec<f64> = (0..200).map(|i| (i as f64 * 0.4).sin()).collect();
/// let mut decomposer = Decomposer::new(&x, ItdConfig::quick(3))?;
///
/// while decomposer.step() == StepOutcome::Continue {}
/// let result = decomposer.finish().expect("terminated");
/// assert!(result.len() <= 4);
/// # Ok::<(), itd_decomposition::ItdError>(())
/// ```
#[derive(Debug)]
pub struct Decomposer {
    /// Validated loop parameters.
    config: ItdConfig,

    /// Energy of the input signal.
    original_energy: f64,

    /// Steps performed so far.
    counter: usize,

    /// Signal the next step will split.
    residual: Vec<f64>,

    /// Rotation components, and the residual once terminated.
    components: Vec<Vec<f64>>,

    /// Steps whose baseline came from the constant fallback.
    fallback_steps: Vec<usize>,

    /// Set once the stopping rule fires.
    stopped: Option<StopReason>,
}

impl Decomposer {
    /// Validate the input and configuration and enter the running state.
    ///
    /// # Errors
    ///
    /// Returns an input error for empty or non-finite signals and a
    /// configuration error for an invalid [`ItdConfig`]. Nothing is computed
    /// in either case.
    pub fn new(signal: &[f64], config: ItdConfig) -> Result<Self> {
        validate_signal(signal)?;
        config.validate()?;

        Ok(Self {
            original_energy: energy(signal),
            counter: 0,
            residual: signal.to_vec(),
            components: Vec::with_capacity(config.max_iterations + 1),
            fallback_steps: Vec::new(),
            stopped: None,
            config,
        })
    }

    /// Steps performed so far.
    #[must_use]
    pub const fn iteration(&self) -> usize {
        self.counter
    }

    /// Signal the next step would split (the last baseline once terminated).
    #[must_use]
    pub fn residual(&self) -> &[f64] {
        &self.residual
    }

    /// Components produced so far.
    #[must_use]
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    /// Why the loop stopped, if it has.
    #[must_use]
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Whether the loop has terminated.
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.stopped.is_some()
    }

    /// Perform one decomposition step.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.stopped {
            return StepOutcome::Terminated(reason);
        }

        self.counter += 1;
        let out = split(&self.residual, self.config.alpha);

        debug!(
            "itd step {}: {} maxima, {} minima, baseline energy {:.6e}",
            self.counter,
            out.maxima,
            out.minima,
            energy(&out.baseline)
        );
        if out.fallback.any() {
            warn!(
                "itd step {}: envelope without control points (upper: {}, lower: {}), \
                 baseline falls back to the residual mean",
                self.counter, out.fallback.upper, out.fallback.lower
            );
            self.fallback_steps.push(self.counter);
        }

        self.components.push(out.rotation);
        self.residual = out.baseline;

        // The budget clause sees the ordinal of the step that would run next.
        match stop_reason(
            &self.residual,
            self.counter + 1,
            self.original_energy,
            &self.config,
        ) {
            Some(reason) => {
                info!("itd terminated after {} step(s): {}", self.counter, reason);
                self.components.push(self.residual.clone());
                self.stopped = Some(reason);
                StepOutcome::Terminated(reason)
            }
            None => StepOutcome::Continue,
        }
    }

    /// Step until the stopping rule fires and return the result.
    #[must_use]
    pub fn run(mut self) -> Decomposition {
        loop {
            if let StepOutcome::Terminated(reason) = self.step() {
                return Decomposition::new(self.components, reason, self.fallback_steps);
            }
        }
    }

    /// Consume a terminated controller; `None` while still running.
    #[must_use]
    pub fn finish(self) -> Option<Decomposition> {
        let reason = self.stopped?;
        Some(Decomposition::new(self.components, reason, self.fallback_steps))
    }
}

/// Decompose `signal` into rotation components and a terminal residual.
///
/// This is the main entry point. `alpha` weights the upper envelope in each
/// baseline (0.32 in the reference parameters, see [`crate::DEFAULT_ALPHA`]).
///
/// # Errors
///
/// Returns an error if:
/// - the signal is empty or contains NaN/infinite samples
/// - `max_iterations` is 0
/// - `alpha` lies outside `[0, 1]`
///
/// # Example
///
/// ```
/// use itd_decomposition::{decompose, DEFAULT_ALPHA};
///
/// let x: Vec<f64> = (0..500)
///     .map(|i| (i as f64 * 0.05).sin() + 0.2 * (i as f64 * 0.9).sin())
///     .collect();
/// let result = decompose(&x, 5, DEFAULT_ALPHA)?;
///
/// assert!(result.len() >= 2 && result.len() <= 6);
/// let sum = result.reconstruct();
/// assert!(sum.iter().zip(&x).all(|(a, b)| (a - b).abs() < 1e-9));
/// # Ok::<(), itd_decomposition::ItdError>(())
/// ```
pub fn decompose(signal: &[f64], max_iterations: usize, alpha: f64) -> Result<Decomposition> {
    let config = ItdConfig::default()
        .with_max_iterations(max_iterations)
        .with_alpha(alpha);
    decompose_with(signal, &config)
}

/// Decompose `signal` with a full configuration.
///
/// # Errors
///
/// See [`decompose`].
pub fn decompose_with(signal: &[f64], config: &ItdConfig) -> Result<Decomposition> {
    Ok(Decomposer::new(signal, config.clone())?.run())
}
