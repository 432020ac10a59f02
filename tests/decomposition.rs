//! End-to-end properties of the decomposition engine.
//!
//! These tests check the reconstruction law, the length invariant and the
//! iteration bound on a range of signals, plus the reference scenarios.

use itd_decomposition::math::detect_extrema;
use itd_decomposition::{
    decompose, decompose_with, ItdConfig, ItdError, StopReason, DEFAULT_ALPHA,
};
use std::f64::consts::PI;

// =============================================================================
// SIGNAL GENERATORS
// =============================================================================

/// Deterministic noise in `[-0.5, 0.5)`.
fn noise(i: usize, seed: u64) -> f64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    (i, seed).hash(&mut hasher);
    (hasher.finish() % 10_000) as f64 / 10_000.0 - 0.5
}

/// Sine over ten radians with additive noise.
fn noisy_sine(n: usize, noise_amp: f64, seed: u64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = 10.0 * i as f64 / (n - 1) as f64;
            t.sin() + noise_amp * noise(i, seed)
        })
        .collect()
}

/// Sum of three tones with decreasing frequency.
fn multi_tone(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            (2.0 * PI * 60.0 * t).sin()
                + 0.6 * (2.0 * PI * 12.0 * t).sin()
                + 0.3 * (2.0 * PI * 2.0 * t).sin()
        })
        .collect()
}

/// Amplitude-modulated carrier on a linear trend.
fn modulated_trend(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            (1.0 + 0.5 * (2.0 * PI * 3.0 * t).sin()) * (2.0 * PI * 45.0 * t).sin() + 4.0 * t
        })
        .collect()
}

fn max_abs(x: &[f64]) -> f64 {
    x.iter().fold(0.0f64, |m, v| m.max(v.abs()))
}

fn assert_reconstructs(x: &[f64], max_iterations: usize, alpha: f64) {
    let result = decompose(x, max_iterations, alpha).unwrap();
    let tol = 1e-9 * max_abs(x).max(f64::MIN_POSITIVE);
    for (i, (got, want)) in result.reconstruct().iter().zip(x).enumerate() {
        assert!(
            (got - want).abs() <= tol,
            "sample {} off by {} (k={}, alpha={})",
            i,
            (got - want).abs(),
            max_iterations,
            alpha
        );
    }
}

// =============================================================================
// INVARIANTS
// =============================================================================

#[test]
fn test_reconstruction_law() {
    let signals = vec![
        noisy_sine(1000, 0.2, 1),
        noisy_sine(257, 1.0, 7),
        multi_tone(800),
        modulated_trend(640),
    ];

    for x in &signals {
        for k in [1, 3, 10] {
            for alpha in [0.0, DEFAULT_ALPHA, 0.5, 1.0] {
                assert_reconstructs(x, k, alpha);
            }
        }
    }
}

#[test]
fn test_length_invariant() {
    for n in [1, 2, 3, 10, 99, 1000] {
        let x = noisy_sine(n.max(2), 0.3, n as u64);
        let x = &x[..n];
        let result = decompose(x, 6, DEFAULT_ALPHA).unwrap();
        assert_eq!(result.signal_len(), n);
        assert!(result.iter().all(|c| c.len() == n), "n = {}", n);
    }
}

#[test]
fn test_bounded_iteration_count() {
    let x = noisy_sine(1000, 0.5, 3);
    for k in 1..=12 {
        let result = decompose(&x, k, DEFAULT_ALPHA).unwrap();
        assert!(result.len() >= 2);
        assert!(result.len() <= k + 1, "k = {}: {} components", k, result.len());
        assert_eq!(result.iterations, result.len() - 1);
        assert_eq!(result.rotations().len(), result.iterations);
    }
}

#[test]
fn test_pathological_inputs_terminate() {
    let cases: Vec<(&str, Vec<f64>)> = vec![
        ("constant", vec![3.0; 50]),
        ("zeros", vec![0.0; 50]),
        ("increasing", (0..50).map(f64::from).collect()),
        ("decreasing", (0..50).map(|i| -f64::from(i)).collect()),
        ("single", vec![1.5]),
        ("pair", vec![1.0, -1.0]),
    ];

    for (name, x) in cases {
        let result = decompose(&x, 10, DEFAULT_ALPHA).unwrap();
        assert_eq!(result.len(), 2, "{name}");
        assert!(result.is_low_confidence(), "{name}");
        for (got, want) in result.reconstruct().iter().zip(&x) {
            assert!((got - want).abs() < 1e-9, "{name}");
        }
    }
}

#[test]
fn test_constant_signal_has_flat_residual() {
    let result = decompose(&[2.5; 40], 5, DEFAULT_ALPHA).unwrap();
    assert_eq!(result.stop_reason, StopReason::TooFewExtrema);
    assert!(result.rotations()[0].iter().all(|v| v.abs() < 1e-12));
    assert!(result.residual().iter().all(|v| (v - 2.5).abs() < 1e-12));
}

#[test]
fn test_detector_is_idempotent() {
    let x = noisy_sine(500, 0.4, 11);
    assert_eq!(detect_extrema(&x), detect_extrema(&x));
}

#[test]
fn test_repeated_peak_extrema() {
    let extrema = detect_extrema(&[1.0, 3.0, 2.0, 3.0, 1.0]);
    assert_eq!(extrema.maxima, vec![1, 3]);
    assert_eq!(extrema.minima, vec![2]);
}

#[test]
fn test_deterministic() {
    let x = multi_tone(700);
    let a = decompose(&x, 5, DEFAULT_ALPHA).unwrap();
    let b = decompose(&x, 5, DEFAULT_ALPHA).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_rotation_carries_fast_content() {
    // The first rotation oscillates at least as often as every later component.
    let x = multi_tone(1000);
    let result = decompose(&x, 4, DEFAULT_ALPHA).unwrap();
    let first = detect_extrema(&result.rotations()[0]).count();
    let residual = detect_extrema(result.residual()).count();
    assert!(first >= residual, "{first} < {residual}");
}

// =============================================================================
// REFERENCE SCENARIOS
// =============================================================================

#[test]
fn test_scenario_short_alternating_pattern() {
    let x = [0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 1.0];
    let result = decompose(&x, 3, 0.32).unwrap();

    assert!(result.len() >= 2 && result.len() <= 4);
    assert!(result.iterations <= 2);
    assert_eq!(result.stop_reason, StopReason::TooFewExtrema);

    for (got, want) in result.reconstruct().iter().zip(&x) {
        assert!((got - want).abs() < 1e-12);
    }

    // Envelopes are flat at +1 and -1, so the baseline is 0.32 - 0.68.
    assert!(result.residual().iter().all(|v| (v + 0.36).abs() < 1e-12));
}

#[test]
fn test_scenario_noisy_sine_reaches_budget() {
    // Noise-dominated: hundreds of extrema survive five smoothing steps.
    let x = noisy_sine(1000, 4.0, 42);
    let result = decompose(&x, 5, DEFAULT_ALPHA).unwrap();

    assert_eq!(result.stop_reason, StopReason::IterationBudget);
    assert_eq!(result.len(), 6);
    assert_eq!(result.rotations().len(), 5);
    assert!(result.iter().all(|c| c.len() == 1000));
}

#[test]
fn test_scenario_zero_iterations_rejected() {
    let x = noisy_sine(100, 0.1, 5);
    let err = decompose(&x, 0, DEFAULT_ALPHA).unwrap_err();
    assert!(err.is_invalid_config());
    assert!(matches!(err, ItdError::InvalidConfig(_)));
}

#[test]
fn test_scenario_empty_input_rejected() {
    let err = decompose(&[], 5, DEFAULT_ALPHA).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_non_finite_input_rejected() {
    let mut x = noisy_sine(100, 0.1, 5);
    x[40] = f64::INFINITY;
    assert!(matches!(
        decompose(&x, 5, DEFAULT_ALPHA),
        Err(ItdError::NonFiniteSample { index: 40 })
    ));
}

#[test]
fn test_alpha_out_of_range_rejected() {
    let x = noisy_sine(100, 0.1, 5);
    for alpha in [-0.01, 1.01, f64::NAN] {
        assert!(decompose(&x, 5, alpha).unwrap_err().is_invalid_config());
    }
}

#[test]
fn test_looser_criteria_run_longer() {
    let x = multi_tone(2000);
    let strict = decompose_with(&x, &ItdConfig::quick(10)).unwrap();
    let loose = decompose_with(
        &x,
        &ItdConfig::quick(10).with_min_extrema(0).with_energy_ratio(0.0),
    )
    .unwrap();
    assert!(loose.len() >= strict.len());
}
