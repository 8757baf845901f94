//! Tuning constants for the evolution engine.
//!
//! These are the only numeric knobs in the step function; every formula in
//! [`crate::evolution`] reads from here rather than embedding literals.

/// Threshold below which viability is treated as exactly zero (collapsed).
pub const EPS_KAPPA: f64 = 1e-12;
/// Floor under which the metric determinant is clamped while live.
pub const EPS_METRIC: f64 = 1e-12;
/// Floor of the temporal density, reached in the limit as kappa grows large.
pub const TAU_MIN: f64 = 1e-6;
/// Scale of the temporal-density decay term.
pub const TAU_SCALE: f64 = 1.0;
/// Decay-rate coefficient for the `exp(-LAMBDA_K * kappa)` term in tau.
pub const LAMBDA_K: f64 = 1.0;
/// Relaxation rate for the deformation vector.
pub const LAMBDA_RELAX: f64 = 0.1;
/// Hard clamp magnitude for each deformation component.
pub const MAX_DELTA: f64 = 10.0;

/// Tension gain from deformation magnitude.
pub const TENSION_A: f64 = 1.0;
/// Tension decay per unit `dt`.
pub const TENSION_B: f64 = 0.05;

/// Viability decay coefficient on curvature.
pub const DECAY_A1: f64 = 0.002;
/// Viability decay coefficient on tension.
pub const DECAY_A2: f64 = 0.01;
/// Viability decay coefficient on morphology index.
pub const DECAY_A3: f64 = 0.02;
/// Baseline viability decay, applied even without an `Update` event.
pub const DECAY_A4: f64 = 0.001;

/// Curvature gain from squared deformation norm.
pub const CURV_A1: f64 = 0.01;
/// Curvature gain from tension.
pub const CURV_A2: f64 = 0.01;
/// Curvature gain from memory-over-viability.
pub const CURV_A3: f64 = 0.005;

/// Metric determinant scale at zero curvature.
pub const METRIC_C1: f64 = 1.0;
/// Metric determinant exponential-decay coefficient on curvature.
pub const METRIC_C2: f64 = 1.0;

/// Morphology-index saturation constant (`R / (R + MORPH_BETA)`).
pub const MORPH_BETA: f64 = 1.0;

/// Reset value for tension.
pub const RESET_PHI: f64 = 0.0;
/// Reset value for viability.
pub const RESET_KAPPA: f64 = 1.0;

/// Lower clamp bound for canonicalized `dt`.
pub const DT_MIN: f64 = 0.0;
/// Upper clamp bound for canonicalized `dt`.
pub const DT_MAX: f64 = 1e6;
