//! Stage 0 of the pipeline: numeric hygiene at the boundary.
//!
//! Rejects any field that is NaN, infinite, or a non-zero subnormal. Rust's
//! `f64` arithmetic is always round-to-nearest-ties-to-even — there is no
//! runtime-configurable rounding mode reachable from safe code the way the
//! original's `fegetround()` check observes, so that half of the guard
//! collapses to the `const` assertion below rather than a syscall.
//! Intermediate subnormals produced by arithmetic inside the evolution
//! engine are never checked; only input values are gated here.

use crate::types::StructEvent;

const _: () = assert!(f64::RADIX == 2, "f64 must be IEEE-754 binary");

/// A value is numerically safe if finite and either zero or normal.
#[must_use]
pub fn numeric_safe(x: f64) -> bool {
    x.is_finite() && (x == 0.0 || x.classify() != std::num::FpCategory::Subnormal)
}

/// Checks every field of a state for numeric safety.
#[must_use]
pub fn state_is_safe(delta: &[f64; 4], phi: f64, m: f64, kappa: f64) -> bool {
    delta.iter().all(|&d| numeric_safe(d)) && numeric_safe(phi) && numeric_safe(m) && numeric_safe(kappa)
}

/// Checks every field of an event for numeric safety.
#[must_use]
pub fn event_is_safe(event: &StructEvent) -> bool {
    match *event {
        StructEvent::Update { stimulus, dt } => stimulus.iter().all(|&s| numeric_safe(s)) && numeric_safe(dt),
        StructEvent::Gap { dt } | StructEvent::Heartbeat { dt } | StructEvent::Reset { dt } => numeric_safe(dt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_safe() {
        assert!(numeric_safe(0.0));
        assert!(numeric_safe(-0.0));
    }

    #[test]
    fn nan_and_inf_are_unsafe() {
        assert!(!numeric_safe(f64::NAN));
        assert!(!numeric_safe(f64::INFINITY));
        assert!(!numeric_safe(f64::NEG_INFINITY));
    }

    #[test]
    fn subnormal_is_unsafe() {
        assert!(!numeric_safe(f64::MIN_POSITIVE / 2.0));
    }

    #[test]
    fn normal_values_are_safe() {
        assert!(numeric_safe(1.0));
        assert!(numeric_safe(-123.456));
    }

    #[test]
    fn event_safety_checks_stimulus_only_for_update() {
        let ev = StructEvent::Gap { dt: f64::NAN };
        assert!(!event_is_safe(&ev));
        let ev = StructEvent::Update { stimulus: [1.0, 2.0, 3.0, 4.0], dt: 1.0 };
        assert!(event_is_safe(&ev));
    }
}
