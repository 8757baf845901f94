//! Stage 3 of the pipeline: the invariant validator.
//!
//! Eight checks run unconditionally, in the fixed order used for both the
//! bitmask's bit positions and the execution order itself: Memory, Kappa,
//! Metric, Tau, Morphology, Regime, Collapse, Forbidden. No check
//! short-circuits another — every bit in the returned mask reflects an
//! independently evaluated predicate.

use crate::constants::EPS_KAPPA;
use crate::types::{invariant_bits as bits, DerivedMetrics, Regime, StructuralState};

fn check_memory(prev: &StructuralState, next: &StructuralState) -> bool {
    next.m >= prev.m
}

fn check_kappa(next: &StructuralState) -> bool {
    next.kappa >= 0.0
}

fn check_metric(next: &StructuralState, metrics: &DerivedMetrics) -> bool {
    if next.kappa > EPS_KAPPA {
        metrics.det_g.is_finite() && metrics.det_g > 0.0
    } else {
        metrics.det_g == 0.0
    }
}

fn check_tau(next: &StructuralState, metrics: &DerivedMetrics) -> bool {
    if next.kappa > EPS_KAPPA {
        metrics.tau > 0.0
    } else {
        metrics.tau == 0.0
    }
}

fn check_morphology(metrics: &DerivedMetrics) -> bool {
    (0.0..=1.0).contains(&metrics.mu)
}

fn check_regime(prev: &StructuralState, metrics: &DerivedMetrics) -> bool {
    match metrics.regime {
        Some(r) => r >= prev.regime_prev,
        None => false,
    }
}

fn check_collapse(next: &StructuralState, metrics: &DerivedMetrics) -> bool {
    if next.kappa <= EPS_KAPPA {
        metrics.det_g == 0.0 && metrics.tau == 0.0 && metrics.mu == 1.0 && metrics.regime == Some(Regime::Col)
    } else {
        true
    }
}

fn check_forbidden(next: &StructuralState, metrics: &DerivedMetrics) -> bool {
    let state_finite = next.delta.iter().all(|d| d.is_finite()) && next.phi.is_finite() && next.m.is_finite() && next.kappa.is_finite();
    let metrics_finite = metrics.curvature_r.is_finite() && metrics.det_g.is_finite() && metrics.tau.is_finite() && metrics.mu.is_finite();
    let kappa_nonneg = next.kappa >= 0.0;
    let live_consistency = next.kappa <= EPS_KAPPA || (metrics.det_g > 0.0 && metrics.tau > 0.0);
    state_finite && metrics_finite && kappa_nonneg && live_consistency
}

/// Runs all eight checks and returns `(bitmask, all_ok)`.
pub fn validate(prev: &StructuralState, next: &StructuralState, metrics: &DerivedMetrics) -> (u8, bool) {
    let mut mask = 0u8;
    if check_memory(prev, next) {
        mask |= bits::MEMORY;
    }
    if check_kappa(next) {
        mask |= bits::KAPPA;
    }
    if check_metric(next, metrics) {
        mask |= bits::METRIC;
    }
    if check_tau(next, metrics) {
        mask |= bits::TAU;
    }
    if check_morphology(metrics) {
        mask |= bits::MORPHOLOGY;
    }
    if check_regime(prev, metrics) {
        mask |= bits::REGIME;
    }
    if check_collapse(next, metrics) {
        mask |= bits::COLLAPSE;
    }
    if check_forbidden(next, metrics) {
        mask |= bits::FORBIDDEN;
    }
    (mask, mask == bits::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::evolve;
    use crate::types::StructEvent;

    #[test]
    fn basic_live_update_satisfies_all_checks() {
        let state = StructuralState::reset();
        let event = StructEvent::Update { stimulus: [1.0, 1.0, 1.0, 1.0], dt: 1.0 };
        let (next, metrics) = evolve(state, event);
        let (mask, all_ok) = validate(&state, &next, &metrics);
        assert!(all_ok, "mask = {mask:#010b}");
        assert_eq!(mask, bits::ALL);
    }

    #[test]
    fn regime_regression_is_rejected() {
        let mut prev = StructuralState::reset();
        prev.regime_prev = Regime::Rel;
        let metrics = DerivedMetrics { regime: Some(Regime::Acc), det_g: 1.0, tau: 1.0, mu: 0.0, ..Default::default() };
        let next = StructuralState { kappa: 1.0, ..prev };
        let (mask, all_ok) = validate(&prev, &next, &metrics);
        assert!(!all_ok);
        assert_eq!(mask & bits::REGIME, 0);
    }

    #[test]
    fn collapse_geometry_enforced_at_zero_kappa() {
        let prev = StructuralState::reset();
        let next = StructuralState { kappa: 0.0, regime_prev: Regime::Col, ..prev };
        let metrics = DerivedMetrics { det_g: 0.0, tau: 0.0, mu: 1.0, regime: Some(Regime::Col), ..Default::default() };
        let (_, all_ok) = validate(&prev, &next, &metrics);
        assert!(all_ok);
    }

    #[test]
    fn collapse_geometry_violation_detected() {
        let prev = StructuralState::reset();
        let next = StructuralState { kappa: 0.0, regime_prev: Regime::Col, ..prev };
        let metrics = DerivedMetrics { det_g: 0.5, tau: 0.0, mu: 1.0, regime: Some(Regime::Col), ..Default::default() };
        let (mask, all_ok) = validate(&prev, &next, &metrics);
        assert!(!all_ok);
        assert_eq!(mask & bits::COLLAPSE, 0);
    }

    #[test]
    fn memory_monotonicity_checked() {
        let prev = StructuralState { m: 5.0, ..StructuralState::reset() };
        let next = StructuralState { m: 4.0, kappa: 1.0, ..prev };
        let metrics = DerivedMetrics { det_g: 1.0, tau: 1.0, mu: 0.0, regime: Some(Regime::Acc), ..Default::default() };
        let (mask, all_ok) = validate(&prev, &next, &metrics);
        assert!(!all_ok);
        assert_eq!(mask & bits::MEMORY, 0);
    }
}
