//! Stage 2 of the pipeline: the evolution engine.
//!
//! This is the arithmetic core. `evolve` takes an already-canonicalized
//! event and the pre-step state and produces the next state plus every
//! derived metric, in the exact order the formulas in the update rules
//! depend on each other. Nothing here allocates, blocks, or reads any
//! process-global resource; the function is total and side-effect-free.

use crate::constants::*;
use crate::types::{DerivedMetrics, MorphologyClass, Regime, StructEvent, StructuralState};

fn norm2(v: [f64; 4]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn squared_norm(v: [f64; 4]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>()
}

/// `compute_tau(kappa)`, used both for the memory-accumulation term (with
/// the pre-step kappa) and for the emitted `tau` metric (with the post-step
/// kappa).
fn compute_tau(kappa: f64) -> f64 {
    if kappa <= 0.0 {
        0.0
    } else {
        (TAU_MIN + TAU_SCALE * (-LAMBDA_K * kappa).exp()).max(TAU_MIN)
    }
}

/// `compute_curvature`, called once with the pre-step `(m, kappa)` to
/// derive the intermediate `R_new` (§4.3d) and again with the post-step
/// `(m', kappa')` to derive the emitted `curvature_R` (§4.3e). Both calls
/// share the already-updated `delta_sq_norm`/`phi`.
fn compute_curvature(delta_sq_norm: f64, phi: f64, m: f64, kappa: f64) -> f64 {
    CURV_A1 * delta_sq_norm + CURV_A2 * phi + CURV_A3 * (m / (1.0 + kappa))
}

fn compute_det_g(curvature_r: f64, kappa: f64) -> f64 {
    if kappa <= 0.0 {
        0.0
    } else {
        (METRIC_C1 * (-METRIC_C2 * curvature_r).exp() * kappa).max(EPS_METRIC)
    }
}

fn compute_mu(curvature_r: f64) -> f64 {
    if curvature_r <= 0.0 {
        0.0
    } else {
        (curvature_r / (curvature_r + MORPH_BETA)).clamp(0.0, 1.0)
    }
}

fn classify_morphology(mu: f64) -> MorphologyClass {
    if mu < 0.25 {
        MorphologyClass::Elastic
    } else if mu < 0.5 {
        MorphologyClass::Plastic
    } else if mu < 0.75 {
        MorphologyClass::Degenerate
    } else {
        MorphologyClass::NearCollapse
    }
}

/// Regime candidate given the post-step kappa and a morphology
/// classification, folded against `prev` for intra-step chaining only:
/// `prev` is the seed regime from the first pass (computed from the
/// intermediate morphology), never `state.regime_prev`. Irreversibility
/// against the state's incoming regime is enforced externally by
/// `invariants::check_regime`, which compares the regime returned here
/// against `state.regime_prev` and rejects the step if it would regress.
fn compute_regime(prev: Regime, mc: MorphologyClass, kappa_prime: f64) -> Regime {
    let candidate = if kappa_prime <= EPS_KAPPA {
        Regime::Col
    } else {
        match mc {
            MorphologyClass::Elastic => Regime::Acc,
            MorphologyClass::Plastic => Regime::Dev,
            MorphologyClass::Degenerate | MorphologyClass::NearCollapse => Regime::Rel,
        }
    };
    candidate.max(prev)
}

/// Pins state and metrics to their collapse-consistent values. `delta`,
/// `phi`, `m` are passed through unchanged (the caller decides whether
/// that means the pre-step values, for an already-collapsed entry, or the
/// freshly computed ones, for a step that collapses this tick).
fn process_collapse(delta: [f64; 4], phi: f64, m: f64) -> (StructuralState, DerivedMetrics) {
    let regime = Regime::Col;
    let state = StructuralState { delta, phi, m, kappa: 0.0, regime_prev: regime };
    let metrics = DerivedMetrics {
        curvature_r: 0.0,
        det_g: 0.0,
        tau: 0.0,
        mu: 1.0,
        morphology: Some(MorphologyClass::NearCollapse),
        regime: Some(regime),
        is_collapse: true,
        collapse_distance: 0.0,
        collapse_speed: 0.0,
        collapse_intensity: 0.0,
    };
    (state, metrics)
}

/// Runs the evolution engine on a canonicalized event. Returns the next
/// state and the metrics derived from this transition. `Reset` and an
/// already-collapsed entry both bypass the (a)-(f) update rules.
pub fn evolve(state: StructuralState, event: StructEvent) -> (StructuralState, DerivedMetrics) {
    if let StructEvent::Reset { .. } = event {
        let next = StructuralState::reset();
        let metrics = DerivedMetrics {
            curvature_r: 0.0,
            det_g: METRIC_C1,
            tau: TAU_MIN,
            mu: 0.0,
            morphology: Some(MorphologyClass::Elastic),
            regime: Some(Regime::Acc),
            is_collapse: false,
            collapse_distance: RESET_KAPPA,
            collapse_speed: 0.0,
            collapse_intensity: 0.0,
        };
        return (next, metrics);
    }

    if state.kappa <= EPS_KAPPA {
        return process_collapse(state.delta, state.phi, state.m);
    }

    let dt = event.dt();
    let (stimulus, is_update) = match event {
        StructEvent::Update { stimulus, .. } => (stimulus, true),
        _ => ([0.0; 4], false),
    };

    // (a) delta update.
    let mut delta_prime = [0.0; 4];
    for i in 0..4 {
        let v = state.delta[i] + stimulus[i] * dt - LAMBDA_RELAX * state.delta[i] * dt;
        delta_prime[i] = v.clamp(-MAX_DELTA, MAX_DELTA);
    }

    // (b) phi update.
    let deformation = if is_update { norm2(sub(delta_prime, state.delta)) } else { 0.0 };
    let phi_prime = (state.phi + TENSION_A * deformation - TENSION_B * dt).max(0.0);

    // (c) memory update, using tau at the pre-step kappa.
    let tau_current = compute_tau(state.kappa);
    let m_prime = (state.m + (tau_current.max(0.0)) * dt).max(state.m);

    // (d) kappa update, using the intermediate curvature/mu computed with
    // the already-updated delta/phi but the *pre-step* memory/kappa.
    let delta_sq = squared_norm(delta_prime);
    let r_new = compute_curvature(delta_sq, phi_prime, state.m, state.kappa);
    let mu_new = compute_mu(r_new);
    let decay = if is_update {
        DECAY_A1 * r_new + DECAY_A2 * state.phi + DECAY_A3 * mu_new + DECAY_A4
    } else {
        DECAY_A4
    };
    let kappa_prime = (state.kappa - dt * decay).max(0.0);

    // (e) final metrics, using the post-step memory/kappa.
    let curvature_r = compute_curvature(delta_sq, phi_prime, m_prime, kappa_prime);
    let det_g = compute_det_g(curvature_r, kappa_prime);
    let tau = compute_tau(kappa_prime);
    let mu = compute_mu(curvature_r);

    // (f) regime, computed twice to chain irreversibility *within this
    // step* across the intermediate and final morphology classifications.
    // The seed pass is folded against `Regime::Acc` (a no-op floor), never
    // against `state.regime_prev` — whether this candidate regresses the
    // state's incoming regime is for `invariants::check_regime` to decide,
    // not this function.
    let mc_seed = classify_morphology(mu_new);
    let seed_regime = compute_regime(Regime::Acc, mc_seed, kappa_prime);
    let mc_final = classify_morphology(mu);
    let regime = compute_regime(seed_regime, mc_final, kappa_prime);

    if kappa_prime <= EPS_KAPPA {
        return process_collapse(delta_prime, phi_prime, m_prime);
    }

    let state_next = StructuralState { delta: delta_prime, phi: phi_prime, m: m_prime, kappa: kappa_prime, regime_prev: regime };
    let metrics = DerivedMetrics {
        curvature_r,
        det_g,
        tau,
        mu,
        morphology: Some(mc_final),
        regime: Some(regime),
        is_collapse: false,
        collapse_distance: kappa_prime,
        collapse_speed: if is_update { deformation / dt } else { 0.0 },
        collapse_intensity: curvature_r,
    };
    (state_next, metrics)
}

fn sub(a: [f64; 4], b: [f64; 4]) -> [f64; 4] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]]
}
