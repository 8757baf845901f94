//! # FMRT Core
//!
//! A pure, deterministic, side-effect-free single-step transition function
//! for a structural organism: a state vector with decaying viability, an
//! irreversible regime state machine, and an absorbing collapse state.
//!
//! The only entry points that matter are [`step`] and [`reset_state`]; every
//! other module is a component of the five-stage pipeline `step` runs.
//! Nothing in this crate allocates, blocks, spawns a thread, or performs
//! I/O — it is safe to call from any number of threads on independent
//! inputs with no coordination.

#![deny(unsafe_code)]

pub mod constants;
pub mod diagnostics;
pub mod event;
pub mod evolution;
pub mod fp_guard;
pub mod invariants;
pub mod types;

pub use types::{
    DerivedMetrics, Envelope, ErrorCategory, MorphologyClass, Regime, StepStatus, StructEvent, StructuralState,
};

/// Returns the canonical initial state: `delta=0, phi=0, m=0, kappa=1, regime=Acc`.
#[must_use]
pub fn reset_state() -> StructuralState {
    StructuralState::reset()
}

/// Advances `state` by one `event`, producing a fully-formed envelope.
///
/// Runs the five-stage pipeline documented in the crate root: the FP guard
/// (stage 0), event validation and canonicalization (stage 1), the
/// evolution engine (stage 2), the invariant validator (stage 3, bypassed
/// for `Reset`), and envelope assembly (stage 4). Always returns — there is
/// no failure mode that isn't represented as an `Envelope` with
/// `status != Ok`.
#[must_use]
pub fn step(state: StructuralState, event: StructEvent) -> Envelope {
    let event_type = event.type_byte();

    // Stage 0: FP guard. A numeric violation resets the whole envelope to
    // defaults rather than preserving the caller's (numerically tainted)
    // state.
    if !fp_guard::state_is_safe(&state.delta, state.phi, state.m, state.kappa) || !fp_guard::event_is_safe(&event) {
        return diagnostics::build_error(
            StructuralState::reset(),
            DerivedMetrics::default(),
            0,
            ErrorCategory::NumericError,
            None,
            event_type,
        );
    }

    // Stage 1: event validation + canonicalization.
    if let Err(category) = event::validate(&event) {
        return diagnostics::build_error(state, DerivedMetrics::default(), 0, category, None, event_type);
    }
    let event = event::canonicalize(event);

    // Stage 2: evolution.
    let (next_state, metrics) = evolution::evolve(state, event);

    // Reset bypasses the invariant validator entirely.
    if matches!(event, StructEvent::Reset { .. }) {
        return diagnostics::build_ok(next_state, metrics, types::invariant_bits::ALL, event_type);
    }

    // Stage 3: invariant validation.
    let (mask, all_ok) = invariants::validate(&state, &next_state, &metrics);
    if !all_ok {
        return diagnostics::build_error(
            state,
            DerivedMetrics::default(),
            mask,
            ErrorCategory::InvariantViolation,
            None,
            event_type,
        );
    }

    // Stage 4: assemble the accepted envelope.
    diagnostics::build_ok(next_state, metrics, mask, event_type)
}
