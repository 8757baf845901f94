//! Stage 4 of the pipeline: envelope assembly.

use crate::types::{DerivedMetrics, Envelope, ErrorCategory, StepStatus, StructuralState};

/// Builds an accepted-step envelope.
pub fn build_ok(state: StructuralState, metrics: DerivedMetrics, invariants_mask: u8, event_type: u8) -> Envelope {
    Envelope {
        state,
        metrics,
        invariants_mask,
        all_ok: true,
        status: StepStatus::Ok,
        error_category: ErrorCategory::None,
        error_reason: ErrorCategory::None.canonical_reason(),
        event_type,
    }
}

/// Builds a rejected-step envelope. The caller-supplied `prior_state` and
/// `prior_metrics` are carried through unchanged, so a rejected step never
/// discards information the caller already had.
pub fn build_error(
    prior_state: StructuralState,
    prior_metrics: DerivedMetrics,
    invariants_mask: u8,
    category: ErrorCategory,
    reason: Option<&'static str>,
    event_type: u8,
) -> Envelope {
    Envelope {
        state: prior_state,
        metrics: prior_metrics,
        invariants_mask,
        all_ok: false,
        status: StepStatus::Error,
        error_category: category,
        error_reason: reason.unwrap_or_else(|| category.canonical_reason()),
        event_type,
    }
}

/// Builds a dead-state envelope: reserved for a caller that wants to
/// special-case "this input was already collapsed" before ever calling
/// `step`. `step` itself never produces this envelope — see the resolved
/// design note on post-collapse handling.
pub fn build_dead(prior_state: StructuralState, event_type: u8) -> Envelope {
    Envelope {
        state: prior_state,
        metrics: DerivedMetrics::default(),
        invariants_mask: 0,
        all_ok: false,
        status: StepStatus::Dead,
        error_category: ErrorCategory::PostCollapse,
        error_reason: ErrorCategory::PostCollapse.canonical_reason(),
        event_type,
    }
}
