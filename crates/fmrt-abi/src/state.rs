//! The bridge's single persistent state cell.
//!
//! One global instance, guarded by a `parking_lot::Mutex`, mirroring the
//! teacher's thread-local/global-cell convention at the ABI boundary
//! (`errno_abi::__errno_location`) rather than threading state through
//! every call. Updated only when a step does not return a fatal status.

use parking_lot::Mutex;

use fmrt_core::{Envelope, StructuralState};

struct BridgeState {
    current: StructuralState,
    last_envelope: Option<Envelope>,
}

impl BridgeState {
    const fn new() -> Self {
        BridgeState { current: StructuralState::reset(), last_envelope: None }
    }
}

static STATE: Mutex<BridgeState> = Mutex::new(BridgeState::new());

/// Runs `event` through `fmrt_core::step` against the persistent state,
/// storing the result as the new current state (unless the status is
/// fatal) and as the last-seen envelope. Returns the envelope.
pub fn step_persistent(event: fmrt_core::StructEvent) -> Envelope {
    let mut guard = STATE.lock();
    let env = fmrt_core::step(guard.current, event);
    if matches!(env.status, fmrt_core::StepStatus::Ok | fmrt_core::StepStatus::Error | fmrt_core::StepStatus::Dead) {
        guard.current = env.state;
    }
    guard.last_envelope = Some(env);
    env
}

/// Resets the persistent state to canonical defaults and clears the last
/// envelope, mirroring `fmrt_core::reset_state` through an explicit `Reset`
/// event so the recorded envelope stays consistent with a real step.
pub fn reset_persistent() -> Envelope {
    step_persistent(fmrt_core::StructEvent::Reset { dt: 0.0 })
}

/// Returns the most recently computed envelope, if any step has run yet.
pub fn last_envelope() -> Option<Envelope> {
    STATE.lock().last_envelope
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_persistent_updates_current_state() {
        reset_persistent();
        let env = step_persistent(fmrt_core::StructEvent::Update { stimulus: [1.0, 0.0, 0.0, 0.0], dt: 1.0 });
        assert_eq!(env.state.delta[0], 1.0);
        let again = last_envelope().unwrap();
        assert_eq!(again.state.delta[0], 1.0);
    }

    #[test]
    fn reset_persistent_restores_canonical_state() {
        step_persistent(fmrt_core::StructEvent::Update { stimulus: [5.0, 5.0, 5.0, 5.0], dt: 1.0 });
        let env = reset_persistent();
        assert_eq!(env.state, StructuralState::reset());
    }
}
