//! Stage 1 of the pipeline: event validation and canonicalization.

use crate::constants::{DT_MAX, DT_MIN};
use crate::types::{ErrorCategory, StructEvent};

/// Validates event shape. `Reset` only requires `dt` to be finite; every
/// other kind additionally requires `dt > 0` (numeric finiteness of the
/// stimulus/dt fields was already established by the FP guard, but is
/// re-asserted here for locality since this function may be called on its
/// own in tests).
pub fn validate(event: &StructEvent) -> Result<(), ErrorCategory> {
    match *event {
        StructEvent::Reset { dt } => {
            if dt.is_finite() {
                Ok(())
            } else {
                Err(ErrorCategory::InvalidEvent)
            }
        }
        StructEvent::Update { stimulus, dt } => {
            if stimulus.iter().all(|s| s.is_finite()) && dt.is_finite() && dt > 0.0 {
                Ok(())
            } else {
                Err(ErrorCategory::InvalidEvent)
            }
        }
        StructEvent::Gap { dt } | StructEvent::Heartbeat { dt } => {
            if dt.is_finite() && dt > 0.0 {
                Ok(())
            } else {
                Err(ErrorCategory::InvalidEvent)
            }
        }
    }
}

/// Canonicalizes a validated event: zeroes inapplicable fields (already
/// structurally zero on this tagged-sum representation) and clamps `dt`
/// into `[0, 1e6]`. The clamp runs unconditionally, including for `Update`
/// where validation already rejected `dt <= 0` — kept because `Reset`
/// canonicalization forces `dt` to `0` first and then relies on this same
/// clamp to land it in range.
pub fn canonicalize(event: StructEvent) -> StructEvent {
    let clamp_dt = |dt: f64| dt.clamp(DT_MIN, DT_MAX);
    match event {
        StructEvent::Update { stimulus, dt } => StructEvent::Update { stimulus, dt: clamp_dt(dt) },
        StructEvent::Gap { dt } => StructEvent::Gap { dt: clamp_dt(dt) },
        StructEvent::Heartbeat { dt } => StructEvent::Heartbeat { dt: clamp_dt(dt) },
        StructEvent::Reset { .. } => StructEvent::Reset { dt: clamp_dt(0.0) },
    }
}
