//! Flat, `#[repr(C)]` wire types for the ABI boundary. Layout is stable
//! across versions; see the bridge spec for the exact byte shape.

/// Raw event payload as handed in by a C caller.
///
/// `type` selects the variant (`0 = Update, 1 = Gap, 2 = Heartbeat,
/// 3 = Reset`); `stimulus` is only read for `Update`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BridgeEvent {
    pub event_type: u8,
    pub dt: f64,
    pub stimulus: [f64; 4],
}

/// Raw output payload handed back to a C caller.
///
/// `derived[0..=2]` are `curvature_R`, `det_g`, `tau`; `derived[3]` is
/// reserved padding and always `0.0`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BridgeOutput {
    pub status: u8,
    pub invariants_ok: u8,
    pub derived: [f64; 4],
}

impl BridgeOutput {
    pub const fn zeroed() -> Self {
        BridgeOutput { status: 0, invariants_ok: 0, derived: [0.0; 4] }
    }
}

/// Maps `fmrt_core::StepStatus` onto the ABI's `status` byte. Matches the
/// status enum's own discriminants, but kept as an explicit function so the
/// two representations can diverge without breaking the ABI silently.
pub const fn status_byte(status: fmrt_core::StepStatus) -> u8 {
    match status {
        fmrt_core::StepStatus::Ok => 0,
        fmrt_core::StepStatus::Error => 1,
        fmrt_core::StepStatus::Dead => 2,
    }
}

/// Converts a raw event byte plus payload into a [`fmrt_core::StructEvent`].
/// Returns `None` for a byte outside the fixed `0..=3` mapping.
pub fn decode_event(raw: &BridgeEvent) -> Option<fmrt_core::StructEvent> {
    match raw.event_type {
        0 => Some(fmrt_core::StructEvent::Update { stimulus: raw.stimulus, dt: raw.dt }),
        1 => Some(fmrt_core::StructEvent::Gap { dt: raw.dt }),
        2 => Some(fmrt_core::StructEvent::Heartbeat { dt: raw.dt }),
        3 => Some(fmrt_core::StructEvent::Reset { dt: raw.dt }),
        _ => None,
    }
}

/// Fills a [`BridgeOutput`] from a computed envelope.
pub fn encode_envelope(env: &fmrt_core::Envelope, out: &mut BridgeOutput) {
    out.status = status_byte(env.status);
    out.invariants_ok = u8::from(env.all_ok);
    out.derived = [env.metrics.curvature_r, env.metrics.det_g, env.metrics.tau, 0.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_out_of_range_byte() {
        let raw = BridgeEvent { event_type: 7, dt: 1.0, stimulus: [0.0; 4] };
        assert!(decode_event(&raw).is_none());
    }

    #[test]
    fn decode_maps_update_with_stimulus() {
        let raw = BridgeEvent { event_type: 0, dt: 1.0, stimulus: [1.0, 2.0, 3.0, 4.0] };
        let event = decode_event(&raw).unwrap();
        assert_eq!(event, fmrt_core::StructEvent::Update { stimulus: [1.0, 2.0, 3.0, 4.0], dt: 1.0 });
    }

    #[test]
    fn encode_writes_reserved_padding_zero() {
        let env = fmrt_core::step(fmrt_core::reset_state(), fmrt_core::StructEvent::Heartbeat { dt: 1.0 });
        let mut out = BridgeOutput::zeroed();
        encode_envelope(&env, &mut out);
        assert_eq!(out.derived[3], 0.0);
    }
}
