//! Core data model: structural state, events, derived metrics, and the
//! output envelope.
//!
//! Every type here is plain data (`Copy` where the size allows it) with no
//! interior mutability — the engine owns nothing, it only transforms values.

use std::fmt;

/// Regime state machine. Ordering is load-bearing: `Acc < Dev < Rel < Col`
/// and a step may never move a regime backwards (see
/// [`crate::invariants::check_regime`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Regime {
    Acc = 0,
    Dev = 1,
    Rel = 2,
    Col = 3,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Regime::Acc => "ACC",
            Regime::Dev => "DEV",
            Regime::Rel => "REL",
            Regime::Col => "COL",
        };
        f.write_str(s)
    }
}

/// Morphology classification derived from the morphology index `mu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MorphologyClass {
    Elastic = 0,
    Plastic = 1,
    Degenerate = 2,
    NearCollapse = 3,
}

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StepStatus {
    Ok = 0,
    Error = 1,
    Dead = 2,
}

/// Closed set of error categories. `None` means "no error" and is the
/// category attached to an `Ok` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ErrorCategory {
    #[default]
    None = 0,
    InvalidEvent = 1,
    InvalidState = 2,
    InvariantViolation = 3,
    ForbiddenDomain = 4,
    NumericError = 5,
    PostCollapse = 6,
    UnsupportedOperation = 7,
}

impl ErrorCategory {
    /// Canonical diagnostic string for this category, used when the caller
    /// doesn't supply a more specific reason. Never allocates.
    pub const fn canonical_reason(self) -> &'static str {
        match self {
            ErrorCategory::None => "no_error",
            ErrorCategory::InvalidEvent => "invalid_event",
            ErrorCategory::InvalidState => "invalid_state",
            ErrorCategory::InvariantViolation => "invariant_violation",
            ErrorCategory::ForbiddenDomain => "forbidden_domain",
            ErrorCategory::NumericError => "numeric_error",
            ErrorCategory::PostCollapse => "post_collapse_event_rejected",
            ErrorCategory::UnsupportedOperation => "unsupported_operation",
        }
    }
}

/// The durable structural state of the organism. The only fields that
/// persist across steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralState {
    /// Deformation vector.
    pub delta: [f64; 4],
    /// Structural tension, non-negative.
    pub phi: f64,
    /// Accumulated memory, monotonically non-decreasing.
    pub m: f64,
    /// Viability; absorbing zero.
    pub kappa: f64,
    /// Regime produced by the previous accepted step.
    pub regime_prev: Regime,
}

impl StructuralState {
    /// Canonical initial state: `delta=0, phi=0, m=0, kappa=1, regime=Acc`.
    pub const fn reset() -> Self {
        StructuralState {
            delta: [0.0; 4],
            phi: crate::constants::RESET_PHI,
            m: 0.0,
            kappa: crate::constants::RESET_KAPPA,
            regime_prev: Regime::Acc,
        }
    }
}

impl Default for StructuralState {
    fn default() -> Self {
        Self::reset()
    }
}

/// An event arriving at the engine, already shaped as a tagged sum so that
/// canonicalization's field-zeroing is structurally guaranteed rather than
/// an assertion over a flat struct. The flat-ABI boundary (`fmrt-abi`) maps
/// its raw `(type, dt, stimulus)` payload into this enum before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StructEvent {
    Update { stimulus: [f64; 4], dt: f64 },
    Gap { dt: f64 },
    Heartbeat { dt: f64 },
    Reset { dt: f64 },
}

impl StructEvent {
    /// The discriminant byte used on the flat ABI boundary.
    pub const fn type_byte(self) -> u8 {
        match self {
            StructEvent::Update { .. } => 0,
            StructEvent::Gap { .. } => 1,
            StructEvent::Heartbeat { .. } => 2,
            StructEvent::Reset { .. } => 3,
        }
    }

    /// `dt` regardless of variant.
    pub const fn dt(self) -> f64 {
        match self {
            StructEvent::Update { dt, .. }
            | StructEvent::Gap { dt }
            | StructEvent::Heartbeat { dt }
            | StructEvent::Reset { dt } => dt,
        }
    }
}

/// Derived metrics, recomputed every step. Never part of `StructuralState`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedMetrics {
    pub curvature_r: f64,
    pub det_g: f64,
    pub tau: f64,
    pub mu: f64,
    pub morphology: Option<MorphologyClass>,
    pub regime: Option<Regime>,
    pub is_collapse: bool,
    /// Equal to the post-step `kappa`; `0` once collapsed.
    pub collapse_distance: f64,
    /// `||delta' - delta|| / dt` for an `Update` event; `0` otherwise or at collapse.
    pub collapse_speed: f64,
    /// Symbolic collapse-pressure reading, taken from `curvature_r`; `0` at collapse.
    pub collapse_intensity: f64,
}

/// Closed set of invariant-check bit positions. Bit values follow the fixed
/// check order (see `crate::invariants`) so the mask is a direct readout of
/// which checks passed.
pub mod invariant_bits {
    pub const MEMORY: u8 = 1 << 0;
    pub const KAPPA: u8 = 1 << 1;
    pub const METRIC: u8 = 1 << 2;
    pub const TAU: u8 = 1 << 3;
    pub const MORPHOLOGY: u8 = 1 << 4;
    pub const REGIME: u8 = 1 << 5;
    pub const COLLAPSE: u8 = 1 << 6;
    pub const FORBIDDEN: u8 = 1 << 7;
    pub const ALL: u8 = MEMORY | KAPPA | METRIC | TAU | MORPHOLOGY | REGIME | COLLAPSE | FORBIDDEN;
}

/// The output of a single step. Always finite, always fully initialized,
/// even on error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub state: StructuralState,
    pub metrics: DerivedMetrics,
    pub invariants_mask: u8,
    pub all_ok: bool,
    pub status: StepStatus,
    pub error_category: ErrorCategory,
    pub error_reason: &'static str,
    pub event_type: u8,
}
