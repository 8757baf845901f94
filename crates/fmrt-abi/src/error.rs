//! Bridge-local error type. Never crosses the `extern "C"` boundary itself —
//! only its mapped integer return code does (see [`crate::status_code`]).

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    #[error("null pointer passed across the ABI boundary")]
    NullPointer,
    #[error("invalid event type byte: {0}")]
    InvalidEventByte(u8),
    #[error("non-finite input value")]
    NonFiniteInput,
    #[error("engine state is fatally collapsed and cannot be stepped")]
    FatalStatus,
}

/// Maps a [`BridgeError`] onto the flat integer return codes documented for
/// `fmrt_step`/`fmrt_reset`. `0` is reserved for success and is never
/// returned by this function.
pub const fn status_code(err: BridgeError) -> i32 {
    match err {
        BridgeError::NullPointer => -1,
        BridgeError::InvalidEventByte(_) => -2,
        BridgeError::NonFiniteInput => -2,
        BridgeError::FatalStatus => -3,
    }
}
