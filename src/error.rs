//! Error variants for SSZ encode/decode/Merkleization.

use thiserror::Error;

/// The seven independently-distinguishable failure kinds produced by this crate.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SszError {
    #[error("out of scope: requested {requested} bytes, {available} available")]
    OutOfScope { requested: usize, available: usize },

    #[error("limit exceeded: count {count} exceeds limit {limit}")]
    LimitExceeded { count: usize, limit: usize },

    #[error("invalid offset ({reason}): {offset}")]
    InvalidOffset { reason: &'static str, offset: u64 },

    #[error("invalid value: {reason}")]
    InvalidValue { reason: &'static str },

    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("fuzz-mode length accounting underflowed")]
    UnderflowFuzz,

    #[error("offset overflow: encoded offset would exceed 2^32")]
    OffsetOverflow,
}

pub type Result<T> = core::result::Result<T, SszError>;
