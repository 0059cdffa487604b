//! Error types for gramdist.

use thiserror::Error;

/// Errors that can occur while adopting engine buffers or registering
/// functions.
///
/// The scoring core itself has no recoverable errors: oversize haystacks,
/// sub-N strings and malformed UTF-8 all produce a defined result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GramError {
    /// A function name was registered twice.
    #[error("function {name:?} is already registered")]
    DuplicateFunction { name: &'static str },

    /// Lookup of a function name that was never registered.
    #[error("unknown function {name:?}")]
    UnknownFunction { name: String },

    /// Offsets must advance by at least one byte per row (the terminator).
    #[error("offset {offset} of row {index} does not advance past previous offset {prev}")]
    InvalidOffsets {
        index: usize,
        offset: u64,
        prev: u64,
    },

    /// The last offset points past the character buffer.
    #[error("last offset {last} exceeds character buffer length {len}")]
    OffsetsPastBuffer { last: u64, len: usize },
}

/// Result type alias for gramdist operations.
pub type Result<T> = std::result::Result<T, GramError>;
