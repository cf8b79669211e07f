//! Error type shared by the library and the binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Index buffer must hold at least one element.")]
    EmptyBuffer,

    /// A cell points outside the buffer.
    #[error("Cell {index} holds {value}, which is out of range for {len} elements.")]
    IndexOutOfRange { index: usize, value: usize, len: usize },

    /// Two cells point at the same successor.
    #[error("Value {value} appears more than once (again at cell {index}).")]
    DuplicateIndex { index: usize, value: usize },

    /// The permutation splits into several cycles, so a walk from 0 never sees every cell.
    #[error("Walk from cell 0 returns after {cycle_len} of {len} cells.")]
    NotSingleCycle { cycle_len: usize, len: usize },

    #[error("Hop count {hops} is smaller than the buffer length {len}.")]
    TooFewHops { hops: usize, len: usize },

    #[error("Variant '{variant}' returned {got}, reference returned {expected}.")]
    VariantMismatch {
        variant: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
