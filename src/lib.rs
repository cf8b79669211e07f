//! # Cache-Probe
//!
//! Pointer-chasing latency sweep. Prints ticks per dependent load for buffer
//! sizes from 1 KiB to 256 MiB; the steps in that curve are the cache
//! boundaries of the machine.

pub mod config;
pub mod error;
pub mod probe;
pub mod utils;

pub use error::ProbeError;

/// Re-export tui from utils
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::Options;
    pub use crate::error::ProbeError;
    pub use crate::probe::{probe_size, run_sweep, IndexBuffer, SizeMeasurement, SWEEP_SIZES};
    pub use crate::utils::{Layout, TableWriter};
}
