//! Timing, pinning and output helpers used by the sweep.

pub mod bench;
pub mod cpu_affinity;
pub mod tui;

#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub mod cycles;

// Re-export commonly used items
pub use bench::{elapsed, now, per_op, time_seed, to_ticks, unit_name, Measurement};
pub use cpu_affinity::CpuPinGuard;
pub use tui::{Layout, TableWriter};

#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub use cycles::read_cycles;

/// Information about an implementation variant.
/// Generic over F which is the function signature.
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "original", "unchecked")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}
