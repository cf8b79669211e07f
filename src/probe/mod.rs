//! # Cache Probe
//!
//! Measures the latency of dependent loads as a function of working-set size.
//! Each buffer holds a random single-cycle permutation, so every load depends
//! on the previous one and the hardware prefetcher has nothing to learn.
//!
//! For each size in [`SWEEP_SIZES`]:
//!
//! 1. `n = size / size_of::<usize>()` cells
//! 2. build the identity and shuffle it into one cycle
//! 3. hop `max(100_000_000, n)` times from cell 0
//! 4. read the tick counter right before and after the traversal
//! 5. report `ticks / hops`
//!
//! Ticks per hop stays flat while the buffer fits a cache level and steps up
//! once it spills into the next one. Frequency scaling and turbo affect the
//! numbers; they are not comparable across tick backends.

pub mod buffer;
pub mod code;
#[cfg(test)]
mod test;

pub use buffer::IndexBuffer;

use std::hint::black_box;
use std::io::Write;
use std::sync::Once;

use crate::error::ProbeError;
use crate::utils::bench::{per_op, time_seed, to_ticks, Measurement};
use crate::utils::{CpuPinGuard, TableWriter};

/// Buffer sizes in bytes, 1 KiB to 256 MiB.
pub const SWEEP_SIZES: [usize; 19] = [
    // KBs
    1 << 10,
    1 << 11,
    1 << 12,
    1 << 13,
    1 << 14,
    1 << 15,
    1 << 16,
    1 << 17,
    1 << 18,
    1 << 19,
    // MBs
    1 << 20,
    1 << 21,
    1 << 22,
    1 << 23,
    1 << 24,
    1 << 25,
    1 << 26,
    1 << 27,
    1 << 28,
];

/// Storage width of one cell
pub const ELEMENT_WIDTH: usize = std::mem::size_of::<usize>();

/// Lower bound on hops per size, large enough to bury the counter overhead
pub const MIN_HOPS: usize = 100_000_000;

/// Guards the "could not pin" warning so a sweep logs it at most once
static UNPINNED_WARNING: Once = Once::new();

/// One row of the sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeMeasurement {
    pub size_bytes: usize,
    pub elements: usize,
    pub hops: usize,
    /// Ticks spent on all hops
    pub ticks: u64,
    pub ticks_per_hop: f64,
    /// Cell reached after the last hop; printed so the loop stays alive
    pub result: usize,
}

/// Cells that fit in `size_bytes`
pub const fn element_count(size_bytes: usize) -> usize {
    size_bytes / ELEMENT_WIDTH
}

/// Hops for a buffer of `elements` cells: at least [`MIN_HOPS`], and never
/// fewer than the buffer length.
pub const fn hop_count(elements: usize) -> usize {
    if elements > MIN_HOPS {
        elements
    } else {
        MIN_HOPS
    }
}

/// Time `hops` hops over `buffer`, pinned to the current core.
///
/// Returns the elapsed measurement and the cell the walk ended on.
pub fn measure_buffer(
    buffer: &IndexBuffer,
    hops: usize,
) -> Result<(Measurement, usize), ProbeError> {
    if hops < buffer.len() {
        return Err(ProbeError::TooFewHops {
            hops,
            len: buffer.len(),
        });
    }

    let pin = CpuPinGuard::new();
    if !pin.is_pinned() {
        UNPINNED_WARNING.call_once(|| {
            log::warn!("could not pin to a CPU core; ticks may drift between cores");
        });
    }
    let (elapsed, result) = crate::measure!(buffer.hop(hops));
    log::debug!("measured {} hops on core {:?}", hops, pin.core_id());
    drop(pin);

    Ok((elapsed, black_box(result)))
}

/// Measure one sweep size with the standard hop count and a fresh time seed.
pub fn probe_size(size_bytes: usize) -> Result<SizeMeasurement, ProbeError> {
    let elements = element_count(size_bytes);
    probe_size_with(size_bytes, hop_count(elements), time_seed())
}

/// Measure one size with an explicit hop count and seed.
pub fn probe_size_with(
    size_bytes: usize,
    hops: usize,
    seed: u64,
) -> Result<SizeMeasurement, ProbeError> {
    let elements = element_count(size_bytes);
    log::debug!(
        "size {} bytes: {} elements, {} hops, seed {:#x}",
        size_bytes,
        elements,
        hops,
        seed
    );

    let buffer = IndexBuffer::shuffled(elements, seed)?;
    let (elapsed, result) = measure_buffer(&buffer, hops)?;

    Ok(SizeMeasurement {
        size_bytes,
        elements,
        hops,
        ticks: to_ticks(elapsed),
        ticks_per_hop: per_op(elapsed, hops),
        result,
    })
}

/// Run the sweep over `sizes`, streaming each row into `table` as soon as it
/// is measured. Every buffer is dropped before the next one is built.
pub fn run_sweep<W: Write>(sizes: &[usize], table: &mut TableWriter<W>) -> Result<(), ProbeError> {
    table.header()?;
    for &size in sizes {
        let row = probe_size(size)?;
        table.row(&row)?;
    }
    table.finish()?;

    Ok(())
}
