//! Measurement plumbing shared by the sweep.
//!
//! By default (`cpu_cycles` feature), measurements are raw tick counter
//! readings. Build with `--features use_time` or `--no-default-features` to
//! measure with a monotonic wall clock instead.

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
use std::time::Duration;

// ============================================================================
// Measurement abstraction: ticks or time depending on feature flags
// ============================================================================
//
// Use ticks if: cpu_cycles is enabled AND use_time is NOT enabled
// Use wall-clock time if: use_time is enabled OR cpu_cycles is disabled

/// Measurement value type - ticks (u64) or Duration depending on feature
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub type Measurement = u64;

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub type Measurement = Duration;

/// Read the starting point of a measurement
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
#[inline(always)]
pub fn now() -> u64 {
    crate::utils::cycles::read_cycles()
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
#[inline(always)]
pub fn now() -> std::time::Instant {
    std::time::Instant::now()
}

/// Measurement elapsed since `start`
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
#[inline(always)]
pub fn elapsed(start: u64) -> Measurement {
    crate::utils::cycles::read_cycles().saturating_sub(start)
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
#[inline(always)]
pub fn elapsed(start: std::time::Instant) -> Measurement {
    start.elapsed()
}

/// Flatten a measurement to the integer unit reported in the table
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub fn to_ticks(m: Measurement) -> u64 {
    m
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub fn to_ticks(m: Measurement) -> u64 {
    m.as_nanos() as u64
}

/// Unit of one tick in the current build
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub const fn unit_name() -> &'static str {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        "cycles"
    }
    #[cfg(target_arch = "aarch64")]
    {
        "ticks"
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
        "ns"
    }
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub const fn unit_name() -> &'static str {
    "ns"
}

/// Timer backend in the current build
#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub const fn timer_name() -> &'static str {
    crate::utils::cycles::backend_name()
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
pub const fn timer_name() -> &'static str {
    "monotonic clock"
}

/// Time an expression, returning `(Measurement, value)`.
///
/// The counter is read immediately before and after `$e` with nothing else
/// in between.
#[macro_export]
macro_rules! measure {
    ($e:expr) => {{
        let start = $crate::utils::bench::now();
        let value = $e;
        let elapsed = $crate::utils::bench::elapsed(start);
        (elapsed, value)
    }};
}

/// Seed derived from the wall clock, nanosecond resolution
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

/// Average ticks per operation; zero operations average to zero
pub fn per_op(total: Measurement, ops: usize) -> f64 {
    if ops == 0 {
        return 0.0;
    }
    to_ticks(total) as f64 / ops as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[test]
    fn test_measure_returns_value() {
        let (elapsed, value) = crate::measure!({
            let mut sum = 0u64;
            for i in 0..1000u64 {
                sum = black_box(sum + i);
            }
            sum
        });
        assert_eq!(value, 499_500);
        let _ = to_ticks(elapsed);
    }

    #[test]
    fn test_per_op_zero_ops() {
        let (elapsed, _) = crate::measure!(1);
        assert_eq!(per_op(elapsed, 0), 0.0);
    }

    #[test]
    fn test_time_seed_changes() {
        let a = time_seed();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let b = time_seed();
        assert_ne!(a, b);
    }
}
