//! Tick counter backends.
//!
//! x86 and x86_64 read the time-stamp counter, aarch64 reads the virtual
//! timer. Everything else falls back to a monotonic clock reported in
//! nanoseconds, so numbers from different backends are not comparable.

/// Read the current tick counter.
///
/// On x86_64: RDTSC fenced with LFENCE on both sides.
/// On aarch64: CNTVCT_EL0 (fixed frequency, readable from userspace).
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        read_cycles_x86_64()
    }

    #[cfg(target_arch = "x86")]
    {
        read_cycles_x86()
    }

    #[cfg(target_arch = "aarch64")]
    {
        read_cycles_aarch64()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
        read_cycles_fallback()
    }
}

/// Name of the backend compiled into this binary.
pub const fn backend_name() -> &'static str {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        "rdtsc"
    }
    #[cfg(target_arch = "aarch64")]
    {
        "cntvct_el0"
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
        "monotonic clock"
    }
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles_x86_64() -> u64 {
    use core::arch::x86_64::*;
    unsafe {
        // keep the traversal from drifting across the read
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(target_arch = "x86")]
#[inline(always)]
fn read_cycles_x86() -> u64 {
    use core::arch::x86::*;
    unsafe {
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles_aarch64() -> u64 {
    let val: u64;
    unsafe {
        core::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) val);
    }
    val
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
fn read_cycles_fallback() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_nanos() as u64
}
