//! Pin the measuring thread to a single core.
//!
//! The tick counter is per-core on some parts, so a migration in the middle
//! of a traversal can skew the reading. Linux uses `sched_setaffinity` and
//! restores the saved mask on drop; other platforms leave the thread unpinned.

#[cfg(target_os = "linux")]
mod platform {
    /// Current affinity mask of the calling thread
    pub fn current_mask() -> Option<libc::cpu_set_t> {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0 {
                Some(set)
            } else {
                None
            }
        }
    }

    /// Core the calling thread is running on right now
    pub fn current_cpu() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn pin(core_id: usize) -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore(mask: &libc::cpu_set_t) -> bool {
        unsafe { libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), mask) == 0 }
    }

    pub type Mask = libc::cpu_set_t;
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub type Mask = ();

    pub fn current_mask() -> Option<Mask> {
        None
    }

    pub fn current_cpu() -> Option<usize> {
        None
    }

    pub fn pin(_core_id: usize) -> bool {
        false
    }

    pub fn restore(_mask: &Mask) -> bool {
        true
    }
}

/// RAII guard: pins to the current core on creation, restores the previous
/// affinity on drop.
///
/// # Example
/// ```ignore
/// {
///     let _pin = CpuPinGuard::new();
///     // ... read the counter, traverse, read again ...
/// }
/// ```
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    saved: Option<platform::Mask>,
}

impl CpuPinGuard {
    /// Pin to whichever core the thread is on now.
    pub fn new() -> Self {
        let saved = platform::current_mask();
        let pinned_core = match (saved.as_ref(), platform::current_cpu()) {
            (Some(_), Some(core)) if platform::pin(core) => Some(core),
            _ => None,
        };
        Self { pinned_core, saved }
    }

    /// The core this thread is pinned to, if any.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.pinned_core.is_none() {
            return;
        }
        if let Some(mask) = self.saved.take() {
            if !platform::restore(&mask) {
                log::warn!("could not restore CPU affinity after measurement");
            }
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}
