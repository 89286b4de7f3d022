//! Run diagnostics: monotonic clock abstraction and best-effort peak memory.

use std::time::{Duration, Instant};

/// Monotonic time source so tests can inject deterministic readings.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall-clock implementation anchored at construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Peak resident set size of this process in bytes, if the platform exposes it.
#[cfg(unix)]
pub fn peak_memory_bytes() -> Option<u64> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    let r = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if r != 0 {
        return None;
    }
    let usage = unsafe { usage.assume_init() };
    // ru_maxrss is in KiB on Linux.
    Some((usage.ru_maxrss as u64).saturating_mul(1024))
}

#[cfg(not(unix))]
pub fn peak_memory_bytes() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[cfg(unix)]
    #[test]
    fn peak_memory_is_nonzero_on_unix() {
        let peak = peak_memory_bytes().expect("getrusage available");
        assert!(peak > 0);
    }
}
