//! Conversions from the kernel's units to more usable ones
//!
//! Procfs expresses CPU time in clock ticks and memory usage in pages, both of
//! which depend on host configuration. The decoders keep the raw values, and
//! the following helpers convert them on demand.

use bytesize::ByteSize;
use std::time::Duration;


lazy_static! {
    /// Number of clock ticks in one second
    static ref TICKS_PER_SEC: u64 = {
        let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
        // sysconf reports errors as -1. Linux has used USER_HZ = 100 forever.
        if ticks > 0 { ticks as u64 } else { 100 }
    };

    /// Number of nanoseconds in one clock tick
    static ref NANOSECS_PER_TICK: u64 = 1_000_000_000 / *TICKS_PER_SEC;

    /// Size of a memory page, in bytes
    static ref PAGE_SIZE: u64 = {
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if page_size > 0 { page_size as u64 } else { 4096 }
    };
}


/// Number of clock ticks per second on this host (sysconf(_SC_CLK_TCK))
pub fn ticks_per_second() -> u64 {
    *TICKS_PER_SEC
}

/// Size of a memory page on this host, in bytes (sysconf(_SC_PAGESIZE))
pub fn page_size() -> u64 {
    *PAGE_SIZE
}

/// Convert an amount of clock ticks into a Duration
pub fn ticks_to_duration(ticks: u64) -> Duration {
    let ticks_per_sec = *TICKS_PER_SEC;
    let secs = ticks / ticks_per_sec;
    let nanosecs = (ticks % ticks_per_sec) * *NANOSECS_PER_TICK;
    Duration::new(secs, nanosecs as u32)
}

/// Convert an amount of memory pages into a data volume
pub fn pages_to_size(pages: u64) -> ByteSize {
    ByteSize::b(pages.saturating_mul(*PAGE_SIZE))
}


/// Unit tests
#[cfg(test)]
mod tests {
    use bytesize::ByteSize;
    use std::time::Duration;
    use super::{page_size, pages_to_size, ticks_per_second, ticks_to_duration};

    /// Check that the host constants make sense
    #[test]
    fn host_constants() {
        assert!(ticks_per_second() > 0);
        assert!(ticks_per_second() <= 1_000_000_000);
        assert!(page_size().is_power_of_two());
    }

    /// Check that tick counts are converted properly
    #[test]
    fn tick_conversion() {
        let tick_duration = Duration::new(
            0,
            (1_000_000_000 / ticks_per_second()) as u32
        );
        assert_eq!(ticks_to_duration(0), Duration::new(0, 0));
        assert_eq!(ticks_to_duration(1), tick_duration);
        assert_eq!(ticks_to_duration(ticks_per_second()),
                   Duration::new(1, 0));
        assert_eq!(ticks_to_duration(3 * ticks_per_second() + 2),
                   Duration::new(3, 0) + tick_duration * 2);
    }

    /// Check that page counts are converted properly
    #[test]
    fn page_conversion() {
        assert_eq!(pages_to_size(0), ByteSize::b(0));
        assert_eq!(pages_to_size(3), ByteSize::b(3 * page_size()));
        assert_eq!(pages_to_size(u64::MAX), ByteSize::b(u64::MAX));
    }
}
