//! This module contains a decoder for the global "cpu" line of /proc/stat
//!
//! /proc/stat holds many records, but this crate only cares about the first
//! one, which accounts for the time spent by all CPUs in various states.

use crate::error::DecodeError;
use crate::parser::{PseudoFile, SystemFile};
use crate::splitter::{self, Fields};


/// The amount of CPU time that the system spent in various states
///
/// All counters are in clock ticks (see units::ticks_to_duration), aggregated
/// over all CPUs and cumulative since boot. They never decrease from one read
/// to the next, so callers can safely compute deltas between two samples.
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CpuStat {
    /// Time spent in user mode
    pub user: u64,

    /// Time spent in user mode with low priority (nice)
    pub nice: u64,

    /// Time spent in system (aka kernel) mode
    pub system: u64,

    /// Time spent in the idle task
    pub idle: u64,

    /// Time spent waiting for I/O to complete
    pub iowait: u64,

    /// Time spent servicing hardware interrupts
    pub irq: u64,

    /// Time spent servicing softirqs
    pub softirq: u64,

    /// "Stolen" time spent in other operating systems when running in a
    /// virtualized environment
    pub steal: u64,

    /// Time spent running a virtual CPU for guest OSs
    pub guest: u64,

    /// Time spent running a niced guest (see above)
    pub guest_nice: u64,
}
//
impl CpuStat {
    /// Total amount of CPU time accounted for, in clock ticks
    ///
    /// Guest time is already included in user and nice time by the kernel, so
    /// it is not counted a second time.
    ///
    pub fn total_ticks(&self) -> u64 {
        let counters = [self.user, self.nice, self.system, self.idle,
                        self.iowait, self.irq, self.softirq, self.steal];
        counters.iter().fold(0u64, |acc, &ticks| acc.saturating_add(ticks))
    }
}
//
impl PseudoFile for CpuStat {
    const ARITY: usize = 10;

    fn decode(contents: &[u8]) -> Result<Self, DecodeError> {
        decode_cpu_stat(contents)
    }
}
//
impl SystemFile for CpuStat {
    const FILE_NAME: &'static str = "stat";
}


/// Header of the aggregated CPU record, including its padding
const CPU_HEADER: &str = "cpu  ";


/// Decode the first line of /proc/stat ("cpu  %lu %lu ... %lu")
pub fn decode_cpu_stat(contents: &[u8]) -> Result<CpuStat, DecodeError> {
    let text = splitter::as_text(contents);
    let line = text.lines().next().unwrap_or("");

    // The global CPU record is tagged "cpu" and padded with two spaces, which
    // is what sets it apart from the per-CPU "cpuN" records
    let counters = line.strip_prefix(CPU_HEADER).ok_or_else(|| {
        DecodeError::UnexpectedFormat {
            expected: CPU_HEADER,
            found: line.chars().take(CPU_HEADER.len()).collect(),
        }
    })?;

    let mut fields = Fields::new(counters.split_whitespace(), CpuStat::ARITY)?;
    Ok(
        CpuStat {
            user: fields.next("user")?,
            nice: fields.next("nice")?,
            system: fields.next("system")?,
            idle: fields.next("idle")?,
            iowait: fields.next("iowait")?,
            irq: fields.next("irq")?,
            softirq: fields.next("softirq")?,
            steal: fields.next("steal")?,
            guest: fields.next("guest")?,
            guest_nice: fields.next("guest_nice")?,
        }
    )
}




/// Performance benchmarks
///
/// Run them with "cargo test -- --ignored --nocapture".
///
#[cfg(test)]
mod benchmarks {
    use super::decode_cpu_stat;

    /// Benchmark for the /proc/stat CPU record decoding overhead
    #[test]
    #[ignore]
    fn decoding_overhead() {
        testbench::benchmark(1_000_000, || {
            decode_cpu_stat(b"cpu  18 9616 11 941 5 51 9 615 62 14\n")
                .expect("Failed to decode CPU statistics");
        });
    }
}
