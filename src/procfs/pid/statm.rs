//! This module contains a decoder for /proc/[pid]/statm

use bytesize::ByteSize;
use crate::error::DecodeError;
use crate::parser::{ProcessFile, PseudoFile};
use crate::splitter::{self, Fields};
use crate::units;


/// Memory usage of a process, measured in pages, from /proc/[pid]/statm
///
/// Some of these values are inaccurate because of a kernel-internal
/// scalability optimization. If accurate values are required, use
/// /proc/[pid]/smaps instead.
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProcessMemorySummary {
    /// Total program size (same as VmSize in /proc/[pid]/status)
    pub size: u64,

    /// Resident set size (same as VmRSS in /proc/[pid]/status)
    pub resident: u64,

    /// Number of resident shared pages (i.e., backed by a file)
    pub shared: u64,

    /// Text (code)
    pub text: u64,

    /// Library (unused since Linux 2.6, always 0)
    pub lib: u64,

    /// Data + stack
    pub data: u64,

    /// Dirty pages (unused since Linux 2.6, always 0)
    pub dirty: u64,
}
//
impl ProcessMemorySummary {
    /// Total program size, in bytes
    pub fn virtual_size(&self) -> ByteSize {
        units::pages_to_size(self.size)
    }

    /// Resident set size, in bytes
    pub fn resident_size(&self) -> ByteSize {
        units::pages_to_size(self.resident)
    }

    /// Resident shared memory, in bytes
    pub fn shared_size(&self) -> ByteSize {
        units::pages_to_size(self.shared)
    }
}
//
impl PseudoFile for ProcessMemorySummary {
    const ARITY: usize = 7;

    fn decode(contents: &[u8]) -> Result<Self, DecodeError> {
        decode_process_memory_summary(contents)
    }
}
//
impl ProcessFile for ProcessMemorySummary {
    const FILE_NAME: &'static str = "statm";
}


/// Decode the contents of /proc/[pid]/statm ("%lu %lu %lu %lu %lu %lu %lu")
pub fn decode_process_memory_summary(
    contents: &[u8]
) -> Result<ProcessMemorySummary, DecodeError> {
    let text = splitter::as_text(contents);
    let mut fields = Fields::new(text.split_whitespace(),
                                 ProcessMemorySummary::ARITY)?;
    Ok(
        ProcessMemorySummary {
            size: fields.next("size")?,
            resident: fields.next("resident")?,
            shared: fields.next("shared")?,
            text: fields.next("text")?,
            lib: fields.next("lib")?,
            data: fields.next("data")?,
            dirty: fields.next("dirty")?,
        }
    )
}




/// Performance benchmarks
///
/// Run them with "cargo test -- --ignored --nocapture".
///
#[cfg(test)]
mod benchmarks {
    use super::decode_process_memory_summary;

    /// Benchmark for the /proc/[pid]/statm decoding overhead
    #[test]
    #[ignore]
    fn decoding_overhead() {
        testbench::benchmark(3_000_000, || {
            decode_process_memory_summary(b"5961 1472 1208 233 0 353 0\n")
                .expect("Failed to decode process memory summary");
        });
    }
}
