//! This module contains a decoder for /proc/loadavg

use crate::error::DecodeError;
use crate::parser::{PseudoFile, SystemFile};
use crate::splitter::{self, Fields};


/// Load average figures from /proc/loadavg
///
/// The first three fields are the number of jobs in the run queue (state R)
/// or waiting for disk I/O (state D), averaged over 1, 5 and 15 minutes.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadAverage {
    /// Average over 1 minute
    pub avg_1min: f32,

    /// Average over 5 minutes
    pub avg_5min: f32,

    /// Average over 15 minutes
    pub avg_15min: f32,

    /// Number of currently runnable kernel scheduling entities (processes,
    /// threads)
    pub runnable_entities: u32,

    /// Number of kernel scheduling entities that currently exist
    pub total_entities: u32,

    /// PID of the process that was most recently created on the system
    pub last_pid: u32,
}
//
impl PseudoFile for LoadAverage {
    const ARITY: usize = 6;

    fn decode(contents: &[u8]) -> Result<Self, DecodeError> {
        decode_load_average(contents)
    }
}
//
impl SystemFile for LoadAverage {
    const FILE_NAME: &'static str = "loadavg";
}


/// Decode the contents of /proc/loadavg ("%f %f %f %u/%u %u")
pub fn decode_load_average(contents: &[u8]) -> Result<LoadAverage, DecodeError> {
    let text = splitter::as_text(contents);

    // The entity counters share a column, as "runnable/total". If that column
    // has no slash but is followed by more data, the format is not ours.
    let mut columns = text.split_whitespace().skip(3);
    if let (Some(entities), Some(_)) = (columns.next(), columns.next()) {
        if !entities.contains('/') {
            return Err(DecodeError::UnexpectedFormat {
                expected: "runnable/total",
                found: entities.to_owned(),
            });
        }
    }

    // Split that column on its first slash, leaving the others alone
    let fields = text.split_whitespace()
                     .enumerate()
                     .flat_map(|(idx, column)| {
                         column.splitn(if idx == 3 { 2 } else { 1 }, '/')
                     });
    let mut fields = Fields::new(fields, LoadAverage::ARITY)?;

    Ok(
        LoadAverage {
            avg_1min: fields.next_decimal("avg_1min")?,
            avg_5min: fields.next_decimal("avg_5min")?,
            avg_15min: fields.next_decimal("avg_15min")?,
            runnable_entities: fields.next("runnable_entities")?,
            total_entities: fields.next("total_entities")?,
            last_pid: fields.next("last_pid")?,
        }
    )
}




/// Performance benchmarks
///
/// Run them with "cargo test -- --ignored --nocapture".
///
#[cfg(test)]
mod benchmarks {
    use super::decode_load_average;

    /// Benchmark for the /proc/loadavg decoding overhead
    #[test]
    #[ignore]
    fn decoding_overhead() {
        testbench::benchmark(3_000_000, || {
            decode_load_average(b"0.50 0.25 0.10 3/128 4821\n")
                .expect("Failed to decode load average");
        });
    }
}
