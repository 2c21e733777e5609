//! This module contains a decoder for /proc/uptime

use chrono::{DateTime, Utc};
use crate::error::DecodeError;
use crate::parser::{PseudoFile, SystemFile};
use crate::splitter::{self, Fields};
use std::time::Duration;


/// Contents of /proc/uptime
///
/// The kernel guarantees that idle time does not exceed uptime times the
/// number of CPUs, but nothing is checked here.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uptime {
    /// Elapsed wall clock time since the system was started, in seconds
    pub uptime: f64,

    /// Cumulative amount of time spent by all CPUs in the idle state, in
    /// seconds
    pub idle: f64,
}
//
impl Uptime {
    /// Elapsed wall clock time since the system was started
    pub fn uptime_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.uptime).unwrap_or(Duration::MAX)
    }

    /// Cumulative amount of time spent by all CPUs in the idle state
    pub fn idle_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.idle).unwrap_or(Duration::MAX)
    }

    /// Estimate when the system was booted, given the time of the reading
    ///
    /// Returns None if the uptime is too large to be subtracted from "now".
    ///
    pub fn boot_time(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let uptime = chrono::Duration::from_std(self.uptime_duration()).ok()?;
        now.checked_sub_signed(uptime)
    }
}
//
impl PseudoFile for Uptime {
    const ARITY: usize = 2;

    fn decode(contents: &[u8]) -> Result<Self, DecodeError> {
        decode_uptime(contents)
    }
}
//
impl SystemFile for Uptime {
    const FILE_NAME: &'static str = "uptime";
}


/// Decode the contents of /proc/uptime ("%lu.%02lu %lu.%02lu")
pub fn decode_uptime(contents: &[u8]) -> Result<Uptime, DecodeError> {
    let text = splitter::as_text(contents);
    let mut fields = Fields::new(text.split_whitespace(), Uptime::ARITY)?;
    Ok(
        Uptime {
            uptime: fields.next_decimal("uptime")?,
            idle: fields.next_decimal("idle")?,
        }
    )
}
