//! Typed snapshots of Linux procfs pseudo-files
//!
//! The kernel exposes a lot of system and process state as small, fixed-layout
//! text files in /proc. This crate decodes a handful of them into typed
//! records:
//!
//! - /proc/loadavg into a LoadAverage
//! - the first line of /proc/stat into a CpuStat
//! - /proc/uptime into an Uptime
//! - /proc/[pid]/stat into a ProcessStat
//! - /proc/[pid]/statm into a ProcessMemorySummary
//!
//! The decoders are pure functions from the raw contents of a file to either a
//! record or a DecodeError. They do not perform any I/O, so they may be fed
//! with bytes from anywhere. For the common case where the bytes come from the
//! local procfs, a Sampler is provided, which keeps the pseudo-file open and
//! decodes a fresh record every time it is asked to.
//!
//! Deriving rates (e.g. CPU usage in percent) from successive records is left
//! to the caller.

#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod error;
pub mod parser;
pub mod procfs;
pub mod reader;
pub mod sampler;
mod splitter;
pub mod units;

pub use config::ProcfsRoot;
pub use error::{DecodeError, SampleError};
pub use parser::{ProcessFile, PseudoFile, SystemFile};
pub use procfs::loadavg::{decode_load_average, LoadAverage};
pub use procfs::pid::stat::{decode_process_stat, ProcessStat, ProcessState};
pub use procfs::pid::statm::{decode_process_memory_summary,
                             ProcessMemorySummary};
pub use procfs::stat::{decode_cpu_stat, CpuStat};
pub use procfs::uptime::{decode_uptime, Uptime};
pub use reader::ProcFileReader;
pub use sampler::{read_process, read_system, Sampler};
