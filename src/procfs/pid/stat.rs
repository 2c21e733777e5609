//! This module contains a decoder for /proc/[pid]/stat
//!
//! This is the most irregular of the pseudo-files that we decode. Its 44
//! leading fields (newer kernels append more, which we ignore) have various
//! widths and signedness, which we preserve as documented in proc(5), and
//! one of them is the command name of the process, which is wrapped in
//! parentheses and may contain anything, including spaces and parentheses.
//!
//! That field is extracted by a first scan which looks for the first opening
//! and the last closing parenthesis of the record. Everything else is then
//! split on whitespace, as usual.

use bytesize::ByteSize;
use crate::error::DecodeError;
use crate::parser::{ProcessFile, PseudoFile};
use crate::splitter::{self, Fields};
use crate::units;
use std::fmt;
use std::time::Duration;


/// Process information from /proc/[pid]/stat
///
/// Field descriptions are adapted from proc(5). Times are expressed in clock
/// ticks, see units::ticks_to_duration.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProcessStat {
    /// The process ID
    pub pid: i32,

    /// The filename of the executable, without the surrounding parentheses
    pub comm: String,

    /// Process state
    pub state: ProcessState,

    /// The PID of the parent
    pub ppid: i32,

    /// The process group ID of the process
    pub pgrp: i32,

    /// The session ID of the process
    pub session: i32,

    /// The controlling terminal of the process. The minor device number is
    /// contained in bits 31 to 20 and 7 to 0, the major one in bits 15 to 8.
    pub tty_nr: i32,

    /// The ID of the foreground process group of the controlling terminal
    pub tpgid: i32,

    /// The kernel flags word of the process (PF_* in linux/sched.h)
    pub flags: u32,

    /// Number of minor faults, which did not require loading a page from disk
    pub minflt: u64,

    /// Number of minor faults of the process' waited-for children
    pub cminflt: u64,

    /// Number of major faults, which required loading a page from disk
    pub majflt: u64,

    /// Number of major faults of the process' waited-for children
    pub cmajflt: u64,

    /// Time spent in user mode, including guest time
    pub utime: u64,

    /// Time spent in kernel mode
    pub stime: u64,

    /// Time that waited-for children spent in user mode
    pub cutime: i64,

    /// Time that waited-for children spent in kernel mode
    pub cstime: i64,

    /// Negated real-time priority minus one (-2 to -100) for real-time
    /// processes, raw kernel nice value (0 to 39) for others
    pub priority: i64,

    /// The nice value, from 19 (low priority) to -20 (high priority)
    pub nice: i64,

    /// Number of threads in this process
    pub num_threads: i64,

    /// Jiffies before the next SIGALRM (always 0 since Linux 2.6.17)
    pub itrealvalue: i64,

    /// Time at which the process started, after system boot
    pub starttime: u64,

    /// Virtual memory size in bytes
    pub vsize: u64,

    /// Resident set size, in pages
    pub rss: i64,

    /// Current soft limit on the resident set size, in bytes
    pub rsslim: u64,

    /// The address above which program text can run
    pub startcode: u64,

    /// The address below which program text can run
    pub endcode: u64,

    /// The address of the start (i.e. bottom) of the stack
    pub startstack: u64,

    /// The current value of the stack pointer
    pub kstkesp: u64,

    /// The current instruction pointer
    pub kstkeip: u64,

    /// The bitmap of pending signals (obsolete, see /proc/[pid]/status)
    pub signal: u64,

    /// The bitmap of blocked signals (obsolete, see /proc/[pid]/status)
    pub blocked: u64,

    /// The bitmap of ignored signals (obsolete, see /proc/[pid]/status)
    pub sigignore: u64,

    /// The bitmap of caught signals (obsolete, see /proc/[pid]/status)
    pub sigcatch: u64,

    /// The "channel" in which the process is waiting
    pub wchan: u64,

    /// Number of pages swapped (not maintained)
    pub nswap: u64,

    /// Cumulative nswap for child processes (not maintained)
    pub cnswap: u64,

    /// Signal to be sent to the parent when we die
    pub exit_signal: i32,

    /// CPU number last executed on
    pub processor: i32,

    /// Real-time scheduling priority (1 to 99), or 0 for non-real-time
    /// processes
    pub rt_priority: u32,

    /// Scheduling policy (SCHED_* in linux/sched.h)
    pub policy: u32,

    /// Aggregated block I/O delays
    pub delayacct_blkio_ticks: u64,

    /// Time spent running a virtual CPU for a guest operating system
    pub guest_time: u64,

    /// Guest time of the process' children
    pub cguest_time: i64,
}
//
impl ProcessStat {
    /// CPU time spent by the process, in user and kernel mode
    pub fn cpu_time(&self) -> Duration {
        units::ticks_to_duration(self.utime.saturating_add(self.stime))
    }

    /// Time at which the process started, measured from system boot
    pub fn start_time(&self) -> Duration {
        units::ticks_to_duration(self.starttime)
    }

    /// Resident set size, in bytes
    pub fn resident_size(&self) -> ByteSize {
        units::pages_to_size(self.rss.max(0) as u64)
    }
}
//
impl PseudoFile for ProcessStat {
    const ARITY: usize = 44;

    fn decode(contents: &[u8]) -> Result<Self, DecodeError> {
        decode_process_stat(contents)
    }
}
//
impl ProcessFile for ProcessStat {
    const FILE_NAME: &'static str = "stat";
}


/// Scheduling state of a process
///
/// Kernels have used more codes than the historical "RSDZTW" set over time
/// (e.g. "t" for tracing stop, "X" for dead, "I" for idle kernel threads).
/// These are passed through as Other, rather than rejected.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProcessState {
    /// Running (R)
    Running,

    /// Sleeping in an interruptible wait (S)
    Sleeping,

    /// Waiting in uninterruptible disk sleep (D)
    DiskSleep,

    /// Zombie (Z)
    Zombie,

    /// Stopped on a signal, or traced (T)
    Stopped,

    /// Paging (W)
    Paging,

    /// Some other state code
    Other(char),
}
//
impl ProcessState {
    /// Interpret a state code
    pub fn from_char(code: char) -> Self {
        match code {
            'R' => ProcessState::Running,
            'S' => ProcessState::Sleeping,
            'D' => ProcessState::DiskSleep,
            'Z' => ProcessState::Zombie,
            'T' => ProcessState::Stopped,
            'W' => ProcessState::Paging,
            other => ProcessState::Other(other),
        }
    }

    /// Go back to the raw state code
    pub fn as_char(&self) -> char {
        match *self {
            ProcessState::Running => 'R',
            ProcessState::Sleeping => 'S',
            ProcessState::DiskSleep => 'D',
            ProcessState::Zombie => 'Z',
            ProcessState::Stopped => 'T',
            ProcessState::Paging => 'W',
            ProcessState::Other(code) => code,
        }
    }

    /// Interpret a state column, which must hold exactly one character
    fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Some(Self::from_char(code)),
            _ => None,
        }
    }
}
//
impl From<char> for ProcessState {
    fn from(code: char) -> Self {
        Self::from_char(code)
    }
}
//
impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}


/// Split a stat record around the parenthesized command name
///
/// Returns the text before the command name, the command name itself (if its
/// closing parenthesis is there), and the text after it.
///
fn split_command_name(record: &str) -> (&str, Option<&str>, &str) {
    let open = match record.find('(') {
        Some(open) => open,
        None => return (record, None, ""),
    };
    match record.rfind(')') {
        Some(close) if close > open => {
            (&record[..open], Some(&record[open+1..close]), &record[close+1..])
        },
        // The record was truncated in the middle of the command name
        _ => (&record[..open], None, ""),
    }
}


/// Decode the contents of /proc/[pid]/stat ("%d (%s) %c %d %d ...")
pub fn decode_process_stat(contents: &[u8]) -> Result<ProcessStat, DecodeError> {
    let text = splitter::as_text(contents);
    let (head, comm, tail) = split_command_name(&text);

    // Only the pid may come before the command name
    let mut head_columns = head.split_whitespace();
    match (head_columns.next(), head_columns.next()) {
        (_, Some(extra)) => {
            return Err(DecodeError::UnexpectedFormat {
                expected: "(",
                found: extra.to_owned(),
            });
        },
        (None, None) if comm.is_some() => {
            return Err(DecodeError::UnexpectedFormat {
                expected: "pid",
                found: "(".to_owned(),
            });
        },
        _ => {},
    }

    let fields = head.split_whitespace()
                     .chain(comm)
                     .chain(tail.split_whitespace());
    let mut fields = Fields::new(fields, ProcessStat::ARITY)?;

    Ok(
        ProcessStat {
            pid: fields.next("pid")?,
            comm: fields.next_raw().to_owned(),
            state: fields.next_with("state", ProcessState::from_token)?,
            ppid: fields.next("ppid")?,
            pgrp: fields.next("pgrp")?,
            session: fields.next("session")?,
            tty_nr: fields.next("tty_nr")?,
            tpgid: fields.next("tpgid")?,
            flags: fields.next("flags")?,
            minflt: fields.next("minflt")?,
            cminflt: fields.next("cminflt")?,
            majflt: fields.next("majflt")?,
            cmajflt: fields.next("cmajflt")?,
            utime: fields.next("utime")?,
            stime: fields.next("stime")?,
            cutime: fields.next("cutime")?,
            cstime: fields.next("cstime")?,
            priority: fields.next("priority")?,
            nice: fields.next("nice")?,
            num_threads: fields.next("num_threads")?,
            itrealvalue: fields.next("itrealvalue")?,
            starttime: fields.next("starttime")?,
            vsize: fields.next("vsize")?,
            rss: fields.next("rss")?,
            rsslim: fields.next("rsslim")?,
            startcode: fields.next("startcode")?,
            endcode: fields.next("endcode")?,
            startstack: fields.next("startstack")?,
            kstkesp: fields.next("kstkesp")?,
            kstkeip: fields.next("kstkeip")?,
            signal: fields.next("signal")?,
            blocked: fields.next("blocked")?,
            sigignore: fields.next("sigignore")?,
            sigcatch: fields.next("sigcatch")?,
            wchan: fields.next("wchan")?,
            nswap: fields.next("nswap")?,
            cnswap: fields.next("cnswap")?,
            exit_signal: fields.next("exit_signal")?,
            processor: fields.next("processor")?,
            rt_priority: fields.next("rt_priority")?,
            policy: fields.next("policy")?,
            delayacct_blkio_ticks: fields.next("delayacct_blkio_ticks")?,
            guest_time: fields.next("guest_time")?,
            cguest_time: fields.next("cguest_time")?,
        }
    )
}




/// Performance benchmarks
///
/// Run them with "cargo test -- --ignored --nocapture".
///
#[cfg(test)]
mod benchmarks {
    use super::decode_process_stat;

    /// Benchmark for the /proc/[pid]/stat decoding overhead
    #[test]
    #[ignore]
    fn decoding_overhead() {
        let line = b"3571 (kworker/u16:2-events_unbound) I 2 0 0 0 -1 \
                     69238880 0 0 0 0 11 252 0 0 20 0 1 0 2839461 0 0 \
                     18446744073709551615 0 0 0 0 0 0 0 2147483647 0 0 0 0 \
                     17 3 0 0 0 0 0 0 0 0 0 0 0 0 0\n";
        testbench::benchmark(1_000_000, || {
            decode_process_stat(line).expect("Failed to decode process stat");
        });
    }
}
