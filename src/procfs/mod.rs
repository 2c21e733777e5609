//! This module contains decoders for the contents of procfs.
//!
//! Each submodule corresponds to one file in /proc, and is named as close to
//! that file as allowed by the Rust module system. Per-process files, which
//! live in /proc/[pid], are grouped in the "pid" submodule.
//!
//! All decoders work in the same way: they take the raw contents of one
//! pseudo-file, as a byte slice, and either return a typed record holding
//! every field of that file, or a DecodeError explaining why they could not.

pub mod loadavg;
pub mod pid;
pub mod stat;
pub mod uptime;
