//! This module contains decoders for the per-process files of /proc/[pid]

pub mod stat;
pub mod statm;
