//! This module defines what a pseudo-file decoder is and where its input lives
//!
//! The textual data from a pseudo-file is not exploitable right after it has
//! been fetched from the kernel. It must be decoded back into usable numbers
//! first. And this is what a decoder does: it takes the raw contents of a
//! pseudo-file as input, and provides a typed record (or a typed error) as
//! output. By nature, this operation is very specific to a given pseudo-file
//! format, so each file gets its own record type and decoder.
//!
//! Decoders are pure functions of their input. They do not perform I/O, keep
//! no state from one call to the next, and never log anything. Reading the
//! files is the job of the reader and sampler modules, which use the location
//! traits below to find out which file goes with which record type.


use crate::error::DecodeError;


/// All pseudo-file records are expected to implement the following trait
pub trait PseudoFile: Sized {
    /// Fixed number of positional fields in the record
    const ARITY: usize;

    /// Decode the full contents of the pseudo-file into a record
    fn decode(contents: &[u8]) -> Result<Self, DecodeError>;
}


/// System-wide pseudo-files, located directly at the root of procfs
pub trait SystemFile: PseudoFile {
    /// Name of the file, relative to the procfs root (e.g. "uptime")
    const FILE_NAME: &'static str;
}


/// Per-process pseudo-files, located in the /proc/[pid] directories
pub trait ProcessFile: PseudoFile {
    /// Name of the file, relative to the process directory (e.g. "statm")
    const FILE_NAME: &'static str;
}
