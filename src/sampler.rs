//! This module defines what a pseudo-file sampler is and how it's implemented
//!
//! Sampling a pseudo-file always works in the same way: read the contents of
//! the file and hand them to the decoder of the matching record type. So it is
//! possible to standardize the sampling abstraction, which is what this module
//! does, as a struct which is generic over the record type.
//!
//! A sampler does not keep past samples around, and does not try again when
//! reading or decoding fails: each call to sample() returns a fresh record or
//! an error, and what to do with it is up to the caller.

use crate::config::ProcfsRoot;
use crate::error::SampleError;
use crate::parser::{ProcessFile, PseudoFile, SystemFile};
use crate::reader::ProcFileReader;
use log::debug;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};


/// Mechanism for sampling records from a certain pseudo-file
pub struct Sampler<F: PseudoFile> {
    /// Reader object for the pseudo-file
    reader: ProcFileReader,

    /// Type of record that we are decoding
    record: PhantomData<fn() -> F>,
}
//
impl<F: SystemFile> Sampler<F> {
    /// Create a new sampler for a system-wide pseudo-file
    pub fn open_system(root: &ProcfsRoot) -> Result<Self, SampleError> {
        Self::open(root.system_path::<F>())
    }
}
//
impl<F: ProcessFile> Sampler<F> {
    /// Create a new sampler for a pseudo-file of a certain process
    pub fn open_process(root: &ProcfsRoot,
                        pid: i32) -> Result<Self, SampleError> {
        Self::open(root.process_path::<F>(pid))
    }
}
//
impl<F: PseudoFile> Sampler<F> {
    /// Location of the pseudo-file being sampled
    pub fn path(&self) -> &Path {
        self.reader.path()
    }

    /// Acquire and decode a new sample of data from the pseudo-file
    pub fn sample(&mut self) -> Result<F, SampleError> {
        let decoded = self.reader.sample(F::decode).map_err(|source| {
            SampleError::Read { path: self.reader.path().to_owned(), source }
        })?;
        decoded.map_err(|source| {
            debug!("Failed to decode {}: {}", self.reader.path().display(), source);
            SampleError::Decode { path: self.reader.path().to_owned(), source }
        })
    }

    /// Open the pseudo-file at a certain location
    fn open(path: PathBuf) -> Result<Self, SampleError> {
        match ProcFileReader::open(&path) {
            Ok(reader) => Ok(
                Self {
                    reader,
                    record: PhantomData,
                }
            ),
            Err(source) => Err(SampleError::Read { path, source }),
        }
    }
}


/// Read and decode a system-wide pseudo-file once
pub fn read_system<F: SystemFile>(root: &ProcfsRoot) -> Result<F, SampleError> {
    Sampler::<F>::open_system(root)?.sample()
}


/// Read and decode a pseudo-file of a certain process once
pub fn read_process<F: ProcessFile>(root: &ProcfsRoot,
                                    pid: i32) -> Result<F, SampleError> {
    Sampler::<F>::open_process(root, pid)?.sample()
}




/// Performance benchmarks
///
/// Run them with "cargo test -- --ignored --nocapture".
///
#[cfg(test)]
mod benchmarks {
    use crate::config::ProcfsRoot;
    use crate::procfs::pid::stat::ProcessStat;
    use crate::procfs::stat::CpuStat;
    use std::process;
    use super::Sampler;

    /// Benchmark for the full /proc/stat sampling overhead
    #[test]
    #[ignore]
    fn cpu_sampling_overhead() {
        let mut sampler = Sampler::<CpuStat>::open_system(&ProcfsRoot::default())
                                  .expect("Failed to create a sampler");
        testbench::benchmark(100_000, || {
            sampler.sample().expect("Failed to sample data");
        });
    }

    /// Benchmark for the full /proc/self/stat sampling overhead
    #[test]
    #[ignore]
    fn process_sampling_overhead() {
        let mut sampler =
            Sampler::<ProcessStat>::open_process(&ProcfsRoot::default(),
                                                 process::id() as i32)
                                   .expect("Failed to create a sampler");
        testbench::benchmark(300_000, || {
            sampler.sample().expect("Failed to sample data");
        });
    }
}
