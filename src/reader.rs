//! A sampling-oriented reader for Linux pseudo-files
//!
//! Linux pseudo-files, such as those from /proc, have a number of special
//! characteristics that are best accounted for through a special abstraction
//! when performing sampling measurements:
//!
//! - They are small (a few kB at most), so it is best to read them in one go.
//! - They do not live on hardware devices, but are generated on the host CPU.
//!   So there is no performance benefit in reading them asynchronously.
//! - Their size does not vary much. So a buffer which was large enough for one
//!   read is likely to be suitable for the next read.
//! - One can update their "contents" just by seeking to the beginning.
//! - Per-process files become unreadable as soon as the process exits, even
//!   if they are still open.
//!
//! The ProcFileReader that is provided in this module is designed to properly
//! account for these characteristics while reading these pseudo-files. It
//! knows nothing about their format, which is the job of the decoders.

use log::{debug, trace};
use std::fs::File;
use std::io::{Read, Result, Seek, SeekFrom};
use std::path::{Path, PathBuf};


/// Sampling-oriented reader for procfs pseudo-files
pub struct ProcFileReader {
    /// Location of the file being sampled, for diagnostics
    path: PathBuf,

    /// Persistent handle to the file being sampled
    file_handle: File,

    /// Buffer in which the bytes that are read out will be stored
    readout_buffer: Vec<u8>,
}
//
impl ProcFileReader {
    /// Attempt to open a proc pseudo-file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let file_handle = File::open(&path)?;
        debug!("Opened pseudo-file {}", path.display());
        Ok(
            Self {
                path,
                file_handle,
                readout_buffer: Vec::new(),
            }
        )
    }

    /// Location of the pseudo-file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a new sample of data from the file
    ///
    /// This method takes care of loading the bytes from the file, and then
    /// hands them to a user-provided parser, whose result is returned. The
    /// parser is not called if the file could not be read.
    ///
    pub fn sample<F, R>(&mut self, parser: F) -> Result<R>
        where F: FnOnce(&[u8]) -> R
    {
        // Start from the beginning of the file, with an empty buffer, even if
        // a previous readout failed halfway through
        self.readout_buffer.clear();
        self.file_handle.seek(SeekFrom::Start(0u64))?;

        // Read the current contents of the file
        let length = self.file_handle.read_to_end(&mut self.readout_buffer)?;
        trace!("Read {} bytes from {}", length, self.path.display());

        // Run the user-provided parser on the file contents
        Ok(parser(&self.readout_buffer))
    }
}




/// Performance benchmarks
///
/// Run them with "cargo test -- --ignored --nocapture".
///
#[cfg(test)]
mod benchmarks {
    use super::ProcFileReader;

    /// Benchmark for the raw uptime readout overhead
    #[test]
    #[ignore]
    fn readout_overhead() {
        let mut reader =
            ProcFileReader::open("/proc/uptime")
                           .expect("Failed to access uptime");
        testbench::benchmark(3_000_000, || {
            reader.sample(|_| {}).expect("Failed to sample uptime");
        });
    }
}
