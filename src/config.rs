//! Location of the procfs mount point
//!
//! Procfs is almost always mounted at /proc, but containers, chroots and test
//! suites may want to look elsewhere. This is the only configurable aspect of
//! this crate, so it does not warrant more than a small struct.

use crate::parser::{ProcessFile, SystemFile};
use std::path::{Path, PathBuf};


/// Root directory of a procfs mount
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProcfsRoot {
    /// Path to the mount point
    path: PathBuf,
}
//
impl ProcfsRoot {
    /// Where procfs is normally mounted
    pub const DEFAULT_PATH: &'static str = "/proc";

    /// Look for procfs at a custom location
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path to the procfs mount point
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to a system-wide pseudo-file
    pub fn system_path<F: SystemFile>(&self) -> PathBuf {
        self.path.join(F::FILE_NAME)
    }

    /// Path to a pseudo-file of a certain process
    pub fn process_path<F: ProcessFile>(&self, pid: i32) -> PathBuf {
        self.path.join(pid.to_string()).join(F::FILE_NAME)
    }
}
//
impl Default for ProcfsRoot {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}
