//! Error types of the pseudo-file decoders and of the sampling layer
//!
//! Decoding errors are kept separate from I/O errors: a decoder only ever sees
//! bytes which were already read successfully, so it can only complain about
//! their contents. The sampling layer, which does perform I/O, wraps both.

use std::io;
use std::path::PathBuf;
use thiserror::Error;


/// Reasons why the contents of a pseudo-file could not be decoded
///
/// All of these most often indicate a transient race (e.g. with process exit)
/// or a kernel whose format differs from what we expect, so callers will
/// usually want to re-read the file and try again rather than give up.
///
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    /// A literal part of the grammar (tag, separator...) did not match
    #[error("expected {expected:?}, found {found:?}")]
    UnexpectedFormat {
        /// What the grammar calls for at this point
        expected: &'static str,

        /// What was found instead
        found: String,
    },

    /// The record has fewer fields than the format's fixed arity
    #[error("managed to parse only {parsed} fields out of {expected}")]
    ShortRead {
        /// Number of fields that were present
        parsed: usize,

        /// Number of fields that the format calls for
        expected: usize,
    },

    /// A field could not be converted to its declared type
    #[error("failed to parse field #{index} ({field}) from {token:?}")]
    FieldConversion {
        /// 1-based position of the field within the record
        index: usize,

        /// Name of the field
        field: &'static str,

        /// Raw text of the offending token
        token: String,
    },
}


/// Reasons why a pseudo-file could not be sampled
#[derive(Debug, Error)]
pub enum SampleError {
    /// The pseudo-file could not be opened or read
    #[error("failed to read {}", path.display())]
    Read {
        /// Location of the pseudo-file
        path: PathBuf,

        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The pseudo-file was read, but its contents could not be decoded
    #[error("failed to decode {}", path.display())]
    Decode {
        /// Location of the pseudo-file
        path: PathBuf,

        /// What was wrong with its contents
        #[source]
        source: DecodeError,
    },
}
//
impl SampleError {
    /// Tell which pseudo-file this error is about
    pub fn path(&self) -> &PathBuf {
        match self {
            SampleError::Read { path, .. } => path,
            SampleError::Decode { path, .. } => path,
        }
    }

    /// Access the decoding error, if that is what happened
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            SampleError::Read { .. } => None,
            SampleError::Decode { source, .. } => Some(source),
        }
    }
}


/// Unit tests
#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;
    use super::{DecodeError, SampleError};

    /// Check that decoding errors print something helpful
    #[test]
    fn decode_error_display() {
        let short = DecodeError::ShortRead { parsed: 7, expected: 10 };
        assert_eq!(short.to_string(),
                   "managed to parse only 7 fields out of 10");

        let conversion = DecodeError::FieldConversion {
            index: 2,
            field: "idle",
            token: "abc".to_owned(),
        };
        assert_eq!(conversion.to_string(),
                   "failed to parse field #2 (idle) from \"abc\"");

        let format = DecodeError::UnexpectedFormat {
            expected: "cpu  ",
            found: "cpu0 ".to_owned(),
        };
        assert_eq!(format.to_string(), "expected \"cpu  \", found \"cpu0 \"");
    }

    /// Check that sampling errors keep track of their cause
    #[test]
    fn sample_error_source() {
        let read = SampleError::Read {
            path: PathBuf::from("/proc/42/stat"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(read.path(), &PathBuf::from("/proc/42/stat"));
        assert!(read.decode_error().is_none());
        assert!(read.source().is_some());

        let short = DecodeError::ShortRead { parsed: 1, expected: 2 };
        let decode = SampleError::Decode {
            path: PathBuf::from("/proc/uptime"),
            source: short.clone(),
        };
        assert_eq!(decode.decode_error(), Some(&short));
        assert_eq!(decode.to_string(), "failed to decode /proc/uptime");
    }
}
