//! Harness error definitions.
//!
//! This module defines the error handling for the testbench. It provides:
//! 1. **Typed Failures:** One variant per way a test run can fail to even start.
//! 2. **Upward Propagation:** Loaders and parsers report errors to the caller;
//!    only the command-line entry point decides process exit status.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results produced by the harness.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Failures that prevent a test case from being driven to a verdict.
///
/// A register mismatch is *not* an error: it is a FAIL verdict. These variants
/// cover the cases where no verdict can be produced at all, and their
/// `Display` text is what the operator sees after an `[TB] ERROR:` prefix.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A required test vector file does not exist.
    ///
    /// Raised before any loading starts so the operator learns which of the
    /// two vector files (`.mem` or `.res`) is absent.
    #[error("{} not found", .0.display())]
    MissingFile(PathBuf),

    /// A file exists but could not be opened.
    ///
    /// The `Display` text is exactly `Cannot open <path>`; the OS-level cause
    /// stays reachable through the error chain.
    #[error("Cannot open {}", .path.display())]
    Open {
        /// File the open was attempted on.
        path: PathBuf,
        /// Underlying error reported by the operating system.
        source: io::Error,
    },

    /// An I/O operation on an open file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File the operation was performed on.
        path: PathBuf,
        /// Underlying error reported by the operating system.
        source: io::Error,
    },

    /// A program-image line did not parse as a 32-bit hexadecimal word.
    ///
    /// Raised for non-hex text and for values wider than 32 bits. The line
    /// number is 1-based and counts every line of the file, including the
    /// blank lines the parser skips.
    #[error("{}:{line}: malformed hex word `{text}`", .path.display())]
    MalformedWord {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number of the offending line.
        line: usize,
        /// The text that failed to parse.
        text: String,
    },

    /// A base-address patch was requested on an image with no words.
    #[error("memory image is empty")]
    EmptyImage,

    /// A base-address patch target is not 4 KiB aligned.
    ///
    /// The patch re-encodes word 0 as `LUI`, which can only materialize
    /// addresses whose low 12 bits are zero.
    #[error("base address {0:#010x} is not 4 KiB aligned")]
    MisalignedBase(u32),

    /// A base address argument was not valid hexadecimal.
    #[error("invalid base address `{0}` (expected hex, e.g. 0x00010000)")]
    BadBase(String),

    /// A plusarg carried a value the harness cannot use.
    ///
    /// Raised for non-numeric `+CYCLES=` values.
    #[error("invalid {flag} value `{value}`")]
    Plusarg {
        /// The plusarg prefix, e.g. `+CYCLES=`.
        flag: &'static str,
        /// The rejected value text.
        value: String,
    },

    /// The resolved test name is empty.
    ///
    /// Happens when the operator passes `+TEST=` with no value, which would
    /// otherwise derive vector paths like `tests/.mem`.
    #[error("No test specified (use +TEST=name)")]
    NoTestName,
}

impl HarnessError {
    /// Wraps a failed open with the path that refused to open.
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Wraps an [`io::Error`] with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
