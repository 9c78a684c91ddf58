//! Common types shared across the testbench.
//!
//! This module provides the building blocks the rest of the harness is made
//! of. It includes:
//! 1. **Error Handling:** The typed failures a test run can report.
//! 2. **Register Snapshots:** Fixed 32-entry register images, their `.res`
//!    binary layout, and snapshot comparison.

/// Error types for test-run failures.
pub mod error;

/// Register snapshot storage and comparison.
pub mod snapshot;

pub use error::{HarnessError, Result};
pub use snapshot::{Mismatch, REG_COUNT, RES_BYTES, RegSnapshot, diff};
