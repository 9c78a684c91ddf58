//! # Clocking Protocol Tests
//!
//! This module groups the tests that pin down the bench's drive pattern:
//! the reset cadence, program injection, completion detection, and the
//! order pins are touched in.




/// Reset-sequence tests.
///
/// This module verifies the fixed reset cadence signal for signal,
/// including its length in simulated time and its final pin levels.
pub mod reset;
