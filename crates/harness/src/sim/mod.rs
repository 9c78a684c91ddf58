//! Bench control, vector loading, and test orchestration.
//!
//! The conformance flow lives here: [`bench`] drives a model through the
//! clocking protocol, [`loader`] reads the on-disk vectors, and [`runner`]
//! strings both into verdicts.

/// The testbench core: clocking, reset, completion detection.
pub mod bench;

/// Test-vector loaders.
pub mod loader;

/// Test-case orchestration and suites.
pub mod runner;

pub use bench::{Completion, TestBench};
pub use runner::{RunSummary, TestCase, discover_tests, run_case, run_suite};
