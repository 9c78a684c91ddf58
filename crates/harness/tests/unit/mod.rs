//! # Harness Unit Tests
//!
//! This module organizes the unit tests for each component of the
//! conformance flow, from configuration and vector parsing through the
//! clocking protocol to suite orchestration.

/// Unit tests for the clocking protocol.
///
/// This module verifies the reset cadence, image injection, completion
/// detection, and probe ordering of the bench.
pub mod bench;




/// Unit tests for the vector loaders.
///
/// This module verifies `.mem` and `.res` loading against on-disk files,
/// including short reads and missing-file reporting.
pub mod loader;
