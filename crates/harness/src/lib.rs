//! Cycle-accurate conformance harness for simulated RISC-V datapaths.
//!
//! This crate drives a hardware simulation model through a deterministic
//! verification flow:
//! 1. **Datapath Seam:** A six-operation capability trait, a built-in
//!    self-check model, and an optional Verilator FFI binding.
//! 2. **Vectors:** `.mem` program images (hex text) and `.res` golden
//!    register snapshots (raw little-endian words), plus `.bin` conversion
//!    and base-address patching.
//! 3. **Protocol:** The fixed reset cadence, half-cycle time stepping, and
//!    the ECALL completion detector.
//! 4. **Orchestration:** Single-test runs with the reference `[TB]` console
//!    contract, suite discovery, and aggregated summaries.

/// Common types (errors, register snapshots, comparison).
pub mod common;
/// Run configuration (defaults, JSON deserialization, plusargs).
pub mod config;
/// The datapath capability trait and its bindings.
pub mod dut;
/// Program images and the `.mem`/`.bin` formats.
pub mod image;
/// Bench control, vector loading, and test orchestration.
pub mod sim;

/// Run configuration; build with `Config::default()`, JSON, or plusargs.
pub use crate::config::Config;
/// Typed failure and result alias used across the harness.
pub use crate::common::error::{HarnessError, Result};
/// The capability seam a model implements.
pub use crate::dut::Datapath;
/// The bench that drives a model through the protocol.
pub use crate::sim::TestBench;
