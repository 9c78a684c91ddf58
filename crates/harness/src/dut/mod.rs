//! The seam between the harness and a simulated datapath.
//!
//! This module defines the narrow capability contract the testbench drives a
//! model through. It provides:
//! 1. **Contract:** The [`Datapath`] trait: pin pokes, evaluation, and the
//!    two probe reads the harness needs, nothing more.
//! 2. **Bindings:** A built-in fetch-only stub for checking the harness
//!    itself, and an optional FFI wrapper over a Verilator-built model.
//!
//! The harness is strictly single-threaded; a model is owned by one bench and
//! accessed sequentially, so the trait asks for no `Send`/`Sync`.

/// Fetch-only stand-in model.
pub mod selfcheck;

/// FFI binding to a Verilator-built datapath shim.
#[cfg(feature = "verilated")]
pub mod verilated;

pub use selfcheck::SelfCheckDatapath;
#[cfg(feature = "verilated")]
pub use verilated::VerilatedDatapath;

/// Capability interface to a simulated datapath.
///
/// Implementations expose raw pins and probes; all sequencing (reset cadence,
/// clock discipline, completion detection) lives in the bench. Combinational
/// settling happens only inside [`eval`](Datapath::eval): pin setters store
/// the level and nothing else.
pub trait Datapath {
    /// Drives the clock input pin to `level`.
    fn set_clock(&mut self, level: bool);
    /// Drives the reset input pin to `level` (active high).
    fn set_reset(&mut self, level: bool);
    /// Re-evaluates the model with the current pin levels.
    fn eval(&mut self);
    /// Reads the instruction-register probe (the word most recently latched).
    fn instruction_probe(&self) -> u32;
    /// Reads architectural register `index` (0-31).
    fn read_register(&self, index: usize) -> u32;
    /// Stores `word` at word address `addr` in instruction memory.
    fn write_imem(&mut self, addr: usize, word: u32);
}
