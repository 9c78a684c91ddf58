//! The testbench core: clocking, reset, and completion detection.
//!
//! Everything here is protocol. The cadence constants reproduce the reference
//! testbench signal-for-signal, and downstream tooling greps this bench's
//! console lines, so neither may drift.

use tracing::{debug, trace};

use crate::common::snapshot::{REG_COUNT, RegSnapshot};
use crate::dut::Datapath;
use crate::image::{IMEM_WORDS, MemImage};

/// Simulated-time units added per half-cycle advance.
pub const TIME_QUANTUM: u64 = 5;

/// Full clock periods driven with reset asserted.
pub const RESET_CYCLES: usize = 4;

/// Full clock periods driven after detection so in-flight writebacks retire.
pub const POST_ECALL_CYCLES: usize = 2;

/// Opcode field value of the completion signature (`ECALL`).
pub const ECALL_OPCODE: u32 = 0x73;

/// Mask isolating the 7-bit opcode field of an instruction word.
pub const OPCODE_MASK: u32 = 0x7F;

/// How a run of the execution loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion signature appeared on the instruction probe.
    Ecall {
        /// Zero-based full cycle at which the signature was observed.
        cycle: u64,
        /// The probed instruction word.
        instruction: u32,
    },
    /// The cycle budget ran out without a signature.
    ///
    /// Not fatal: the run still proceeds to register comparison, which is
    /// where a hung program earns its FAIL.
    Timeout {
        /// The exhausted budget.
        cycles: u64,
    },
}

/// Drives one datapath model through the conformance protocol.
///
/// The bench owns the model and the simulated clock. Time only moves through
/// [`half_cycle`](TestBench::half_cycle), so every evaluation advances it by
/// exactly [`TIME_QUANTUM`], and it never moves backwards within a run.
#[derive(Debug)]
pub struct TestBench<M> {
    dut: M,
    sim_time: u64,
}

impl<M: Datapath> TestBench<M> {
    /// Wraps a model with simulated time at zero.
    pub const fn new(dut: M) -> Self {
        Self { dut, sim_time: 0 }
    }

    /// Borrows the model.
    pub const fn dut(&self) -> &M {
        &self.dut
    }

    /// Mutably borrows the model.
    pub const fn dut_mut(&mut self) -> &mut M {
        &mut self.dut
    }

    /// Returns the current simulated time.
    pub const fn sim_time(&self) -> u64 {
        self.sim_time
    }

    /// Drives the clock to `level`, evaluates the model, and advances time.
    ///
    /// This is the only primitive that touches simulated time.
    pub fn half_cycle(&mut self, level: bool) {
        self.dut.set_clock(level);
        self.dut.eval();
        self.sim_time += TIME_QUANTUM;
    }

    /// Runs the fixed reset sequence.
    ///
    /// The cadence is, literally: deassert reset and drive one low/high
    /// transition; assert reset for [`RESET_CYCLES`] full periods; deassert
    /// reset and settle one half-cycle low. That is 11 half-cycle advances,
    /// after which the clock sits low and the model is in its architectural
    /// reset state. The sequence cannot fail.
    pub fn reset(&mut self) {
        trace!("reset sequence start");
        self.dut.set_reset(false);
        self.half_cycle(false);
        self.half_cycle(true);

        self.dut.set_reset(true);
        for _ in 0..RESET_CYCLES {
            self.half_cycle(false);
            self.half_cycle(true);
        }

        self.dut.set_reset(false);
        self.half_cycle(false);
        trace!(sim_time = self.sim_time, "reset sequence complete");
    }

    /// Writes a program image into the model's instruction memory.
    ///
    /// Word `i` lands at word address `i`; anything past the
    /// [`IMEM_WORDS`] window is silently ignored.
    pub fn load_image(&mut self, image: &MemImage) {
        let written = image.len().min(IMEM_WORDS);
        for (addr, word) in image.words().iter().take(IMEM_WORDS).enumerate() {
            self.dut.write_imem(addr, *word);
        }
        debug!(words = written, "program image written");
    }

    /// Clocks the model until the completion signature appears or the budget
    /// runs out.
    ///
    /// Each full cycle drives the clock high, evaluates, and samples the
    /// instruction probe at the high-clock edge. A word matches when its
    /// opcode field is [`ECALL_OPCODE`] and every bit above the opcode is
    /// zero; `0x1073` and `0xF3` must not match. On a match the bench runs
    /// [`POST_ECALL_CYCLES`] further full cycles (leaving the clock high) so
    /// the final writeback retires before registers are read.
    ///
    /// A `max_cycles` of zero times out immediately without evaluating the
    /// model at all.
    pub fn run_until_ecall(&mut self, max_cycles: u64) -> Completion {
        for cycle in 0..max_cycles {
            self.half_cycle(true);

            let ir = self.dut.instruction_probe();
            if (ir & OPCODE_MASK) == ECALL_OPCODE && (ir >> 7) == 0 {
                println!("[TB] ECALL detected at cycle {cycle} (IR={ir:#x})");
                debug!(cycle, ir, "completion signature latched");
                for _ in 0..POST_ECALL_CYCLES {
                    self.half_cycle(false);
                    self.half_cycle(true);
                }
                return Completion::Ecall {
                    cycle,
                    instruction: ir,
                };
            }

            self.half_cycle(false);
        }
        eprintln!("[TB] WARNING: Timeout - ECALL not found after {max_cycles} cycles");
        Completion::Timeout { cycles: max_cycles }
    }

    /// Captures the architectural register file as a snapshot.
    pub fn snapshot(&self) -> RegSnapshot {
        let mut snap = RegSnapshot::new();
        for index in 0..REG_COUNT {
            snap.set(index, self.dut.read_register(index));
        }
        snap
    }
}
