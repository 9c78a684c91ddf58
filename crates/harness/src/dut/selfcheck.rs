//! Fetch-only stand-in datapath.
//!
//! [`SelfCheckDatapath`] latches instruction words the way a real model's
//! fetch stage would but executes nothing, so the harness's own plumbing
//! (reset cadence, image injection, completion detection, comparison) can be
//! exercised without a synthesized model. It is the CLI's model when the
//! `verilated` feature is off.

use crate::common::snapshot::REG_COUNT;
use crate::dut::Datapath;
use crate::image::IMEM_WORDS;

/// A datapath model that fetches but never executes.
///
/// On each rising clock edge out of reset the next instruction-memory word is
/// latched into the probe register and the word counter advances (wrapping at
/// the memory size). While reset is asserted the counter and probe clear.
/// All 32 architectural registers read as zero forever, so a program image
/// whose golden snapshot is all zeros passes and anything else fails.
#[derive(Debug)]
pub struct SelfCheckDatapath {
    clk: bool,
    rst: bool,
    last_clk: bool,
    imem: [u32; IMEM_WORDS],
    pc: usize,
    ir: u32,
}

impl SelfCheckDatapath {
    /// Creates a model with cleared pins, empty memory, and a zeroed probe.
    pub const fn new() -> Self {
        Self {
            clk: false,
            rst: false,
            last_clk: false,
            imem: [0; IMEM_WORDS],
            pc: 0,
            ir: 0,
        }
    }
}

impl Default for SelfCheckDatapath {
    fn default() -> Self {
        Self::new()
    }
}

impl Datapath for SelfCheckDatapath {
    fn set_clock(&mut self, level: bool) {
        self.clk = level;
    }

    fn set_reset(&mut self, level: bool) {
        self.rst = level;
    }

    fn eval(&mut self) {
        let rising = self.clk && !self.last_clk;
        if rising {
            if self.rst {
                self.pc = 0;
                self.ir = 0;
            } else {
                self.ir = self.imem[self.pc % IMEM_WORDS];
                self.pc = self.pc.wrapping_add(1);
            }
        }
        self.last_clk = self.clk;
    }

    fn instruction_probe(&self) -> u32 {
        self.ir
    }

    fn read_register(&self, index: usize) -> u32 {
        debug_assert!(index < REG_COUNT);
        0
    }

    fn write_imem(&mut self, addr: usize, word: u32) {
        if let Some(slot) = self.imem.get_mut(addr) {
            *slot = word;
        }
    }
}
