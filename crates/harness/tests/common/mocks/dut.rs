use mockall::mock;
use rvtb_core::common::snapshot::REG_COUNT;
use rvtb_core::dut::Datapath;

mock! {
    pub Datapath {}
    impl Datapath for Datapath {
        fn set_clock(&mut self, level: bool);
        fn set_reset(&mut self, level: bool);
        fn eval(&mut self);
        fn instruction_probe(&self) -> u32;
        fn read_register(&self, index: usize) -> u32;
        fn write_imem(&mut self, addr: usize, word: u32);
    }
}

/// Everything the bench can do to a model's pins, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    /// The clock pin was driven to this level.
    Clk(bool),
    /// The reset pin was driven to this level.
    Rst(bool),
    /// The model was evaluated.
    Eval,
}

/// A datapath double that records pin activity and plays back a probe script.
///
/// Every `set_clock`/`set_reset`/`eval` call is appended to `events`, so a
/// test can compare the bench's drive pattern against the expected cadence
/// signal for signal. Each evaluation at high clock consumes the next word
/// of `script` into the instruction probe; past the end of the script the
/// probe reads zero, which never matches the completion signature.
#[derive(Debug, Default)]
pub struct ScriptedDut {
    /// Recorded pin activity in call order.
    pub events: Vec<PinEvent>,
    /// Instruction words latched on successive high-clock evaluations.
    pub script: Vec<u32>,
    /// Instruction-memory writes in call order.
    pub imem_writes: Vec<(usize, u32)>,
    /// Values served to `read_register`.
    pub regs: [u32; REG_COUNT],
    clk: bool,
    rst: bool,
    ir: u32,
    cursor: usize,
}

impl ScriptedDut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: &[u32]) -> Self {
        Self {
            script: script.to_vec(),
            ..Self::default()
        }
    }

    /// Level the clock pin was last driven to.
    pub fn clock_level(&self) -> bool {
        self.clk
    }

    /// Level the reset pin was last driven to.
    pub fn reset_level(&self) -> bool {
        self.rst
    }

    /// Number of evaluations recorded so far.
    pub fn eval_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PinEvent::Eval))
            .count()
    }
}

impl Datapath for ScriptedDut {
    fn set_clock(&mut self, level: bool) {
        self.events.push(PinEvent::Clk(level));
        self.clk = level;
    }

    fn set_reset(&mut self, level: bool) {
        self.events.push(PinEvent::Rst(level));
        self.rst = level;
    }

    fn eval(&mut self) {
        self.events.push(PinEvent::Eval);
        if self.clk {
            self.ir = self.script.get(self.cursor).copied().unwrap_or(0);
            self.cursor += 1;
        }
    }

    fn instruction_probe(&self) -> u32 {
        self.ir
    }

    fn read_register(&self, index: usize) -> u32 {
        self.regs[index]
    }

    fn write_imem(&mut self, addr: usize, word: u32) {
        self.imem_writes.push((addr, word));
    }
}
