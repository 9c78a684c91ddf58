//! # Reset Sequence Tests
//!
//! The reset cadence is protocol: one clock period with reset deasserted,
//! four with it asserted, then a half-cycle settle with it released. These
//! tests compare the bench's drive pattern against that cadence signal for
//! signal.

use crate::common::harness::TestContext;
use crate::common::mocks::dut::PinEvent::{Clk, Eval, Rst};
use pretty_assertions::assert_eq;
use rvtb_core::sim::bench::{RESET_CYCLES, TIME_QUANTUM};

#[test]
fn test_reset_cadence_signal_for_signal() {
    let mut ctx = TestContext::new();
    ctx.bench.reset();

    let mut expected = vec![Rst(false), Clk(false), Eval, Clk(true), Eval, Rst(true)];
    for _ in 0..RESET_CYCLES {
        expected.extend_from_slice(&[Clk(false), Eval, Clk(true), Eval]);
    }
    expected.extend_from_slice(&[Rst(false), Clk(false), Eval]);

    assert_eq!(ctx.dut().events, expected);
}

#[test]
fn test_reset_advances_eleven_half_cycles() {
    let mut ctx = TestContext::new();
    ctx.bench.reset();

    // 2 edges before assertion, 8 during, 1 settle after release.
    assert_eq!(ctx.dut().eval_count(), 11);
    assert_eq!(ctx.bench.sim_time(), 11 * TIME_QUANTUM);
}

#[test]
fn test_reset_leaves_clock_low_and_reset_released() {
    let mut ctx = TestContext::new();
    ctx.bench.reset();

    assert!(!ctx.dut().clock_level());
    assert!(!ctx.dut().reset_level());
}

#[test]
fn test_reset_is_repeatable() {
    let mut ctx = TestContext::new();
    ctx.bench.reset();
    ctx.bench.reset();

    // Time never rewinds; the second pass costs the same 11 advances.
    assert_eq!(ctx.bench.sim_time(), 22 * TIME_QUANTUM);
    assert_eq!(ctx.dut().eval_count(), 22);
}
