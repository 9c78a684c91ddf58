//! FFI binding to a Verilator-built datapath.
//!
//! A Verilated model is C++; the harness reaches it through a small C shim
//! compiled and linked by the embedder alongside the model. The shim exposes
//! the pins and probes over an opaque handle:
//!
//! ```c
//! typedef struct vdatapath vdatapath;
//!
//! vdatapath *vdatapath_new(void);
//! void       vdatapath_free(vdatapath *dp);
//! void       vdatapath_set_clk(vdatapath *dp, uint8_t level);
//! void       vdatapath_set_rst(vdatapath *dp, uint8_t level);
//! void       vdatapath_eval(vdatapath *dp);
//! uint32_t   vdatapath_ir(const vdatapath *dp);
//! uint32_t   vdatapath_reg(const vdatapath *dp, size_t index);
//! void       vdatapath_write_imem(vdatapath *dp, size_t addr, uint32_t word);
//! ```
//!
//! The binding links against `libvdatapath_shim`; point the linker at it with
//! `RUSTFLAGS="-L <dir>"` or a `.cargo/config.toml` entry when building with
//! the `verilated` feature.

use crate::dut::Datapath;

/// Raw C interface to the datapath shim.
pub mod ffi {
    /// Opaque handle to a Verilated datapath instance.
    #[repr(C)]
    pub struct RawDatapath {
        _private: [u8; 0],
    }

    #[link(name = "vdatapath_shim")]
    unsafe extern "C" {
        /// Instantiates a model; never returns null (construction failure aborts).
        pub fn vdatapath_new() -> *mut RawDatapath;
        /// Destroys a model created by [`vdatapath_new`].
        pub fn vdatapath_free(dp: *mut RawDatapath);
        /// Drives the clock pin (0 or 1).
        pub fn vdatapath_set_clk(dp: *mut RawDatapath, level: u8);
        /// Drives the reset pin (0 or 1, active high).
        pub fn vdatapath_set_rst(dp: *mut RawDatapath, level: u8);
        /// Re-evaluates the model with the current pin levels.
        pub fn vdatapath_eval(dp: *mut RawDatapath);
        /// Reads the instruction-register probe.
        pub fn vdatapath_ir(dp: *const RawDatapath) -> u32;
        /// Reads architectural register `index`; out-of-range reads return 0.
        pub fn vdatapath_reg(dp: *const RawDatapath, index: usize) -> u32;
        /// Stores `word` at word address `addr` in instruction memory.
        pub fn vdatapath_write_imem(dp: *mut RawDatapath, addr: usize, word: u32);
    }
}

/// Owning wrapper around a Verilated datapath instance.
///
/// The handle is created on construction and released on drop. The wrapper is
/// deliberately not `Send`: Verilated models carry global simulation context
/// and are driven from the single bench thread.
#[derive(Debug)]
pub struct VerilatedDatapath {
    raw: *mut ffi::RawDatapath,
}

impl VerilatedDatapath {
    /// Instantiates a fresh Verilated model through the shim.
    ///
    /// # Panics
    ///
    /// Panics if the shim hands back a null model, which only happens when
    /// the shim itself is broken.
    pub fn new() -> Self {
        // SAFETY: vdatapath_new takes no arguments and fully initializes the
        // model it returns.
        let raw = unsafe { ffi::vdatapath_new() };
        assert!(!raw.is_null(), "datapath shim returned a null model");
        Self { raw }
    }
}

impl Default for VerilatedDatapath {
    fn default() -> Self {
        Self::new()
    }
}

impl Datapath for VerilatedDatapath {
    fn set_clock(&mut self, level: bool) {
        // SAFETY: raw is non-null and uniquely owned by this wrapper.
        unsafe { ffi::vdatapath_set_clk(self.raw, u8::from(level)) }
    }

    fn set_reset(&mut self, level: bool) {
        // SAFETY: raw is non-null and uniquely owned by this wrapper.
        unsafe { ffi::vdatapath_set_rst(self.raw, u8::from(level)) }
    }

    fn eval(&mut self) {
        // SAFETY: raw is non-null and uniquely owned by this wrapper.
        unsafe { ffi::vdatapath_eval(self.raw) }
    }

    fn instruction_probe(&self) -> u32 {
        // SAFETY: raw is non-null; the shim read has no side effects.
        unsafe { ffi::vdatapath_ir(self.raw) }
    }

    fn read_register(&self, index: usize) -> u32 {
        // SAFETY: raw is non-null; the shim bounds-checks the index.
        unsafe { ffi::vdatapath_reg(self.raw, index) }
    }

    fn write_imem(&mut self, addr: usize, word: u32) {
        // SAFETY: raw is non-null and uniquely owned by this wrapper.
        unsafe { ffi::vdatapath_write_imem(self.raw, addr, word) }
    }
}

impl Drop for VerilatedDatapath {
    fn drop(&mut self) {
        // SAFETY: raw came from vdatapath_new and is freed exactly once.
        unsafe { ffi::vdatapath_free(self.raw) }
    }
}
