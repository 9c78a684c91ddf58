//! Architectural register snapshots.
//!
//! This module defines the data carried between the expected-result loader,
//! the model probe, and the comparator. It provides:
//! 1. **Snapshot Storage:** A fixed 32-entry register image, zero-initialized.
//! 2. **Binary Layout:** The `.res` on-disk form, 32 little-endian 32-bit
//!    words in register order.
//! 3. **Comparison:** A full diff that never stops at the first difference.

/// Number of architectural registers captured by a snapshot.
pub const REG_COUNT: usize = 32;

/// Size in bytes of a complete `.res` register dump.
pub const RES_BYTES: usize = REG_COUNT * 4;

/// A point-in-time image of the 32-entry architectural register file.
///
/// Snapshots are plain data: `x0` is stored like any other slot, so a golden
/// file claiming a non-zero `x0` will produce a mismatch rather than being
/// silently corrected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegSnapshot {
    regs: [u32; REG_COUNT],
}

impl RegSnapshot {
    /// Creates a snapshot with every register zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads register `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - Register index (0-31).
    pub const fn get(&self, index: usize) -> u32 {
        self.regs[index]
    }

    /// Writes `value` to register `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - Register index (0-31).
    /// * `value` - Value to store.
    pub const fn set(&mut self, index: usize, value: u32) {
        self.regs[index] = value;
    }

    /// Returns the registers as a slice in index order.
    pub const fn as_words(&self) -> &[u32; REG_COUNT] {
        &self.regs
    }

    /// Encodes the snapshot in the `.res` on-disk layout.
    pub fn to_le_bytes(&self) -> [u8; RES_BYTES] {
        let mut bytes = [0u8; RES_BYTES];
        for (chunk, reg) in bytes.chunks_exact_mut(4).zip(self.regs.iter()) {
            chunk.copy_from_slice(&reg.to_le_bytes());
        }
        bytes
    }

    /// Decodes a snapshot from the `.res` on-disk layout.
    pub fn from_le_bytes(bytes: &[u8; RES_BYTES]) -> Self {
        let mut snap = Self::new();
        for (index, chunk) in bytes.chunks_exact(4).enumerate() {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            snap.regs[index] = u32::from_le_bytes(word);
        }
        snap
    }
}

/// One register whose final value differs from the golden reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Register index (0-31).
    pub index: usize,
    /// Value the golden reference demands.
    pub expected: u32,
    /// Value the model actually holds.
    pub actual: u32,
}

/// Compares two snapshots register by register.
///
/// Every differing register is reported, in index order; the scan never stops
/// at the first difference. An empty result means the snapshots agree.
pub fn diff(expected: &RegSnapshot, actual: &RegSnapshot) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    for index in 0..REG_COUNT {
        let (e, a) = (expected.get(index), actual.get(index));
        if e != a {
            mismatches.push(Mismatch {
                index,
                expected: e,
                actual: a,
            });
        }
    }
    mismatches
}
