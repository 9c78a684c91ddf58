//! Program images and the `.mem` text format.
//!
//! This module owns every representation a test program passes through. It
//! provides:
//! 1. **Parsing:** the `.mem` hex-text format, one 32-bit word per line,
//!    capped at the bootloader window.
//! 2. **Conversion:** raw `.bin` objcopy output into `.mem` words.
//! 3. **Patching:** re-encoding word 0 as a `LUI` that materializes a new
//!    base address in `x8`.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::error::{HarnessError, Result};

/// Capacity of the bootloader instruction memory, in 32-bit words.
///
/// The loader never writes past this window; reading a `.mem` file stops as
/// soon as this many words have been parsed, leaving any remaining lines
/// unconsumed.
pub const IMEM_WORDS: usize = 128;

/// The completion instruction as a whole memory word.
const ECALL_WORD: u32 = 0x0000_0073;

/// Major opcode of `LUI`.
const LUI_OPCODE: u32 = 0x37;

/// Destination register for a base-address patch (`x8`/`s0`).
const LUI_RD: u32 = 8;

/// A program image: instruction words in ascending word-address order.
///
/// Images read from `.mem` files hold at most [`IMEM_WORDS`] words. Images
/// produced by [`MemImage::from_bin`] may be longer; the cap is a property of
/// loading, not of the type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemImage {
    words: Vec<u32>,
}

impl MemImage {
    /// Wraps a word vector as an image.
    pub const fn from_words(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Returns the instruction words in address order.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Returns the number of words in the image.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` when the image holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Parses `.mem` text from a reader.
    ///
    /// Blank lines are skipped and do not count toward the capacity. Each
    /// remaining line is one base-16 word, surrounding whitespace and an
    /// optional `0x` prefix tolerated. Parsing stops before reading another
    /// line once [`IMEM_WORDS`] words have been collected.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MalformedWord`] for a line that is not a
    /// 32-bit hex word, and [`HarnessError::Io`] when the reader fails;
    /// `path` is only used to label those errors.
    pub fn read<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut words = Vec::new();
        let mut lines = reader.lines();
        let mut number = 0usize;
        while words.len() < IMEM_WORDS {
            let Some(line) = lines.next() else { break };
            number += 1;
            let line = line.map_err(|e| HarnessError::io(path, e))?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);
            let word = u32::from_str_radix(digits, 16).map_err(|_| HarnessError::MalformedWord {
                path: path.to_path_buf(),
                line: number,
                text: text.to_string(),
            })?;
            words.push(word);
        }
        Ok(Self { words })
    }

    /// Reads a `.mem` file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Open`] when the file cannot be opened, plus
    /// everything [`MemImage::read`] reports.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| HarnessError::open(path, e))?;
        Self::read(BufReader::new(file), path)
    }

    /// Converts raw binary program data into an image.
    ///
    /// Bytes are consumed as little-endian 32-bit words; a trailing partial
    /// word is zero-padded. Conversion stops after the first `ECALL` word so
    /// trailing data sections never land in instruction memory.
    pub fn from_bin(bytes: &[u8]) -> Self {
        let mut words = Vec::new();
        for chunk in bytes.chunks(4) {
            let mut raw = [0u8; 4];
            raw[..chunk.len()].copy_from_slice(chunk);
            let word = u32::from_le_bytes(raw);
            words.push(word);
            if word == ECALL_WORD {
                break;
            }
        }
        Self { words }
    }

    /// Renders the image as `.mem` text: zero-padded 8-digit lowercase hex,
    /// one word per line, trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.words.len() * 9);
        for word in &self.words {
            let _ = writeln!(text, "{word:08x}");
        }
        text
    }

    /// Writes the image to disk in `.mem` text form.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] when the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text()).map_err(|e| HarnessError::io(path, e))
    }

    /// Re-encodes word 0 as `LUI x8, base[31:12]`.
    ///
    /// Startup code conventionally begins by materializing the data base
    /// address in `x8`; rewriting that one instruction retargets a prebuilt
    /// image without reassembling it.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MisalignedBase`] unless the low 12 bits of
    /// `base` are zero (`LUI` cannot encode them), and
    /// [`HarnessError::EmptyImage`] when there is no word 0 to rewrite.
    pub fn retarget_base(&mut self, base: u32) -> Result<BasePatch> {
        if base & 0xFFF != 0 {
            return Err(HarnessError::MisalignedBase(base));
        }
        let Some(first) = self.words.first_mut() else {
            return Err(HarnessError::EmptyImage);
        };
        let patch = BasePatch {
            old: *first,
            new: (base & 0xFFFF_F000) | (LUI_RD << 7) | LUI_OPCODE,
        };
        *first = patch.new;
        Ok(patch)
    }
}

/// Before/after words of a base-address patch, for operator reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasePatch {
    /// The instruction word the image used to start with.
    pub old: u32,
    /// The `LUI` word it starts with now.
    pub new: u32,
}
