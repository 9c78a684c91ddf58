//! Test-vector loaders.
//!
//! Reads the two on-disk vector forms and reports them the way the reference
//! testbench did, line for line: the loading banner, each non-zero expected
//! register, and the short-read warnings. Failures come back as typed errors
//! instead of terminating the process.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::common::error::{HarnessError, Result};
use crate::common::snapshot::{REG_COUNT, RegSnapshot};
use crate::image::MemImage;

/// Loads a `.mem` program image.
///
/// The loading line is printed before the file is touched, so a subsequent
/// open failure is reported under the program it belongs to.
///
/// # Errors
///
/// Returns [`HarnessError::Open`] when the file cannot be opened and
/// [`HarnessError::MalformedWord`] / [`HarnessError::Io`] from parsing.
pub fn load_program(path: &Path) -> Result<MemImage> {
    println!("[TB] Loading program {}", path.display());
    let image = MemImage::load(path)?;
    debug!(words = image.len(), "program image parsed");
    Ok(image)
}

/// Loads a `.res` golden register snapshot.
///
/// All 32 slots start at zero. Each slot consumes up to 4 bytes: a full word
/// is decoded little-endian and echoed when non-zero; a short read (1-3
/// bytes) warns on stderr and leaves the slot zero; end-of-file leaves the
/// remaining slots zero silently. Content past the 32nd word is ignored.
///
/// # Errors
///
/// Returns [`HarnessError::Open`] when the file cannot be opened and
/// [`HarnessError::Io`] when a read fails outright.
pub fn load_expected(path: &Path) -> Result<RegSnapshot> {
    let file = File::open(path).map_err(|e| HarnessError::open(path, e))?;
    println!("[TB] Loading expected results from {}", path.display());

    let mut reader = BufReader::new(file);
    let mut snap = RegSnapshot::new();
    let mut nonzero = 0usize;
    for index in 0..REG_COUNT {
        let mut word = [0u8; 4];
        let got = read_up_to(&mut reader, &mut word).map_err(|e| HarnessError::io(path, e))?;
        if got == 4 {
            let value = u32::from_le_bytes(word);
            snap.set(index, value);
            if value != 0 {
                println!("[TB]   x{index} = {value:#x}");
                nonzero += 1;
            }
        } else if got > 0 {
            eprintln!("[TB] WARNING: Incomplete read for register x{index}");
        }
    }
    debug!(nonzero, "expected snapshot loaded");
    Ok(snap)
}

/// Reads until `buf` is full or the reader hits end-of-file.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
