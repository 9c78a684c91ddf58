//! # Vector Loader Tests
//!
//! Tests for the on-disk loaders: `.mem` program images and `.res` golden
//! snapshots, including truncated files, partial words, and trailing
//! content.

use rstest::rstest;
use rvtb_core::HarnessError;
use rvtb_core::common::snapshot::{REG_COUNT, RES_BYTES, RegSnapshot};
use rvtb_core::sim::loader;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Helper to create a temporary vector file with the given contents.
fn temp_vector(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_program_reads_words() {
    let file = temp_vector(b"00000513\n00000073\n");
    let image = loader::load_program(file.path()).unwrap();
    assert_eq!(image.words(), &[0x0000_0513, 0x0000_0073]);
}

#[test]
fn test_load_program_missing_file() {
    let err = loader::load_program(Path::new("/nonexistent/prog.mem")).unwrap_err();
    assert!(matches!(err, HarnessError::Open { .. }));
    assert!(err.to_string().contains("/nonexistent/prog.mem"));
}

#[test]
fn test_load_program_propagates_parse_errors() {
    let file = temp_vector(b"00000513\nnot-hex\n");
    let err = loader::load_program(file.path()).unwrap_err();
    assert!(matches!(err, HarnessError::MalformedWord { line: 2, .. }));
}

#[test]
fn test_load_expected_reads_all_32_registers() {
    let mut golden = RegSnapshot::new();
    for index in 0..REG_COUNT {
        golden.set(index, 0x100 + index as u32);
    }
    let file = temp_vector(&golden.to_le_bytes());

    let snap = loader::load_expected(file.path()).unwrap();
    assert_eq!(snap, golden);
}

#[test]
fn test_load_expected_truncated_file_leaves_tail_zero() {
    // Two complete words, then end-of-file.
    let file = temp_vector(&[0x2A, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00]);

    let snap = loader::load_expected(file.path()).unwrap();
    assert_eq!(snap.get(0), 42);
    assert_eq!(snap.get(1), 7);
    for index in 2..REG_COUNT {
        assert_eq!(snap.get(index), 0, "x{index} should be zero");
    }
}

#[rstest]
#[case::one_byte_fragment(1, 1)]
#[case::two_byte_fragment(1, 2)]
#[case::three_byte_fragment(1, 3)]
#[case::fragment_at_x0(0, 2)]
#[case::fragment_at_x31(31, 3)]
fn test_load_expected_partial_word_reads_zero(#[case] cut: usize, #[case] tail: usize) {
    // `cut` complete words, then a `tail`-byte fragment of the next word.
    let mut data = Vec::new();
    for index in 0..cut {
        data.extend_from_slice(&(0x100 + index as u32).to_le_bytes());
    }
    data.extend_from_slice(&[0xFF; 3][..tail]);
    let file = temp_vector(&data);

    let snap = loader::load_expected(file.path()).unwrap();
    for index in 0..cut {
        assert_eq!(snap.get(index), 0x100 + index as u32);
    }
    // The fragment warns and leaves the cut register zero rather than
    // decoding garbage; everything past it stays zero too.
    for index in cut..REG_COUNT {
        assert_eq!(snap.get(index), 0, "x{index} should be zero");
    }
}

#[test]
fn test_load_expected_empty_file_is_all_zero() {
    let file = temp_vector(&[]);
    let snap = loader::load_expected(file.path()).unwrap();
    assert_eq!(snap, RegSnapshot::new());
}

#[test]
fn test_load_expected_ignores_content_past_32_words() {
    let mut data = vec![0u8; RES_BYTES];
    data[0] = 0x2A;
    data.extend_from_slice(&[0xFF; 16]);
    let file = temp_vector(&data);

    let snap = loader::load_expected(file.path()).unwrap();
    assert_eq!(snap.get(0), 42);
    for index in 1..REG_COUNT {
        assert_eq!(snap.get(index), 0);
    }
}

#[test]
fn test_load_expected_missing_file() {
    let err = loader::load_expected(Path::new("/nonexistent/prog.res")).unwrap_err();
    assert!(matches!(err, HarnessError::Open { .. }));
    // The console line is the path and nothing else; the OS cause stays in
    // the error chain.
    assert_eq!(err.to_string(), "Cannot open /nonexistent/prog.res");
}
