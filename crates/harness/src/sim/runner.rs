//! Test-case orchestration.
//!
//! This module turns configuration into verdicts. It provides:
//! 1. **Resolution:** A [`TestCase`] names the vector pair and budget for one
//!    run.
//! 2. **Single runs:** [`run_case`] drives a bench from existence checks to
//!    the PASS/FAIL line in the reference order.
//! 3. **Suites:** discovery of every `.mem` under a root and a
//!    fresh-model-per-test loop with an aggregated [`RunSummary`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::error::{HarnessError, Result};
use crate::common::snapshot;
use crate::config::Config;
use crate::dut::Datapath;
use crate::sim::bench::{Completion, TestBench};
use crate::sim::loader;

/// A fully resolved unit of work: one program, one golden snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Name the verdict is reported under.
    pub name: String,
    /// Path of the `.mem` program image.
    pub mem_path: PathBuf,
    /// Path of the `.res` golden snapshot.
    pub res_path: PathBuf,
    /// Cycle budget for the run.
    pub max_cycles: u64,
}

impl TestCase {
    /// Resolves a test by name under a vector root.
    ///
    /// Paths are formed by concatenation, so nested names like
    /// `task1/addpos` resolve naturally. A missing trailing separator on a
    /// non-empty root is tolerated.
    pub fn new(root: &str, name: &str, max_cycles: u64) -> Self {
        let sep = if root.is_empty() || root.ends_with('/') {
            ""
        } else {
            "/"
        };
        Self {
            name: name.to_string(),
            mem_path: PathBuf::from(format!("{root}{sep}{name}.mem")),
            res_path: PathBuf::from(format!("{root}{sep}{name}.res")),
            max_cycles,
        }
    }

    /// Resolves the test a [`Config`] names.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.test_root, &config.test_name, config.max_cycles)
    }
}

/// Drives one test case to a verdict.
///
/// The sequence is contractual: check that the `.mem` then the `.res` file
/// exists, load and inject the program, load the golden snapshot, reset, run
/// until completion or timeout, then compare every register and print one
/// mismatch line per difference before the PASS/FAIL verdict.
///
/// # Errors
///
/// A missing or unreadable vector or a malformed image aborts the run with a
/// typed error and no verdict. A timeout or a register mismatch is a FAIL
/// verdict, not an error.
pub fn run_case<M: Datapath>(bench: &mut TestBench<M>, case: &TestCase) -> Result<bool> {
    if !case.mem_path.exists() {
        return Err(HarnessError::MissingFile(case.mem_path.clone()));
    }
    if !case.res_path.exists() {
        return Err(HarnessError::MissingFile(case.res_path.clone()));
    }

    let image = loader::load_program(&case.mem_path)?;
    bench.load_image(&image);
    let expected = loader::load_expected(&case.res_path)?;

    bench.reset();
    match bench.run_until_ecall(case.max_cycles) {
        Completion::Ecall { cycle, .. } => debug!(cycle, "run completed"),
        Completion::Timeout { cycles } => debug!(cycles, "run timed out"),
    }

    let actual = bench.snapshot();
    let mismatches = snapshot::diff(&expected, &actual);
    for m in &mismatches {
        println!(
            "[TB] Mismatch x{} exp={:#x} got={:#x}",
            m.index, m.expected, m.actual
        );
    }

    let passed = mismatches.is_empty();
    if passed {
        println!("[TB] PASS {}", case.name);
    } else {
        println!("[TB] FAIL {}", case.name);
    }
    Ok(passed)
}

/// Aggregated verdicts across one or more runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of tests driven to a verdict.
    pub total: usize,
    /// Number of tests that passed.
    pub passed: usize,
    /// Names of the tests that did not pass, in run order.
    pub failed: Vec<String>,
}

impl RunSummary {
    /// Records one verdict.
    pub fn record(&mut self, name: &str, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed.push(name.to_string());
        }
    }

    /// Number of tests that did not pass.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Returns `true` when every recorded test passed.
    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    /// Prints the summary line.
    pub fn print(&self) {
        println!(
            "[TB] Summary: {} total, {} passed, {} failed",
            self.total,
            self.passed,
            self.failed_count()
        );
    }

    /// Prints the names of the failed tests, one per line.
    pub fn print_failures(&self) {
        if self.failed.is_empty() {
            return;
        }
        println!("[TB] Failed tests:");
        for name in &self.failed {
            println!("[TB]   - {name}");
        }
    }
}

/// Finds every `.mem` vector under `root`, recursively.
///
/// Names are root-relative with the extension dropped, sorted so suite order
/// is stable across filesystems.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] when a directory cannot be read.
pub fn discover_tests(root: &str) -> Result<Vec<String>> {
    let root_path = Path::new(root);
    let mut found = Vec::new();
    walk_mem_files(root_path, root_path, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk_mem_files(root: &Path, dir: &Path, found: &mut Vec<String>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| HarnessError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk_mem_files(root, &path, found)?;
        } else if path.extension().is_some_and(|ext| ext == "mem") {
            if let Ok(rel) = path.strip_prefix(root) {
                found.push(rel.with_extension("").to_string_lossy().into_owned());
            }
        }
    }
    Ok(())
}

/// Runs every discovered test, each on a fresh model from `make_dut`.
///
/// A fresh model and bench per test reproduces the isolation of invoking the
/// reference testbench once per vector: no instruction memory or simulated
/// time leaks between runs. `filter` keeps only test names starting with the
/// given prefix. Per-test harness errors are reported on stderr and counted
/// as failures without stopping the suite.
///
/// # Errors
///
/// Only discovery failures (an unreadable vector root) abort the suite.
pub fn run_suite<M, F>(
    mut make_dut: F,
    root: &str,
    max_cycles: u64,
    filter: Option<&str>,
) -> Result<RunSummary>
where
    M: Datapath,
    F: FnMut() -> M,
{
    let names: Vec<String> = discover_tests(root)?
        .into_iter()
        .filter(|name| filter.is_none_or(|prefix| name.starts_with(prefix)))
        .collect();
    println!("[TB] Found {} test(s) under {root}", names.len());

    let mut summary = RunSummary::default();
    for name in names {
        let case = TestCase::new(root, &name, max_cycles);
        let mut bench = TestBench::new(make_dut());
        let passed = match run_case(&mut bench, &case) {
            Ok(passed) => passed,
            Err(e) => {
                eprintln!("[TB] ERROR: {e}");
                false
            }
        };
        summary.record(&name, passed);
    }
    Ok(summary)
}
