//! RISC-V datapath conformance testbench CLI.
//!
//! This binary provides a single entry point for the verification flow. It performs:
//! 1. **Conformance run:** Bare invocation with Verilog-style plusargs drives one
//!    test to a PASS/FAIL verdict with machine-readable exit status.
//! 2. **Suite run:** Discover every `.mem` vector under a root and run each on a
//!    fresh model.
//! 3. **Vector tooling:** Convert raw `.bin` programs to `.mem` hex text and
//!    retarget an image's base address.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use rvtb_core::image::MemImage;
use rvtb_core::sim::runner::{self, RunSummary, TestCase};
use rvtb_core::{Config, HarnessError, TestBench};

#[cfg(not(feature = "verilated"))]
use rvtb_core::dut::SelfCheckDatapath;
#[cfg(feature = "verilated")]
use rvtb_core::dut::VerilatedDatapath;

#[derive(Parser, Debug)]
#[command(
    name = "tb",
    version,
    about = "RISC-V datapath conformance testbench",
    long_about = "Drive a simulated datapath through reset, inject a program image, run until\nthe ECALL completion signature, and compare the register file against a golden\nsnapshot.\n\nThe bare invocation takes Verilog-style plusargs:\n  tb +TESTROOT=tests +TEST=gcd_benchmark +CYCLES=200000\n\nExamples:\n  tb +TEST=fib_benchmark\n  tb suite --root tests --task task1/\n  tb convert software/bin/gcd_benchmark.bin\n  tb patch tests/gcd_benchmark.mem tests/gcd_hi.mem 0x00010000",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verilog-style plusargs: +TESTROOT=<dir> +TEST=<name> +CYCLES=<n>.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    plusargs: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Discover every .mem vector under a root and run each on a fresh model.
    Suite {
        /// Vector root directory.
        #[arg(long, default_value_t = Config::default().test_root)]
        root: String,

        /// Cycle budget per test.
        #[arg(long, default_value_t = Config::default().max_cycles)]
        cycles: u64,

        /// Only run tests whose name starts with this prefix (e.g. task1/).
        #[arg(long)]
        task: Option<String>,
    },

    /// Convert raw .bin program data to .mem hex text (stops after ECALL).
    Convert {
        /// A .bin file, or a directory whose .bin files are all converted.
        input: PathBuf,

        /// Output .mem path (single-file mode only; defaults to input with .mem).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-encode word 0 of a .mem image as LUI x8 with a new base address.
    Patch {
        /// Input .mem file.
        input: PathBuf,

        /// Output .mem file.
        output: PathBuf,

        /// New base address (hex, 4 KiB aligned), e.g. 0x00010000.
        base: String,
    },
}

#[cfg(feature = "verilated")]
const MODEL_NAME: &str = "verilated datapath";
#[cfg(not(feature = "verilated"))]
const MODEL_NAME: &str = "self-check stub (no datapath linked)";

#[cfg(feature = "verilated")]
fn new_model() -> VerilatedDatapath {
    VerilatedDatapath::new()
}

#[cfg(not(feature = "verilated"))]
fn new_model() -> SelfCheckDatapath {
    SelfCheckDatapath::new()
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Suite { root, cycles, task }) => cmd_suite(&root, cycles, task.as_deref()),
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output),
        Some(Commands::Patch {
            input,
            output,
            base,
        }) => cmd_patch(&input, &output, &base),
        None => cmd_run(&cli.plusargs),
    }
}

/// Runs the single configured test: banner, one model, one bench, verdict, summary.
///
/// Exits 0 only when the test passed. Configuration and vector errors print
/// `[TB] ERROR:` on stderr and exit 1 without a summary line.
fn cmd_run(plusargs: &[String]) {
    let config = match Config::from_plusargs(plusargs) {
        Ok(config) => config,
        Err(e) => tb_fail(&e),
    };

    println!("[TB] Test root: {}", config.test_root);
    println!("[TB] Test: {}", config.test_name);
    println!("[TB] Max cycles: {}", config.max_cycles);
    println!("[TB] Model: {MODEL_NAME}");

    if let Err(e) = config.validate() {
        tb_fail(&e);
    }

    let case = TestCase::from_config(&config);
    let mut bench = TestBench::new(new_model());
    let passed = match runner::run_case(&mut bench, &case) {
        Ok(passed) => passed,
        Err(e) => tb_fail(&e),
    };

    let mut summary = RunSummary::default();
    summary.record(&case.name, passed);
    summary.print();

    process::exit(if passed { 0 } else { 1 });
}

/// Runs every vector under `root` on a fresh model per test.
fn cmd_suite(root: &str, cycles: u64, task: Option<&str>) {
    println!("[TB] Test root: {root}");
    println!("[TB] Max cycles: {cycles}");
    println!("[TB] Model: {MODEL_NAME}");

    let summary = match runner::run_suite(new_model, root, cycles, task) {
        Ok(summary) => summary,
        Err(e) => tb_fail(&e),
    };

    if summary.total == 0 {
        eprintln!("[TB] ERROR: no .mem vectors under {root}");
        process::exit(1);
    }

    summary.print();
    summary.print_failures();
    process::exit(if summary.all_passed() { 0 } else { 1 });
}

/// Converts one `.bin` file, or every `.bin` in a directory.
fn cmd_convert(input: &Path, output: Option<PathBuf>) {
    if input.is_dir() {
        if output.is_some() {
            eprintln!("Error: --output only applies to single-file conversion");
            process::exit(1);
        }
        println!("Converting all .bin files in {}", input.display());
        let mut bins: Vec<PathBuf> = match fs::read_dir(input) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "bin"))
                .collect(),
            Err(e) => tool_fail(&HarnessError::io(input, e)),
        };
        bins.sort();
        for bin in &bins {
            let out = bin.with_extension("mem");
            convert_one(bin, &out);
            println!("  Wrote {}", out.display());
        }
    } else {
        let out = output.unwrap_or_else(|| input.with_extension("mem"));
        convert_one(input, &out);
        println!("Wrote {}", out.display());
    }
}

fn convert_one(input: &Path, output: &Path) {
    let bytes = match fs::read(input) {
        Ok(bytes) => bytes,
        Err(e) => tool_fail(&HarnessError::open(input, e)),
    };
    let image = MemImage::from_bin(&bytes);
    if let Err(e) = image.save(output) {
        tool_fail(&e);
    }
}

/// Rewrites word 0 of an image as `LUI x8, base[31:12]` and saves a copy.
fn cmd_patch(input: &Path, output: &Path, base_text: &str) {
    let digits = base_text
        .strip_prefix("0x")
        .or_else(|| base_text.strip_prefix("0X"))
        .unwrap_or(base_text);
    let base = match u32::from_str_radix(digits, 16) {
        Ok(base) => base,
        Err(_) => tool_fail(&HarnessError::BadBase(base_text.to_string())),
    };

    let mut image = match MemImage::load(input) {
        Ok(image) => image,
        Err(e) => tool_fail(&e),
    };
    let patch = match image.retarget_base(base) {
        Ok(patch) => patch,
        Err(e) => tool_fail(&e),
    };

    println!("Patching base address...");
    println!("Original (line 1): {:08x}", patch.old);
    println!("New      (line 1): {:08x} (base {base:#010x})", patch.new);

    if let Err(e) = image.save(output) {
        tool_fail(&e);
    }
    println!("Patched file saved to {}", output.display());
}

/// Reports a fatal testbench error in the `[TB]` console format and exits.
fn tb_fail(e: &HarnessError) -> ! {
    eprintln!("[TB] ERROR: {e}");
    process::exit(1);
}

/// Reports a vector-tooling error and exits.
fn tool_fail(e: &HarnessError) -> ! {
    eprintln!("Error: {e}");
    process::exit(1);
}
