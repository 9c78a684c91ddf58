//! Configuration system for the testbench.
//!
//! This module defines how a test run is parameterized. It provides:
//! 1. **Defaults:** The baseline vector directory, test name, and cycle budget.
//! 2. **Structure:** A flat [`Config`] covering everything the harness needs.
//! 3. **Plusargs:** The Verilog-style `+NAME=value` command-line grammar.
//!
//! Configuration is supplied via JSON from embedding code, or starts from
//! `Config::default()` and is adjusted with plusargs by the CLI.

use serde::Deserialize;

use crate::common::error::{HarnessError, Result};

/// Default configuration constants for the testbench.
///
/// These values reproduce the reference testbench's built-in settings and
/// apply when a field is neither present in supplied JSON nor overridden by
/// a plusarg.
mod defaults {
    /// Directory the test vector files are resolved against.
    ///
    /// Always carries a trailing separator: vector paths are formed by
    /// direct concatenation with the test name.
    pub const TEST_ROOT: &str = "tests/";

    /// Test executed when the operator names none.
    pub const TEST_NAME: &str = "gcd_benchmark";

    /// Clock cycles granted before the run is declared hung (10 million).
    ///
    /// Generous enough for every shipped benchmark while still terminating
    /// a runaway model in seconds.
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// Complete parameterization of a single test run.
///
/// # Examples
///
/// Deserializing from JSON (typical embedding usage):
///
/// ```
/// use rvtb_core::config::Config;
///
/// let json = r#"{
///     "test_root": "vectors/",
///     "test_name": "fib_benchmark",
///     "max_cycles": 50000
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.test_root, "vectors/");
/// assert_eq!(config.max_cycles, 50_000);
/// ```
///
/// Applying plusargs (typical CLI usage; the last occurrence of a flag wins):
///
/// ```
/// use rvtb_core::config::Config;
///
/// let args = ["+TESTROOT=vectors", "+TEST=old", "+TEST=fib_benchmark"];
/// let config = Config::from_plusargs(args).unwrap();
/// assert_eq!(config.test_root, "vectors/");
/// assert_eq!(config.test_name, "fib_benchmark");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory containing the `.mem`/`.res` vector pairs.
    ///
    /// A trailing separator is appended on plusarg ingestion; JSON suppliers
    /// are expected to include one, and path derivation tolerates either.
    #[serde(default = "Config::default_test_root")]
    pub test_root: String,

    /// Base name of the test; vectors are `<root><name>.mem` / `<root><name>.res`.
    #[serde(default = "Config::default_test_name")]
    pub test_name: String,

    /// Upper bound on full clock cycles before the run times out.
    #[serde(default = "Config::default_max_cycles")]
    pub max_cycles: u64,
}

impl Config {
    /// Returns the default vector directory.
    fn default_test_root() -> String {
        defaults::TEST_ROOT.to_string()
    }

    /// Returns the default test name.
    fn default_test_name() -> String {
        defaults::TEST_NAME.to_string()
    }

    /// Returns the default cycle budget.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    /// Builds a configuration from defaults plus a plusarg sequence.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Plusarg`] when a recognized flag carries a
    /// value the harness cannot use (a non-numeric `+CYCLES=`).
    pub fn from_plusargs<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        config.apply_plusargs(args)?;
        Ok(config)
    }

    /// Applies Verilog-style plusargs on top of the current settings.
    ///
    /// Recognized flags are `+TESTROOT=<dir>`, `+TEST=<name>` and
    /// `+CYCLES=<n>`. Later occurrences override earlier ones; arguments that
    /// are not recognized plusargs are left for other consumers and ignored
    /// here.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Plusarg`] when `+CYCLES=` does not parse as an
    /// unsigned integer.
    pub fn apply_plusargs<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if let Some(value) = arg.strip_prefix("+TESTROOT=") {
                self.test_root = with_trailing_sep(value);
            } else if let Some(value) = arg.strip_prefix("+TEST=") {
                self.test_name = value.to_string();
            } else if let Some(value) = arg.strip_prefix("+CYCLES=") {
                self.max_cycles = value.parse().map_err(|_| HarnessError::Plusarg {
                    flag: "+CYCLES",
                    value: value.to_string(),
                })?;
            }
        }
        Ok(())
    }

    /// Checks that the configuration can actually name a vector pair.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::NoTestName`] when the test name is empty,
    /// which happens when the operator passes `+TEST=` with no value.
    pub fn validate(&self) -> Result<()> {
        if self.test_name.is_empty() {
            return Err(HarnessError::NoTestName);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_root: Self::default_test_root(),
            test_name: Self::default_test_name(),
            max_cycles: Self::default_max_cycles(),
        }
    }
}

/// Appends a path separator unless the directory already ends with one.
fn with_trailing_sep(root: &str) -> String {
    let mut root = root.to_string();
    if !root.ends_with('/') {
        root.push('/');
    }
    root
}
