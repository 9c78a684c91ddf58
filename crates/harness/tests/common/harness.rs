use crate::common::mocks::dut::ScriptedDut;
use rvtb_core::TestBench;
use rvtb_core::common::snapshot::RegSnapshot;
use std::fs;
use tempfile::TempDir;

/// A bench wired to a scripted model, with test logging initialized.
pub struct TestContext {
    pub bench: TestBench<ScriptedDut>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            bench: TestBench::new(ScriptedDut::new()),
        }
    }

    /// Set the instruction words served on successive high-clock evaluations.
    pub fn with_script(mut self, script: &[u32]) -> Self {
        self.bench.dut_mut().script = script.to_vec();
        self
    }

    /// Set the value one architectural register reads back as.
    pub fn with_register(mut self, index: usize, value: u32) -> Self {
        self.bench.dut_mut().regs[index] = value;
        self
    }

    /// Convenience accessor for the scripted model.
    pub fn dut(&self) -> &ScriptedDut {
        self.bench.dut()
    }
}

/// A temporary vector directory populated with `.mem`/`.res` pairs.
///
/// The directory and everything in it is deleted on drop.
pub struct VectorDir {
    dir: TempDir,
}

impl VectorDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// The directory path as a vector root, with a trailing separator.
    pub fn root(&self) -> String {
        format!("{}/", self.dir.path().display())
    }

    /// Write a `.mem` program image under the given test name.
    ///
    /// Nested names like `task1/add` create the intermediate directories.
    pub fn write_mem(&self, name: &str, text: &str) {
        self.write(&format!("{name}.mem"), text.as_bytes());
    }

    /// Write a `.res` golden snapshot as raw bytes under the given test name.
    pub fn write_res(&self, name: &str, bytes: &[u8]) {
        self.write(&format!("{name}.res"), bytes);
    }

    /// Write a `.res` golden snapshot in the on-disk layout.
    pub fn write_res_snapshot(&self, name: &str, snap: &RegSnapshot) {
        self.write_res(name, &snap.to_le_bytes());
    }

    fn write(&self, file_name: &str, bytes: &[u8]) {
        let path = self.dir.path().join(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, bytes).unwrap();
    }
}

impl Default for VectorDir {
    fn default() -> Self {
        Self::new()
    }
}
