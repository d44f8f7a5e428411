//! Fixture helpers for building results directories

use std::fs;
use std::path::{Path, PathBuf};

use bench_average::Config;
use tempfile::TempDir;

pub const MEASUREMENT_HEADER: &str = "run,number of vertices,time [ns],error [%]";

/// Temporary results directory plus an output path inside it
pub struct ResultsDir {
    pub dir: TempDir,
}

impl ResultsDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("results_average.csv")
    }

    /// Write `{instance}.csv` with the standard header and the given
    /// `(vertices, runtime, error)` rows.
    pub fn write_instance(&self, instance: &str, rows: &[(usize, u64, f64)]) {
        let mut content = String::from(MEASUREMENT_HEADER);
        content.push('\n');
        for (i, (vertices, runtime, error)) in rows.iter().enumerate() {
            content.push_str(&format!("{},{},{},{}\n", i, vertices, runtime, error));
        }
        self.write_raw(instance, &content);
    }

    /// Write `{instance}.csv` verbatim
    pub fn write_raw(&self, instance: &str, content: &str) {
        fs::write(self.dir.path().join(format!("{}.csv", instance)), content)
            .expect("write measurement file");
    }

    /// Config pointing at this directory for the given instances
    pub fn config(&self, instances: &[&str]) -> Config {
        Config {
            results_dir: self.path().to_path_buf(),
            output_path: self.output_path(),
            instances: instances.iter().map(|s| s.to_string()).collect(),
            ..Config::default()
        }
    }
}
