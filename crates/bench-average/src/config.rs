//! Configuration for a batch averaging run
//!
//! This module provides TOML-based configuration describing where the
//! measurement files live, which instances to aggregate, where the summary
//! goes, and whether outliers are removed before averaging. Every field has a
//! default, so an empty file reproduces the stock TSP/ATSP batch.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::stats::DEFAULT_IQR_FACTOR;

/// Instances aggregated when no list is configured, grouped by the error
/// level the solver reached on them.
pub const DEFAULT_INSTANCES: &[&str] = &[
    // error = 0.0
    "burma14.tsp",
    "gr17.tsp",
    "gr21.tsp",
    "gr24.tsp",
    "bays29.tsp",
    "ftv33.atsp",
    "ftv44.atsp",
    "ft53.atsp",
    "ftv70.atsp",
    // error <= 0.5
    "ch150.tsp",
    "ftv170.atsp",
    "gr202.tsp",
    "rbg323.atsp",
    // error <= 1.5
    "pcb442.tsp",
    "rbg443.atsp",
    "gr666.tsp",
    "pr1002.tsp",
    "pr2392.tsp",
];

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding one measurement file per instance
    pub results_dir: PathBuf,
    /// Summary CSV to (over)write
    pub output_path: PathBuf,
    /// Extension appended to an instance name to get its file name
    pub file_extension: String,
    /// Decimal places kept in the averages
    pub decimals: u32,
    /// Abort the whole run on the first failing instance
    pub fail_fast: bool,
    /// Instances to aggregate, in output order
    pub instances: Vec<String>,
    /// Outlier removal settings
    pub outliers: OutlierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("./results"),
            output_path: PathBuf::from("./results_average.csv"),
            file_extension: "csv".to_string(),
            decimals: 2,
            fail_fast: false,
            instances: DEFAULT_INSTANCES.iter().map(|s| s.to_string()).collect(),
            outliers: OutlierConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - The resulting configuration fails [`Config::validate`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bench_average::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_file("bench-average.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use bench_average::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     results_dir = "out"
    ///     instances = ["burma14.tsp"]
    /// "#;
    /// let config = Config::from_str(toml)?;
    /// assert_eq!(config.instances, vec!["burma14.tsp"]);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot express as types
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.instances.is_empty() {
            bail!("Instance list is empty");
        }
        if let Some(blank) = self.instances.iter().position(|i| i.trim().is_empty()) {
            bail!("Instance #{} has an empty name", blank + 1);
        }
        if !self.outliers.iqr_factor.is_finite() || self.outliers.iqr_factor < 0.0 {
            bail!(
                "iqr_factor must be a non-negative number, got {}",
                self.outliers.iqr_factor
            );
        }
        if self.decimals > 10 {
            bail!("decimals must be at most 10, got {}", self.decimals);
        }
        Ok(())
    }

    /// Measurement file name for `instance`, e.g. `burma14.tsp.csv`
    pub fn file_name_for(&self, instance: &str) -> String {
        if self.file_extension.is_empty() {
            instance.to_string()
        } else {
            format!("{}.{}", instance, self.file_extension.trim_start_matches('.'))
        }
    }

    /// Full path of the measurement file for `instance`
    pub fn path_for(&self, instance: &str) -> PathBuf {
        self.results_dir.join(self.file_name_for(instance))
    }
}

/// Outlier removal settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutlierConfig {
    /// Filter samples before averaging
    pub enabled: bool,
    /// Which series the filter applies to
    pub target: OutlierTarget,
    /// IQR multiplier for the fences
    pub iqr_factor: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target: OutlierTarget::default(),
            iqr_factor: DEFAULT_IQR_FACTOR,
        }
    }
}

impl OutlierConfig {
    /// Whether runtime samples are filtered
    pub fn filters_runtime(&self) -> bool {
        self.enabled && matches!(self.target, OutlierTarget::Runtime | OutlierTarget::Both)
    }

    /// Whether error samples are filtered
    pub fn filters_error(&self) -> bool {
        self.enabled && matches!(self.target, OutlierTarget::Error | OutlierTarget::Both)
    }
}

/// Sample series the outlier filter is applied to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutlierTarget {
    /// Runtime samples only
    #[default]
    Runtime,
    /// Error samples only
    Error,
    /// Both series, each with its own fences
    Both,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.results_dir, PathBuf::from("./results"));
        assert_eq!(config.output_path, PathBuf::from("./results_average.csv"));
        assert_eq!(config.decimals, 2);
        assert!(!config.fail_fast);
        assert!(!config.outliers.enabled);
        assert_eq!(config.instances.len(), 18);
        assert_eq!(config.instances[0], "burma14.tsp");
        assert_eq!(config.instances[17], "pr2392.tsp");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            results_dir = "/data/results"
            output_path = "summary.csv"
            file_extension = "txt"
            decimals = 3
            fail_fast = true
            instances = ["gr17.tsp", "ftv33.atsp"]

            [outliers]
            enabled = true
            target = "both"
            iqr_factor = 3.0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("/data/results"));
        assert_eq!(config.output_path, PathBuf::from("summary.csv"));
        assert_eq!(config.file_extension, "txt");
        assert_eq!(config.decimals, 3);
        assert!(config.fail_fast);
        assert_eq!(config.instances, vec!["gr17.tsp", "ftv33.atsp"]);
        assert!(config.outliers.enabled);
        assert_eq!(config.outliers.target, OutlierTarget::Both);
        assert_eq!(config.outliers.iqr_factor, 3.0);
    }

    #[test]
    fn test_outlier_defaults() {
        let config = Config::from_str("[outliers]\nenabled = true\n").unwrap();

        assert_eq!(config.outliers.target, OutlierTarget::Runtime);
        assert_eq!(config.outliers.iqr_factor, 1.5);
        assert!(config.outliers.filters_runtime());
        assert!(!config.outliers.filters_error());
    }

    #[test]
    fn test_disabled_filter_applies_to_nothing() {
        let outliers = OutlierConfig {
            enabled: false,
            target: OutlierTarget::Both,
            iqr_factor: 1.5,
        };

        assert!(!outliers.filters_runtime());
        assert!(!outliers.filters_error());
    }

    #[test]
    fn test_reject_empty_instance_list() {
        let err = Config::from_str("instances = []").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_reject_negative_iqr_factor() {
        assert!(Config::from_str("[outliers]\niqr_factor = -1.0\n").is_err());
    }

    #[test]
    fn test_reject_unknown_target() {
        assert!(Config::from_str("[outliers]\ntarget = \"vertices\"\n").is_err());
    }

    #[test]
    fn test_file_name_for_instance() {
        let mut config = Config::default();
        assert_eq!(config.file_name_for("burma14.tsp"), "burma14.tsp.csv");
        assert_eq!(
            config.path_for("ftv33.atsp"),
            PathBuf::from("./results").join("ftv33.atsp.csv")
        );

        config.file_extension = ".dat".to_string();
        assert_eq!(config.file_name_for("gr17.tsp"), "gr17.tsp.dat");

        config.file_extension.clear();
        assert_eq!(config.file_name_for("gr17.tsp"), "gr17.tsp");
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = Config::from_str(include_str!("../../../bench-average.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file("/nonexistent/bench-average.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
