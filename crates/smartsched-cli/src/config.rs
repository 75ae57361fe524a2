//! `ssched.toml` configuration.
//!
//! ```toml
//! [analysis]
//! condensation_weight = "min"
//! critical_path = "single-pass"
//! default_source = 0
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smartsched_core::graph::{CondensationWeight, CriticalPathStrategy};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "ssched.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SschedConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub condensation_weight: CondensationWeight,
    #[serde(default)]
    pub critical_path: CriticalPathStrategy,
    /// Source used when neither `--source` nor the dataset names one.
    #[serde(default)]
    pub default_source: Option<usize>,
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `ssched.toml` in `search_dir`
/// is used if present, else defaults.
pub fn load_config(explicit: Option<&Path>, search_dir: &Path) -> Result<SschedConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = search_dir.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                debug!("no {CONFIG_FILE_NAME} found; using defaults");
                return Ok(SschedConfig::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str::<SschedConfig>(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(None, dir.path()).expect("defaults");
        assert_eq!(cfg, SschedConfig::default());
    }

    #[test]
    fn discovers_file_in_search_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[analysis]\ncondensation_weight = \"sum\"\ndefault_source = 3\n",
        )
        .expect("write");

        let cfg = load_config(None, dir.path()).expect("parse");
        assert_eq!(cfg.analysis.condensation_weight, CondensationWeight::Sum);
        assert_eq!(cfg.analysis.critical_path, CriticalPathStrategy::AllSources);
        assert_eq!(cfg.analysis.default_source, Some(3));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(Some(&dir.path().join("nope.toml")), dir.path())
            .expect_err("missing explicit config");
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[analysis]\ncritical_path = \"sideways\"\n").expect("write");
        assert!(load_config(Some(&path), dir.path()).is_err());
    }

    #[test]
    fn empty_file_is_default() {
        let cfg: SschedConfig = toml::from_str("").expect("parse");
        assert_eq!(cfg, SschedConfig::default());
    }
}
