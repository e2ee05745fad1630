use std::path::PathBuf;

use serde::Deserialize;

use crate::PhaseQuirks;

const DEFAULT_OPTIMIZER: &str = "Adam";
const DEFAULT_HYPERPARAMS: &str = "hyperparams.txt";
const DEFAULT_LOG_DIR: &str = "manual_logs";

/// How a predictor is built.
///
/// Only `optimizer` is visible to the driver; the paths and the seed let tests and the
/// demo binary relocate the files a predictor reads and writes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub optimizer: String,
    pub hyperparams: PathBuf,
    pub log_dir: PathBuf,
    pub seed: Option<u64>,
    /// Per-dataset historical behavior when `None`.
    pub quirks: Option<PhaseQuirks>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            optimizer: DEFAULT_OPTIMIZER.to_string(),
            hyperparams: PathBuf::from(DEFAULT_HYPERPARAMS),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            seed: None,
            quirks: None,
        }
    }
}

impl PredictorConfig {
    /// Creates the default configuration for the optimizer called `optimizer`.
    pub fn new<S: Into<String>>(optimizer: S) -> Self {
        Self {
            optimizer: optimizer.into(),
            ..Default::default()
        }
    }
}
