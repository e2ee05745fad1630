use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{Dataset, Metric, Phase, PredictorErr, Result};

/// Magnitude from which floats print in exponent notation.
const EXPONENT_THRESHOLD: f64 = 1e16;

/// The append-only text logs of one (optimizer, dataset) pair, one file per phase and metric.
#[derive(Debug, Clone)]
pub struct PhaseLogs {
    dir: PathBuf,
    optimizer: String,
    dataset: Dataset,
}

impl PhaseLogs {
    /// Creates a new `PhaseLogs`.
    ///
    /// # Arguments
    /// * `dir` - The directory the files live in. It is never created.
    /// * `optimizer_name` - The optimizer the files are named after, lowercased.
    /// * `dataset` - The dataset the files are named after.
    pub fn new<P: Into<PathBuf>>(dir: P, optimizer_name: &str, dataset: Dataset) -> Self {
        Self {
            dir: dir.into(),
            optimizer: optimizer_name.to_lowercase(),
            dataset,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file `metric` is appended to during `phase`,
    /// e.g. `manual_logs/adam_train_loss_mnist.txt`.
    pub fn path(&self, phase: Phase, metric: Metric) -> PathBuf {
        self.dir.join(format!(
            "{}_{phase}_{metric}_{}.txt",
            self.optimizer, self.dataset
        ))
    }

    /// Appends `value` as one newline terminated line.
    ///
    /// The file is opened, written and closed within this call.
    ///
    /// # Returns
    /// `PredictorErr::LogWrite` if the file can't be opened or written.
    pub fn append(&self, phase: Phase, metric: Metric, value: f32) -> Result<()> {
        let path = self.path(phase, metric);
        let line = format!("{}\n", format_metric(value));

        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|source| PredictorErr::LogWrite { path, source })
    }
}

/// Rounds `value` to 4 decimals and prints it the way a Python float prints:
/// `1.0`, `0.25`, `2.3026`, `-0.0`, `nan`, `inf`.
pub fn format_metric(value: f32) -> String {
    let value = f64::from(value);

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0. { "inf" } else { "-inf" }.to_string();
    }

    let rounded: f64 = format!("{value:.4}").parse().unwrap_or(value);

    if rounded.abs() >= EXPONENT_THRESHOLD {
        let repr = format!("{rounded:e}");
        return match repr.split_once('e') {
            Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
            Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
            None => repr,
        };
    }

    if rounded.fract() == 0. {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}
