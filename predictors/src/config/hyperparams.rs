use std::{collections::HashMap, fs, path::Path, str::FromStr};

use serde::Deserialize;

use crate::{PredictorErr, Result};

/// The contents of the hyperparameters file: a mapping with an `lr` entry that maps every
/// optimizer name to its learning rate, e.g. `{'lr': {'Adam': 0.001, 'SGD': .01}}`.
///
/// The file is read as JSON5, so single or double quoted keys, trailing commas and bare-dot
/// floats are all accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HyperParams {
    lr: HashMap<String, f64>,
}

impl HyperParams {
    /// Reads and parses the hyperparameters file at `path`.
    ///
    /// The file is read from storage on every call.
    ///
    /// # Arguments
    /// * `path` - The location of the hyperparameters file.
    ///
    /// # Returns
    /// The parsed hyperparameters or `PredictorErr::ConfigParse` if the file is missing,
    /// unreadable or malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_parse = |reason: String| PredictorErr::ConfigParse {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| config_parse(e.to_string()))?;
        raw.parse().map_err(|e: json5::Error| config_parse(e.to_string()))
    }

    /// Looks up the learning rate configured for `name`.
    ///
    /// # Returns
    /// The rate or `PredictorErr::UnknownOptimizerRate` if the name has no entry.
    pub fn learning_rate(&self, name: &str) -> Result<f64> {
        self.lr
            .get(name)
            .copied()
            .ok_or_else(|| PredictorErr::UnknownOptimizerRate {
                name: name.to_string(),
            })
    }

    /// The optimizer names that have a configured rate.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lr.keys().map(String::as_str)
    }
}

impl FromStr for HyperParams {
    type Err = json5::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        json5::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_the_rate_mapping() {
        let params: HyperParams = r#"{"lr": {"Adam": 0.001, "SGD": 0.05}}"#.parse().unwrap();

        assert_eq!(params.learning_rate("Adam").unwrap(), 0.001);
        assert_eq!(params.learning_rate("SGD").unwrap(), 0.05);
    }

    #[test]
    fn parses_literal_mappings() {
        for raw in [
            "{'lr': {'Adam': .001,},}",
            "{'lr': {'Adam': 0.001}}",
            r#"{"lr": {"Adam": 1e-3,}}"#,
        ] {
            let params: HyperParams = raw.parse().unwrap();
            assert_eq!(params.learning_rate("Adam").unwrap(), 0.001, "{raw}");
        }
    }

    #[test]
    fn load_accepts_single_quotes_and_trailing_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hyperparams.txt");
        fs::write(&path, "{'lr': {'Adam': .001, 'SGD': 0.01,},}\n").unwrap();

        let params = HyperParams::load(&path).unwrap();

        assert_eq!(params.learning_rate("Adam").unwrap(), 0.001);
        assert_eq!(params.learning_rate("SGD").unwrap(), 0.01);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let params: HyperParams = r#"{"lr": {"Adam": 0.001}, "momentum": 0.9, "batch_size": 64}"#
            .parse()
            .unwrap();

        assert_eq!(params.names().collect::<Vec<_>>(), ["Adam"]);
    }

    #[test]
    fn missing_name_is_an_unknown_rate() {
        let params: HyperParams = r#"{"lr": {"Adam": 0.001}}"#.parse().unwrap();

        assert!(matches!(
            params.learning_rate("Unknown"),
            Err(PredictorErr::UnknownOptimizerRate { name }) if name == "Unknown"
        ));
    }

    #[test]
    fn load_reports_the_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("hyperparams.txt");

        assert!(matches!(
            HyperParams::load(&missing),
            Err(PredictorErr::ConfigParse { path, .. }) if path == missing
        ));

        let malformed = dir.path().join("malformed.txt");
        let mut file = fs::File::create(&malformed).unwrap();
        writeln!(file, "{{'lr': {{'Adam': 0.001").unwrap();

        assert!(matches!(
            HyperParams::load(&malformed),
            Err(PredictorErr::ConfigParse { .. })
        ));
    }

    #[test]
    fn load_rereads_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hyperparams.txt");

        fs::write(&path, r#"{"lr": {"Adam": 0.001}}"#).unwrap();
        assert_eq!(HyperParams::load(&path).unwrap().learning_rate("Adam").unwrap(), 0.001);

        fs::write(&path, r#"{"lr": {"Adam": 0.002}}"#).unwrap();
        assert_eq!(HyperParams::load(&path).unwrap().learning_rate("Adam").unwrap(), 0.002);
    }
}
