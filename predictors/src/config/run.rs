use std::{env, fmt::Display, num::NonZeroUsize, path::PathBuf, str::FromStr};

use super::PredictorConfig;
use crate::{Dataset, PredictorErr, Result};

const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::MIN;
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(3);
const DEFAULT_BATCHES: NonZeroUsize = NonZeroUsize::MIN.saturating_add(7);

/// The demo binary's run parameters, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub dataset: Dataset,
    pub epochs: NonZeroUsize,
    pub batch_size: NonZeroUsize,
    pub batches: NonZeroUsize,
    pub predictor: PredictorConfig,
}

impl RunConfig {
    /// Reads `OPTIM`, `DATASET`, `EPOCHS`, `BATCH_SIZE`, `BATCHES`, `SEED`, `HYPERPARAMS` and
    /// `LOG_DIR` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the run parameters from an arbitrary variable lookup, falling back to the
    /// defaults for every missing variable.
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, if set.
    ///
    /// # Returns
    /// The run parameters or `PredictorErr::InvalidConfig` for a value that fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut predictor = PredictorConfig::default();

        if let Some(optimizer) = lookup("OPTIM") {
            predictor.optimizer = optimizer;
        }
        if let Some(path) = lookup("HYPERPARAMS") {
            predictor.hyperparams = PathBuf::from(path);
        }
        if let Some(path) = lookup("LOG_DIR") {
            predictor.log_dir = PathBuf::from(path);
        }
        predictor.seed = parse_var(&lookup, "SEED")?;

        Ok(Self {
            dataset: parse_var(&lookup, "DATASET")?.unwrap_or(Dataset::Mnist),
            epochs: parse_var(&lookup, "EPOCHS")?.unwrap_or(DEFAULT_EPOCHS),
            batch_size: parse_var(&lookup, "BATCH_SIZE")?.unwrap_or(DEFAULT_BATCH_SIZE),
            batches: parse_var(&lookup, "BATCHES")?.unwrap_or(DEFAULT_BATCHES),
            predictor,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| PredictorErr::InvalidConfig(format!("{key}={raw}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = RunConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.dataset, Dataset::Mnist);
        assert_eq!(config.epochs.get(), 1);
        assert_eq!(config.batch_size.get(), 4);
        assert_eq!(config.batches.get(), 8);
        assert_eq!(config.predictor, PredictorConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = RunConfig::from_lookup(lookup(&[
            ("OPTIM", "RMSprop"),
            ("DATASET", "cifar10"),
            ("EPOCHS", "3"),
            ("SEED", "42"),
            ("LOG_DIR", "/tmp/logs"),
        ]))
        .unwrap();

        assert_eq!(config.dataset, Dataset::Cifar10);
        assert_eq!(config.epochs.get(), 3);
        assert_eq!(config.predictor.optimizer, "RMSprop");
        assert_eq!(config.predictor.seed, Some(42));
        assert_eq!(config.predictor.log_dir, PathBuf::from("/tmp/logs"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for vars in [
            [("EPOCHS", "0")],
            [("BATCH_SIZE", "four")],
            [("DATASET", "imagenet")],
            [("SEED", "-1")],
        ] {
            assert!(matches!(
                RunConfig::from_lookup(lookup(&vars)),
                Err(PredictorErr::InvalidConfig(_))
            ));
        }
    }
}
