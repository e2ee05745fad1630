use std::path::Path;

use log::info;
use machine_learning::optimization::Optimizer;

use super::{OptimizerArgs, OptimizerRegistry};
use crate::{Result, config::HyperParams};

/// Turns an optimizer name into a ready optimizer, with the learning rate configured for that
/// name in the hyperparameters file.
#[derive(Debug, Clone, Default)]
pub struct OptimizerResolver {
    registry: OptimizerRegistry,
}

impl OptimizerResolver {
    pub fn new(registry: OptimizerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &OptimizerRegistry {
        &self.registry
    }

    /// Resolves the optimizer called `name`.
    ///
    /// # Arguments
    /// * `name` - The optimizer to build, also the key of its rate in the file.
    /// * `config_path` - The hyperparameters file, read on every call.
    /// * `num_params` - The length of the parameter buffer to optimize.
    ///
    /// # Returns
    /// The optimizer, or the first of `ConfigParse`, `UnknownOptimizerRate` and
    /// `UnknownOptimizerName` that applies. Nothing is built unless a rate is found.
    pub fn resolve<P: AsRef<Path>>(
        &self,
        name: &str,
        config_path: P,
        num_params: usize,
    ) -> Result<Box<dyn Optimizer>> {
        let learning_rate = HyperParams::load(config_path)?.learning_rate(name)? as f32;
        let optimizer = self.registry.build(
            name,
            OptimizerArgs {
                learning_rate,
                num_params,
            },
        )?;

        info!(optimizer = name, learning_rate = learning_rate; "resolved optimizer");
        Ok(optimizer)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::PredictorErr;

    fn config(raw: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), raw).unwrap();
        file
    }

    #[test]
    fn configured_rates_round_trip() {
        let file = config(
            r#"{"lr": {"SGD": 0.01, "Adam": 0.001, "AdamW": 0.0005, "Adamax": 0.002,
                       "RMSprop": 0.0001, "Adagrad": 0.05, "Adadelta": 1.0, "Adabelief": 0.001}}"#,
        );
        let resolver = OptimizerResolver::default();
        let params = HyperParams::load(file.path()).unwrap();

        for name in resolver.registry().names() {
            let optimizer = resolver.resolve(name, file.path(), 10).unwrap();
            let expected = params.learning_rate(name).unwrap() as f32;
            assert_eq!(optimizer.learning_rate(), expected, "{name}");
        }
    }

    #[test]
    fn the_rate_is_looked_up_before_the_name() {
        let file = config(r#"{"lr": {"Adam": 0.001}}"#);
        let resolver = OptimizerResolver::default();

        assert!(matches!(
            resolver.resolve("Unknown", file.path(), 10),
            Err(PredictorErr::UnknownOptimizerRate { .. })
        ));
    }

    #[test]
    fn configured_but_unregistered_names_are_rejected() {
        let file = config(r#"{"lr": {"LBFGS": 1.0}}"#);
        let resolver = OptimizerResolver::default();

        assert!(matches!(
            resolver.resolve("LBFGS", file.path(), 10),
            Err(PredictorErr::UnknownOptimizerName { .. })
        ));
    }

    #[test]
    fn missing_config_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = OptimizerResolver::default();

        assert!(matches!(
            resolver.resolve("Adam", dir.path().join("hyperparams.txt"), 10),
            Err(PredictorErr::ConfigParse { .. })
        ));
    }
}
