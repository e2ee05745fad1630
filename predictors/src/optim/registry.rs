use machine_learning::optimization::{
    AdaBelief, Adadelta, Adagrad, Adam, AdamW, Adamax, GradientDescent, Optimizer, RmsProp,
};

use crate::{PredictorErr, Result};

/// What every optimizer is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerArgs {
    pub learning_rate: f32,
    /// The length of the parameter buffer the optimizer will update.
    pub num_params: usize,
}

/// Builds an optimizer from its arguments.
pub type OptimizerFactory = fn(OptimizerArgs) -> Box<dyn Optimizer>;

/// A closed, ordered mapping from optimizer names to their factories.
#[derive(Debug, Clone)]
pub struct OptimizerRegistry {
    entries: Vec<(&'static str, OptimizerFactory)>,
}

/// Every optimizer of the `machine_learning` crate under its conventional name.
const DEFAULT_ENTRIES: [(&str, OptimizerFactory); 8] = [
    ("SGD", sgd),
    ("Adam", adam),
    ("AdamW", adam_w),
    ("Adamax", adamax),
    ("RMSprop", rms_prop),
    ("Adagrad", adagrad),
    ("Adadelta", adadelta),
    ("Adabelief", ada_belief),
];

fn sgd(args: OptimizerArgs) -> Box<dyn Optimizer> {
    Box::new(GradientDescent::new(args.learning_rate))
}

fn adam(args: OptimizerArgs) -> Box<dyn Optimizer> {
    Box::new(Adam::with_defaults(args.num_params, args.learning_rate))
}

fn adam_w(args: OptimizerArgs) -> Box<dyn Optimizer> {
    Box::new(AdamW::with_defaults(args.num_params, args.learning_rate))
}

fn adamax(args: OptimizerArgs) -> Box<dyn Optimizer> {
    Box::new(Adamax::with_defaults(args.num_params, args.learning_rate))
}

fn rms_prop(args: OptimizerArgs) -> Box<dyn Optimizer> {
    Box::new(RmsProp::with_defaults(args.num_params, args.learning_rate))
}

fn adagrad(args: OptimizerArgs) -> Box<dyn Optimizer> {
    Box::new(Adagrad::with_defaults(args.num_params, args.learning_rate))
}

fn adadelta(args: OptimizerArgs) -> Box<dyn Optimizer> {
    Box::new(Adadelta::with_defaults(args.num_params, args.learning_rate))
}

fn ada_belief(args: OptimizerArgs) -> Box<dyn Optimizer> {
    Box::new(AdaBelief::with_defaults(args.num_params, args.learning_rate))
}

impl Default for OptimizerRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES.to_vec())
    }
}

impl OptimizerRegistry {
    /// Creates a registry out of `(name, factory)` entries. Later duplicates are unreachable.
    pub fn new(entries: Vec<(&'static str, OptimizerFactory)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<OptimizerFactory> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|&(_, factory)| factory)
    }

    /// Builds the optimizer registered as `name`.
    ///
    /// # Returns
    /// The optimizer or `PredictorErr::UnknownOptimizerName` if nothing is registered as `name`.
    pub fn build(&self, name: &str, args: OptimizerArgs) -> Result<Box<dyn Optimizer>> {
        let factory = self
            .get(name)
            .ok_or_else(|| PredictorErr::UnknownOptimizerName {
                name: name.to_string(),
            })?;

        Ok(factory(args))
    }

    /// The registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names() {
        let registry = OptimizerRegistry::default();

        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            [
                "SGD",
                "Adam",
                "AdamW",
                "Adamax",
                "RMSprop",
                "Adagrad",
                "Adadelta",
                "Adabelief"
            ]
        );
    }

    #[test]
    fn every_entry_keeps_the_rate_and_size() {
        let registry = OptimizerRegistry::default();
        let args = OptimizerArgs {
            learning_rate: 0.003,
            num_params: 3,
        };

        for name in registry.names() {
            let mut optimizer = registry.build(name, args).unwrap();
            assert_eq!(optimizer.learning_rate(), 0.003, "{name}");

            let mut params = [1., 1., 1.];
            optimizer.update_params(&[0.5, -0.5, 0.], &mut params).unwrap();
            assert!(params[0] < 1., "{name} did not descend");
            assert!(params[1] > 1., "{name} did not descend");
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let registry = OptimizerRegistry::default();
        let args = OptimizerArgs {
            learning_rate: 0.1,
            num_params: 1,
        };

        assert!(matches!(
            registry.build("adam", args),
            Err(PredictorErr::UnknownOptimizerName { name }) if name == "adam"
        ));
    }
}
