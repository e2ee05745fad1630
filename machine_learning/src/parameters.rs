use std::{cell::RefCell, rc::Rc};

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    MlErr, Result,
    arch::{Model, Sequential},
    initialization::{ChainedParamGen, ParamGen, RandParamGen},
    optimization::Optimizer,
};

/// The trainable state of a model: its flat parameter buffer and the gradient buffer of the
/// same length that backprop accumulates into.
#[derive(Debug, Clone)]
pub struct Parameters {
    values: Vec<f32>,
    grads: Vec<f32>,
}

impl Parameters {
    /// Creates a new `Parameters` from existing values, with a zeroed gradient.
    pub fn new(values: Vec<f32>) -> Self {
        let grads = vec![0.; values.len()];
        Self { values, grads }
    }

    /// Initializes the parameters of `model`, layer by layer, with the fan-in uniform
    /// distribution.
    ///
    /// # Arguments
    /// * `model` - The model the parameters are generated for.
    /// * `seed` - A seed for reproducible initialization, the OS entropy is used otherwise.
    ///
    /// # Returns
    /// The initialized parameters or an error if a layer has no inputs.
    pub fn init(model: &Sequential, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let rng = Rc::new(RefCell::new(rng));

        let param_gens = model
            .layers()
            .iter()
            .map(|layer| {
                let param_gen =
                    RandParamGen::fan_in_uniform(rng.clone(), layer.size(), layer.fan_in())?;
                Ok(Box::new(param_gen) as Box<dyn ParamGen>)
            })
            .collect::<Result<Vec<_>>>()?;

        let size = model.size();
        let values = ChainedParamGen::new(param_gens)
            .sample(size)
            .unwrap_or_default();

        if values.len() != size {
            return Err(MlErr::SizeMismatch {
                what: "initialized parameters",
                got: values.len(),
                expected: size,
            });
        }

        Ok(Self::new(values))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn grads(&self) -> &[f32] {
        &self.grads
    }

    /// Borrows the parameters immutably and the gradient mutably, as backprop needs them.
    pub fn values_and_grads_mut(&mut self) -> (&[f32], &mut [f32]) {
        (&self.values, &mut self.grads)
    }

    /// Resets the accumulated gradient.
    pub fn zero_grad(&mut self) {
        self.grads.fill(0.);
    }

    /// Updates the parameters with the accumulated gradient.
    ///
    /// # Arguments
    /// * `optimizer` - The optimizer that dictates how to update the parameters.
    pub fn step(&mut self, optimizer: &mut dyn Optimizer) -> Result<()> {
        optimizer.update_params(&self.grads, &mut self.values)
    }
}
