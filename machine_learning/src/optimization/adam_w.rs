use super::{Adam, Optimizer, optimizer::check_sizes};
use crate::Result;

/// Adam with decoupled weight decay: parameters are shrunk towards zero before the Adam step.
#[derive(Debug)]
pub struct AdamW {
    adam: Adam,
    weight_decay: f32,
}

impl AdamW {
    /// Creates a new `AdamW` optimizer.
    ///
    /// # Arguments
    /// * `adam` - The underlying Adam optimizer.
    /// * `weight_decay` - The decay coefficient, scaled by the learning rate on every step.
    pub fn new(adam: Adam, weight_decay: f32) -> Self {
        Self { adam, weight_decay }
    }

    /// Default Adam hyperparameters with a weight decay of `1e-2`.
    pub fn with_defaults(len: usize, learning_rate: f32) -> Self {
        Self::new(Adam::with_defaults(len, learning_rate), 1e-2)
    }
}

impl Optimizer for AdamW {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_sizes(grad, params, self.adam.state_len())?;

        let decay = 1. - self.adam.learning_rate() * self.weight_decay;
        params.iter_mut().for_each(|p| *p *= decay);

        self.adam.update_params(grad, params)
    }

    fn learning_rate(&self) -> f32 {
        self.adam.learning_rate()
    }
}
