use machine_learning::{Parameters, optimization::Optimizer};
use ndarray::{Array2, ArrayView2};

use crate::{Result, batch::Batch};

/// The entry points a training driver calls on a model.
pub trait Module {
    /// Computes the class logits of already flattened features.
    fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>>;

    /// Resolves the optimizer this module trains with.
    fn configure_optimizers(&self) -> Result<Box<dyn Optimizer>>;

    /// Evaluates a training batch, leaving its gradient accumulated in the parameters.
    ///
    /// # Returns
    /// The batch loss.
    fn training_step(&mut self, batch: &Batch, batch_idx: usize) -> Result<f32>;

    /// Evaluates a validation batch.
    fn validation_step(&mut self, batch: &Batch, batch_idx: usize) -> Result<f32>;

    /// Evaluates a test batch.
    fn test_step(&mut self, batch: &Batch, batch_idx: usize) -> Result<f32>;
}

/// Gives a driver access to the state an optimizer updates.
pub trait Parameterized {
    fn parameters_mut(&mut self) -> &mut Parameters;
}
