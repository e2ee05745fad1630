use std::fmt::Debug;

use crate::{MlErr, Result};

/// Defines the strategy for updating model parameters based on calculated gradients.
pub trait Optimizer: Debug {
    /// Updates the provided slice of parameters using the accumulated gradient.
    ///
    /// # Arguments
    /// * `grad` - A reference to the model's gradient.
    /// * `params` - The parameters to update.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad`, `params` or the optimizer's state.
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()>;

    /// Returns the learning rate this optimizer was built with.
    fn learning_rate(&self) -> f32;
}

/// Checks that the gradient, the parameters and the optimizer's state all have `len` values.
pub(super) fn check_sizes(grad: &[f32], params: &[f32], len: usize) -> Result<()> {
    if grad.len() != params.len() {
        return Err(MlErr::SizeMismatch {
            what: "gradient",
            got: grad.len(),
            expected: params.len(),
        });
    }

    if params.len() != len {
        return Err(MlErr::SizeMismatch {
            what: "optimizer state",
            got: params.len(),
            expected: len,
        });
    }

    Ok(())
}
