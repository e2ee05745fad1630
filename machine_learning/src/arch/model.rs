use ndarray::{Array2, ArrayView2};

use crate::{Result, arch::loss::LossFn};

pub trait Model {
    /// Returns the amount of parameters in the model.
    fn size(&self) -> usize;

    /// Makes a forward pass through the model. This is a pure function of the parameters
    /// and the input.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `x` - The input data, one example per row.
    ///
    /// # Returns
    /// The model's output for the given input.
    fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>>;

    /// Computes the gradient of the loss function with respect to the parameters of the model
    /// over a single batch. **`grads` is accumulated into**, not overwritten.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `grads` - The buffer the gradient is added to.
    /// * `x` - The input data.
    /// * `loss_fn` - The loss function.
    /// * `y` - The expected output.
    ///
    /// # Returns
    /// The batch loss and the model's output.
    fn backprop<L>(
        &self,
        params: &[f32],
        grads: &mut [f32],
        x: ArrayView2<f32>,
        loss_fn: &L,
        y: ArrayView2<f32>,
    ) -> Result<(f32, Array2<f32>)>
    where
        L: LossFn;
}
