use ndarray::{Array2, ArrayView2};

use super::{Model, activations::ActFn, layers::Layer, loss::LossFn};
use crate::{MlErr, Result};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
#[derive(Clone, Debug)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Returns the layers of the model, from input to output.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn check_len(&self, what: &'static str, got: usize) -> Result<()> {
        let expected = self.size();

        if got != expected {
            return Err(MlErr::SizeMismatch {
                what,
                got,
                expected,
            });
        }

        Ok(())
    }

    /// The `(offset, size)` of every layer's slice in the flat parameter buffer.
    fn slices(&self) -> Vec<(usize, usize)> {
        let mut offset = 0;

        self.layers
            .iter()
            .map(|layer| {
                let size = layer.size();
                let slice = (offset, size);
                offset += size;
                slice
            })
            .collect()
    }
}

impl Model for Sequential {
    fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.check_len("model parameters", params.len())?;

        let mut a = x.to_owned();

        for (layer, (offset, size)) in self.layers.iter().zip(self.slices()) {
            (_, a) = layer.forward(&params[offset..offset + size], a.view())?;
        }

        Ok(a)
    }

    fn backprop<L>(
        &self,
        params: &[f32],
        grads: &mut [f32],
        x: ArrayView2<f32>,
        loss_fn: &L,
        y: ArrayView2<f32>,
    ) -> Result<(f32, Array2<f32>)>
    where
        L: LossFn,
    {
        self.check_len("model parameters", params.len())?;
        self.check_len("model gradient", grads.len())?;

        let slices = self.slices();
        let nlayers = self.layers.len();
        let mut inputs = Vec::with_capacity(nlayers);
        let mut sums = Vec::with_capacity(nlayers);
        let mut a = x.to_owned();

        for (layer, &(offset, size)) in self.layers.iter().zip(&slices) {
            let (z, next) = layer.forward(&params[offset..offset + size], a.view())?;
            inputs.push(a);
            sums.push(z);
            a = next;
        }

        if a.dim() != y.dim() {
            return Err(MlErr::SizeMismatch {
                what: "expected output",
                got: y.len(),
                expected: a.len(),
            });
        }

        let loss = loss_fn.loss(a.view(), y);
        let mut d = loss_fn.loss_prime(a.view(), y);

        for (i, layer) in self.layers.iter().enumerate().rev() {
            let (offset, size) = slices[i];
            let range = offset..offset + size;
            d = layer.backward(
                &params[range.clone()],
                &mut grads[range],
                inputs[i].view(),
                sums[i].view(),
                d,
            )?;
        }

        Ok((loss, a))
    }
}

/// Builds the classifier stack shared by every image predictor:
/// `input_dim -> 128 -> 64 -> 32 -> 10`, with a ReLU between the dense layers.
pub fn feed_forward(input_dim: usize) -> Sequential {
    Sequential::new([
        Layer::dense((input_dim, 128), Some(ActFn::relu())),
        Layer::dense((128, 64), Some(ActFn::relu())),
        Layer::dense((64, 32), Some(ActFn::relu())),
        Layer::dense((32, super::CLASSES), None),
    ])
}
