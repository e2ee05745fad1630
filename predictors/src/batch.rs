use machine_learning::{MlErr, arch::CLASSES};
use ndarray::{Array2, Array4, Axis};
use rand::Rng;
use serde::Deserialize;

use crate::{Dataset, Result};

/// How the channel dimension of an image batch is averaged away.
///
/// Both procedures compute the same mean; they are kept apart so runs can reproduce the
/// exact arithmetic of historical logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelMean {
    /// `mean_axis` over the channels.
    Axis,
    /// `sum_axis` over the channels divided by their count.
    SumDivide,
}

/// A batch of images, `(N, C, H, W)`, and their target classes.
#[derive(Debug, Clone)]
pub struct Batch {
    inputs: Array4<f32>,
    targets: Vec<usize>,
}

impl Batch {
    /// Creates a new `Batch`.
    ///
    /// # Arguments
    /// * `inputs` - The images, shaped `(N, C, H, W)`.
    /// * `targets` - One class per image.
    ///
    /// # Returns
    /// The batch, `MlErr::EmptyBatch` if it holds no images or `MlErr::SizeMismatch` if
    /// the amount of targets doesn't match.
    pub fn new(inputs: Array4<f32>, targets: Vec<usize>) -> Result<Self> {
        let n = inputs.len_of(Axis(0));

        if n == 0 {
            return Err(MlErr::EmptyBatch.into());
        }
        if targets.len() != n {
            return Err(MlErr::SizeMismatch {
                what: "batch targets",
                got: targets.len(),
                expected: n,
            }
            .into());
        }

        Ok(Self { inputs, targets })
    }

    /// Samples a batch of uniform noise images with uniform target classes.
    ///
    /// # Arguments
    /// * `rng` - The source of randomness.
    /// * `dataset` - Dictates the image shape.
    /// * `size` - The amount of images.
    pub fn synthetic<R: Rng>(rng: &mut R, dataset: Dataset, size: usize) -> Result<Self> {
        let side = dataset.image_side();
        let shape = (size, dataset.channels(), side, side);

        let inputs = Array4::from_shape_fn(shape, |_| rng.random::<f32>());
        let targets = (0..size).map(|_| rng.random_range(0..CLASSES)).collect();

        Self::new(inputs, targets)
    }

    pub fn inputs(&self) -> &Array4<f32> {
        &self.inputs
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Averages the channels away and flattens every image into a row of `dim` features.
    ///
    /// # Arguments
    /// * `mean` - The channel averaging procedure.
    /// * `dim` - The amount of features the model expects.
    ///
    /// # Returns
    /// The `(N, H * W)` features or `MlErr::SizeMismatch` if `H * W != dim`.
    pub fn features(&self, mean: ChannelMean, dim: usize) -> Result<Array2<f32>> {
        let (n, channels, h, w) = self.inputs.dim();

        if h * w != dim {
            return Err(MlErr::SizeMismatch {
                what: "input features",
                got: h * w,
                expected: dim,
            }
            .into());
        }

        let reduced = match mean {
            ChannelMean::Axis => self.inputs.mean_axis(Axis(1)).ok_or(MlErr::EmptyBatch)?,
            ChannelMean::SumDivide if channels == 0 => return Err(MlErr::EmptyBatch.into()),
            ChannelMean::SumDivide => self.inputs.sum_axis(Axis(1)) / channels as f32,
        };

        let features = reduced
            .into_shape_with_order((n, dim))
            .map_err(|_| MlErr::SizeMismatch {
                what: "input features",
                got: h * w,
                expected: dim,
            })?;

        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn ramp(shape: (usize, usize, usize, usize)) -> Array4<f32> {
        let (n, c, h, w) = shape;
        Array::range(0., (n * c * h * w) as f32, 1.)
            .into_shape_with_order(shape)
            .unwrap()
    }

    #[test]
    fn rejects_mismatched_targets() {
        assert!(Batch::new(ramp((2, 1, 2, 2)), vec![0]).is_err());
        assert!(Batch::new(ramp((0, 1, 2, 2)), vec![]).is_err());
    }

    #[test]
    fn channel_means_agree() {
        let batch = Batch::new(ramp((2, 3, 2, 2)), vec![0, 1]).unwrap();

        let axis = batch.features(ChannelMean::Axis, 4).unwrap();
        let sum_divide = batch.features(ChannelMean::SumDivide, 4).unwrap();

        assert_eq!(axis.dim(), (2, 4));
        // The first pixel of the first image averages 0, 4 and 8.
        assert_eq!(axis[[0, 0]], 4.);
        for (a, b) in axis.iter().zip(sum_divide.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let batch = Batch::new(ramp((1, 1, 2, 2)), vec![3]).unwrap();

        assert!(batch.features(ChannelMean::Axis, 784).is_err());
    }

    #[test]
    fn synthetic_batches_have_the_dataset_shape() {
        let mut rng = StdRng::seed_from_u64(0);
        let batch = Batch::synthetic(&mut rng, Dataset::Cifar10, 5).unwrap();

        assert_eq!(batch.inputs().dim(), (5, 3, 32, 32));
        assert!(batch.targets().iter().all(|&t| t < CLASSES));
        assert_eq!(batch.features(ChannelMean::Axis, 1024).unwrap().dim(), (5, 1024));
    }
}
