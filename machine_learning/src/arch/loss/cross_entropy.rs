use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use super::LossFn;
use crate::{MlErr, Result};

/// Multi-class cross-entropy over the softmax of raw logits.
///
/// `y` is expected to hold one-hot rows (see [`one_hot`]).
#[derive(Default, Clone, Copy, Debug)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Returns a new `CrossEntropy`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for CrossEntropy {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        let losses: Vec<f32> = y_pred
            .rows()
            .into_iter()
            .zip(y.rows())
            .map(|(logits, target)| {
                let lse = log_sum_exp(logits);
                logits
                    .iter()
                    .zip(target)
                    .map(|(&z, &t)| t * (lse - z))
                    .sum::<f32>()
            })
            .collect();

        if losses.is_empty() {
            return 0.0;
        }

        losses.iter().sum::<f32>() / losses.len() as f32
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32> {
        let n = y_pred.nrows().max(1) as f32;
        (softmax(y_pred) - &y) / n
    }
}

/// Computes the row-wise softmax of a batch of logits.
pub fn softmax(logits: ArrayView2<f32>) -> Array2<f32> {
    let mut probs = logits.to_owned();

    for mut row in probs.axis_iter_mut(Axis(0)) {
        let max = row.fold(f32::NEG_INFINITY, |m, &z| m.max(z));
        row.mapv_inplace(|z| (z - max).exp());
        let total = row.sum();
        row.mapv_inplace(|p| p / total);
    }

    probs
}

/// Builds the one-hot encoding of a slice of class labels.
///
/// # Returns
/// A `(targets.len(), classes)` matrix or an error if a label is not lower than `classes`.
pub fn one_hot(targets: &[usize], classes: usize) -> Result<Array2<f32>> {
    let mut encoded = Array2::zeros((targets.len(), classes));

    for (i, &target) in targets.iter().enumerate() {
        if target >= classes {
            return Err(MlErr::TargetOutOfRange { target, classes });
        }

        encoded[[i, target]] = 1.;
    }

    Ok(encoded)
}

fn log_sum_exp(logits: ArrayView1<f32>) -> f32 {
    let max = logits.fold(f32::NEG_INFINITY, |m, &z| m.max(z));
    max + logits.iter().map(|&z| (z - max).exp()).sum::<f32>().ln()
}
