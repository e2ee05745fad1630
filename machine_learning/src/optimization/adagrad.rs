use super::{Optimizer, optimizer::check_sizes};
use crate::Result;

/// Scales every step by the accumulated sum of squared gradients.
#[derive(Debug)]
pub struct Adagrad {
    learning_rate: f32,
    epsilon: f32,
    sum: Box<[f32]>,
}

impl Adagrad {
    /// Creates a new `Adagrad` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `epsilon` - Added to the denominator for numerical stability.
    pub fn new(len: usize, learning_rate: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            epsilon,
            sum: vec![0.; len].into_boxed_slice(),
        }
    }

    pub fn with_defaults(len: usize, learning_rate: f32) -> Self {
        Self::new(len, learning_rate, 1e-10)
    }
}

impl Optimizer for Adagrad {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_sizes(grad, params, self.sum.len())?;

        let lr = self.learning_rate;
        let eps = self.epsilon;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.sum.iter_mut())
            .for_each(|((p, g), sum)| {
                *sum += g.powi(2);
                *p -= lr * g / (sum.sqrt() + eps);
            });

        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_shrink_as_gradients_accumulate() {
        let mut optimizer = Adagrad::with_defaults(1, 0.1);
        let mut params = [0.];

        optimizer.update_params(&[1.], &mut params).unwrap();
        let first = -params[0];
        optimizer.update_params(&[1.], &mut params).unwrap();
        let second = -params[0] - first;

        assert!((first - 0.1).abs() < 1e-6);
        assert!(second < first);
    }
}
