use super::{Optimizer, optimizer::check_sizes};
use crate::Result;

/// Scales every step by a running average of the squared gradient.
#[derive(Debug)]
pub struct RmsProp {
    learning_rate: f32,
    alpha: f32,
    epsilon: f32,
    s: Box<[f32]>,
}

impl RmsProp {
    /// Creates a new `RmsProp` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `alpha` - The smoothing constant of the squared gradient average.
    /// * `epsilon` - Added to the denominator for numerical stability.
    pub fn new(len: usize, learning_rate: f32, alpha: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            alpha,
            epsilon,
            s: vec![0.; len].into_boxed_slice(),
        }
    }

    pub fn with_defaults(len: usize, learning_rate: f32) -> Self {
        Self::new(len, learning_rate, 0.99, 1e-8)
    }
}

impl Optimizer for RmsProp {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_sizes(grad, params, self.s.len())?;

        let Self {
            learning_rate: lr,
            alpha,
            epsilon: eps,
            ..
        } = *self;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.s.iter_mut())
            .for_each(|((p, g), s)| {
                *s = alpha * *s + (1. - alpha) * g.powi(2);
                *p -= lr * g / (s.sqrt() + eps);
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
    fn first_step_is_scaled_by_the_smoothing_constant() {
        let mut optimizer = RmsProp::with_defaults(1, 0.01);
        let mut params = [0.];

        optimizer.update_params(&[2.], &mut params).unwrap();

        // s = 0.01 * 4, so the step is lr * 2 / 0.2 = 10 * lr.
        assert!((params[0] + 0.1).abs() < 1e-5, "got {}", params[0]);
    }
}
