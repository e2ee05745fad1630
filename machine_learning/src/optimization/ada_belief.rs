use super::{Optimizer, optimizer::check_sizes};
use crate::Result;

/// AdaBelief: like Adam, but the second moment tracks the variance of the gradient around its
/// running mean (the "belief") instead of the raw squared gradient.
///
/// This is the plain, bias corrected form with the `adabelief-pytorch` 0.1.x defaults: no
/// rectification of the early steps and no decoupled weight decay.
#[derive(Debug)]
pub struct AdaBelief {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    beta1_t: f32,
    beta2_t: f32,
    m: Box<[f32]>,
    s: Box<[f32]>,
    epsilon: f32,
}

impl AdaBelief {
    /// Creates a new `AdaBelief` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1`, `beta2`, `epsilon` - Hyperparameters to the optimization algorithm.
    ///
    /// # Returns
    /// A new `AdaBelief` instance.
    pub fn new(len: usize, learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            beta1_t: 1.,
            beta2_t: 1.,
            m: vec![0.; len].into_boxed_slice(),
            s: vec![0.; len].into_boxed_slice(),
            epsilon,
        }
    }

    /// Creates a new `AdaBelief` optimizer with `beta1 = 0.9`, `beta2 = 0.999` and
    /// `epsilon = 1e-16`.
    pub fn with_defaults(len: usize, learning_rate: f32) -> Self {
        Self::new(len, learning_rate, 0.9, 0.999, 1e-16)
    }
}

impl Optimizer for AdaBelief {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_sizes(grad, params, self.m.len())?;

        let Self {
            learning_rate: lr,
            beta1: b1,
            beta2: b2,
            epsilon: eps,
            ..
        } = *self;

        self.beta1_t *= b1;
        self.beta2_t *= b2;

        let bc1 = 1. - self.beta1_t;
        let bc2 = 1. - self.beta2_t;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.m.iter_mut())
            .zip(self.s.iter_mut())
            .for_each(|(((p, g), m), s)| {
                *m = b1 * *m + (1. - b1) * g;
                *s = b2 * *s + (1. - b2) * (g - *m).powi(2) + eps;
                *p -= lr * (*m / bc1) / ((*s / bc2).sqrt() + eps);
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
    use crate::MlErr;

    #[test]
    fn first_step_is_scaled_by_the_belief() {
        let mut optimizer = AdaBelief::with_defaults(1, 0.01);
        let mut params = [1.];

        optimizer.update_params(&[2.], &mut params).unwrap();

        // m_hat = g and s_hat = (0.9 g)^2, so the step is lr / 0.9.
        assert!((params[0] - (1. - 0.01 / 0.9)).abs() < 1e-5, "got {}", params[0]);
    }

    #[test]
    fn consistent_gradients_take_large_steps() {
        let mut optimizer = AdaBelief::with_defaults(1, 0.01);
        let mut params = [0.];

        for _ in 0..10 {
            optimizer.update_params(&[1.], &mut params).unwrap();
        }

        // The gradient never deviates from its mean, so the belief shrinks and the
        // steps grow beyond the learning rate.
        assert!(params[0] < -0.1, "got {}", params[0]);
    }

    #[test]
    fn size_mismatch() {
        let mut optimizer = AdaBelief::with_defaults(2, 0.01);

        assert!(matches!(
            optimizer.update_params(&[1.], &mut [1.]),
            Err(MlErr::SizeMismatch { .. })
        ));
    }
}
