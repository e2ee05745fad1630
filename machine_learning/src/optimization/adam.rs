use super::{Optimizer, optimizer::check_sizes};
use crate::Result;

/// Adam: gradient steps scaled by bias corrected running averages of the gradient (`m`) and
/// of its square (`v`).
#[derive(Debug)]
pub struct Adam {
    learning_rate: f32,
    betas: (f32, f32),
    /// `beta1^t` and `beta2^t` after `t` updates.
    beta_powers: (f32, f32),
    epsilon: f32,
    m: Box<[f32]>,
    v: Box<[f32]>,
}

impl Adam {
    /// Creates a new `Adam` optimizer.
    ///
    /// # Arguments
    /// * `len` - The length of the parameter buffer this optimizer updates.
    /// * `learning_rate` - The length of the first update.
    /// * `beta1`, `beta2` - The decay of the gradient and squared gradient averages.
    /// * `epsilon` - Added to the denominator for numerical stability.
    pub fn new(len: usize, learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            betas: (beta1, beta2),
            beta_powers: (1., 1.),
            epsilon,
            m: vec![0.; len].into_boxed_slice(),
            v: vec![0.; len].into_boxed_slice(),
        }
    }

    /// `beta1 = 0.9`, `beta2 = 0.999`, `epsilon = 1e-8`.
    pub fn with_defaults(len: usize, learning_rate: f32) -> Self {
        Self::new(len, learning_rate, 0.9, 0.999, 1e-8)
    }

    pub fn state_len(&self) -> usize {
        self.m.len()
    }
}

impl Optimizer for Adam {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_sizes(grad, params, self.m.len())?;

        let (b1, b2) = self.betas;
        self.beta_powers.0 *= b1;
        self.beta_powers.1 *= b2;

        // Both bias corrections folded into a single scalar.
        let (p1, p2) = self.beta_powers;
        let step_size = self.learning_rate * (1. - p2).sqrt() / (1. - p1);
        let eps = self.epsilon;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.m.iter_mut())
            .zip(self.v.iter_mut())
            .for_each(|(((p, g), m), v)| {
                *m = b1 * *m + (1. - b1) * g;
                *v = b2 * *v + (1. - b2) * g * g;
                *p -= step_size * *m / (v.sqrt() + eps);
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
    fn first_step_has_the_length_of_the_learning_rate() {
        let mut optimizer = Adam::with_defaults(2, 0.01);
        let mut params = [1., 1.];

        optimizer.update_params(&[4., -0.3], &mut params).unwrap();

        assert!((params[0] - 0.99).abs() < 1e-5, "got {}", params[0]);
        assert!((params[1] - 1.01).abs() < 1e-5, "got {}", params[1]);
    }

    #[test]
    fn state_is_bound_to_the_parameter_count() {
        let mut optimizer = Adam::with_defaults(3, 0.01);

        assert!(matches!(
            optimizer.update_params(&[1., 1.], &mut [0., 0.]),
            Err(MlErr::SizeMismatch {
                what: "optimizer state",
                ..
            })
        ));
    }
}
