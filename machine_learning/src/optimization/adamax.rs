use super::{Optimizer, optimizer::check_sizes};
use crate::Result;

/// The infinity norm variant of Adam.
#[derive(Debug)]
pub struct Adamax {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    beta1_t: f32,
    m: Box<[f32]>,
    u: Box<[f32]>,
    epsilon: f32,
}

impl Adamax {
    /// Creates a new `Adamax` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1`, `beta2`, `epsilon` - Hyperparameters to the optimization algorithm.
    pub fn new(len: usize, learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            beta1_t: 1.,
            m: vec![0.; len].into_boxed_slice(),
            u: vec![0.; len].into_boxed_slice(),
            epsilon,
        }
    }

    pub fn with_defaults(len: usize, learning_rate: f32) -> Self {
        Self::new(len, learning_rate, 0.9, 0.999, 1e-8)
    }
}

impl Optimizer for Adamax {
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
        let step_size = lr / (1. - self.beta1_t);

        params
            .iter_mut()
            .zip(grad)
            .zip(self.m.iter_mut())
            .zip(self.u.iter_mut())
            .for_each(|(((p, g), m), u)| {
                *m = b1 * *m + (1. - b1) * g;
                *u = (b2 * *u).max(g.abs() + eps);
                *p -= step_size * *m / *u;
            });

        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}
