use super::{Optimizer, optimizer::check_sizes};
use crate::Result;

/// Adapts the step with running averages of both the squared gradients and the squared updates.
#[derive(Debug)]
pub struct Adadelta {
    learning_rate: f32,
    rho: f32,
    epsilon: f32,
    s: Box<[f32]>,
    delta: Box<[f32]>,
}

impl Adadelta {
    /// Creates a new `Adadelta` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The coefficient applied to every computed update.
    /// * `rho` - The decay of both running averages.
    /// * `epsilon` - Added inside the square roots for numerical stability.
    pub fn new(len: usize, learning_rate: f32, rho: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            rho,
            epsilon,
            s: vec![0.; len].into_boxed_slice(),
            delta: vec![0.; len].into_boxed_slice(),
        }
    }

    pub fn with_defaults(len: usize, learning_rate: f32) -> Self {
        Self::new(len, learning_rate, 0.9, 1e-6)
    }
}

impl Optimizer for Adadelta {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_sizes(grad, params, self.s.len())?;

        let Self {
            learning_rate: lr,
            rho,
            epsilon: eps,
            ..
        } = *self;

        params
            .iter_mut()
            .zip(grad)
            .zip(self.s.iter_mut())
            .zip(self.delta.iter_mut())
            .for_each(|(((p, g), s), delta)| {
                *s = rho * *s + (1. - rho) * g.powi(2);
                let update = ((*delta + eps).sqrt() / (*s + eps).sqrt()) * g;
                *delta = rho * *delta + (1. - rho) * update.powi(2);
                *p -= lr * update;
            });

        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}
