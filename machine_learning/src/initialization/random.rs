use std::{cell::RefCell, rc::Rc};

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::ParamGen;
use crate::{MlErr, Result};

/// Draws up to `budget` parameters from `distribution`, sharing its rng with other generators.
pub struct RandParamGen<R: Rng, D: Distribution<f32>> {
    rng: Rc<RefCell<R>>,
    distribution: D,
    budget: usize,
}

impl<R: Rng, D: Distribution<f32>> RandParamGen<R, D> {
    pub fn new(rng: Rc<RefCell<R>>, distribution: D, budget: usize) -> Self {
        Self {
            rng,
            distribution,
            budget,
        }
    }
}

impl<R: Rng> RandParamGen<R, Uniform<f32>> {
    /// A generator over `[low, high)`.
    ///
    /// # Returns
    /// `MlErr::InvalidDistribution` if the range is empty or not finite.
    pub fn uniform(rng: Rc<RefCell<R>>, budget: usize, low: f32, high: f32) -> Result<Self> {
        Uniform::new(low, high)
            .map(|distribution| Self::new(rng, distribution, budget))
            .map_err(|e| MlErr::InvalidDistribution(format!("[{low}, {high}): {e}")))
    }

    /// The default for a dense layer: `U(-k, k)` with `k = 1 / sqrt(fan_in)`, for weights and
    /// biases alike.
    ///
    /// # Arguments
    /// * `rng` - Shared with the rest of the model's generators.
    /// * `budget` - The size of the layer.
    /// * `fan_in` - The amount of inputs of the layer, must not be zero.
    pub fn fan_in_uniform(rng: Rc<RefCell<R>>, budget: usize, fan_in: usize) -> Result<Self> {
        let k = (fan_in as f32).sqrt().recip();
        Self::uniform(rng, budget, -k, k)
    }
}

impl<R: Rng, D: Distribution<f32>> ParamGen for RandParamGen<R, D> {
    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        if self.budget == 0 {
            return None;
        }

        let take = n.min(self.budget);
        self.budget -= take;

        let mut rng = self.rng.borrow_mut();
        Some((&self.distribution).sample_iter(&mut *rng).take(take).collect())
    }
}
