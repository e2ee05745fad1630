use super::ParamGen;

/// A parameter generator that delegates the generation to a chain of parameter generators.
///
/// Each layer of a model gets its own generator, since every layer has its own fan-in;
/// chaining them yields the whole flat parameter buffer in one go.
pub struct ChainedParamGen {
    param_gens: Vec<Box<dyn ParamGen>>,
    curr: usize,
}

impl ChainedParamGen {
    /// Creates a new `ChainedParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `param_gens` - A vec of potentially different parameter generators.
    pub fn new(param_gens: Vec<Box<dyn ParamGen>>) -> Self {
        Self {
            param_gens,
            curr: 0,
        }
    }
}

impl ParamGen for ChainedParamGen {
    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        let mut sample = Vec::with_capacity(n);

        while sample.len() < n && self.curr < self.param_gens.len() {
            match self.param_gens[self.curr].sample(n - sample.len()) {
                Some(part) if !part.is_empty() => sample.extend(part),
                _ => self.curr += 1,
            }
        }

        if sample.is_empty() {
            return None;
        }

        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use rand::{SeedableRng, rngs::StdRng};

    use super::{super::RandParamGen, *};

    fn uniform(low: f32, limit: usize) -> Box<dyn ParamGen> {
        let rng = Rc::new(RefCell::new(StdRng::seed_from_u64(7)));
        Box::new(RandParamGen::uniform(rng, limit, low, low + 0.5).unwrap())
    }

    #[test]
    fn empty() {
        let mut param_gen = ChainedParamGen::new(vec![]);
        assert!(param_gen.sample(1).is_none());
    }

    #[test]
    fn exact() {
        let mut param_gen = ChainedParamGen::new(vec![uniform(0., 5), uniform(10., 5)]);
        let sample = param_gen.sample(10).unwrap();

        assert_eq!(sample.len(), 10);
        assert!(sample[..5].iter().all(|&p| (0. ..0.5).contains(&p)));
        assert!(sample[5..].iter().all(|&p| (10. ..10.5).contains(&p)));
        assert!(param_gen.sample(1).is_none());
    }

    #[test]
    fn partial() {
        let mut param_gen = ChainedParamGen::new(vec![uniform(0., 1), uniform(10., 3)]);

        assert_eq!(param_gen.sample(2).unwrap().len(), 2);
        assert_eq!(param_gen.sample(3).unwrap().len(), 2);
        assert!(param_gen.sample(1).is_none());
    }
}
