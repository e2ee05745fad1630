use std::num::NonZeroUsize;

use log::info;

use machine_learning::MlErr;

use crate::{Module, Parameterized, PredictorErr, Result, batch::Batch};

/// The mean losses of one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    pub train_loss: f32,
    /// `None` when no validation batches were given.
    pub val_loss: Option<f32>,
}

/// The outcome of `Trainer::fit`, one report per epoch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitReport {
    pub epochs: Vec<EpochReport>,
}

impl FitReport {
    pub fn last(&self) -> Option<&EpochReport> {
        self.epochs.last()
    }
}

/// Drives a module through its training, validation and test phases one batch at a time.
#[derive(Debug, Clone, Copy)]
pub struct Trainer {
    epochs: NonZeroUsize,
}

impl Trainer {
    pub fn new(epochs: NonZeroUsize) -> Self {
        Self { epochs }
    }

    pub fn epochs(&self) -> usize {
        self.epochs.get()
    }

    /// Trains `module` for every epoch.
    ///
    /// The optimizer is resolved once. Every training batch is followed by an optimizer step;
    /// the validation batches are evaluated at the end of each epoch.
    ///
    /// # Arguments
    /// * `module` - The module to train.
    /// * `train` - The training batches, at least one.
    /// * `val` - The validation batches.
    ///
    /// # Returns
    /// The mean losses of every epoch or the first error hit.
    pub fn fit<M>(&self, module: &mut M, train: &[Batch], val: &[Batch]) -> Result<FitReport>
    where
        M: Module + Parameterized,
    {
        if train.is_empty() {
            return Err(MlErr::EmptyBatch.into());
        }

        let mut optimizer = module.configure_optimizers()?;
        let mut report = FitReport::default();

        for epoch in 0..self.epochs.get() {
            let mut train_losses = Vec::with_capacity(train.len());

            for (idx, batch) in train.iter().enumerate() {
                train_losses.push(module.training_step(batch, idx)?);
                module.parameters_mut().step(optimizer.as_mut())?;
            }

            let val_losses = val
                .iter()
                .enumerate()
                .map(|(idx, batch)| module.validation_step(batch, idx))
                .collect::<Result<Vec<_>>>()?;

            let epoch_report = EpochReport {
                train_loss: mean(&train_losses).unwrap_or(f32::NAN),
                val_loss: mean(&val_losses),
            };
            info!(
                epoch = epoch,
                train_loss = epoch_report.train_loss;
                "finished epoch"
            );
            report.epochs.push(epoch_report);
        }

        Ok(report)
    }

    /// Evaluates `module` on every test batch.
    ///
    /// # Returns
    /// The mean test loss or the first error hit.
    pub fn test<M: Module>(&self, module: &mut M, batches: &[Batch]) -> Result<f32> {
        let losses = batches
            .iter()
            .enumerate()
            .map(|(idx, batch)| module.test_step(batch, idx))
            .collect::<Result<Vec<_>>>()?;

        let loss = mean(&losses).ok_or(PredictorErr::Ml(MlErr::EmptyBatch))?;
        info!(test_loss = loss; "finished testing");

        Ok(loss)
    }
}

fn mean(values: &[f32]) -> Option<f32> {
    (!values.is_empty()).then(|| values.iter().sum::<f32>() / values.len() as f32)
}

#[cfg(test)]
mod tests {
    use machine_learning::{
        Parameters,
        optimization::{GradientDescent, Optimizer},
    };
    use ndarray::{Array2, ArrayView2};

    use super::*;

    /// Records the phase calls it receives and fills the gradient with ones.
    struct Recorder {
        params: Parameters,
        calls: Vec<&'static str>,
        fail_at: Option<usize>,
    }

    impl Module for Recorder {
        fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
            Ok(x.to_owned())
        }

        fn configure_optimizers(&self) -> Result<Box<dyn Optimizer>> {
            Ok(Box::new(GradientDescent::new(1.)))
        }

        fn training_step(&mut self, _batch: &Batch, idx: usize) -> Result<f32> {
            if self.fail_at == Some(idx) {
                return Err(PredictorErr::InvalidConfig("boom".to_string()));
            }
            self.calls.push("train");
            self.params.zero_grad();
            let (_, grads) = self.params.values_and_grads_mut();
            grads.fill(1.);
            Ok(idx as f32)
        }

        fn validation_step(&mut self, _batch: &Batch, _idx: usize) -> Result<f32> {
            self.calls.push("val");
            Ok(0.5)
        }

        fn test_step(&mut self, _batch: &Batch, idx: usize) -> Result<f32> {
            self.calls.push("test");
            Ok(idx as f32 * 2.)
        }
    }

    impl Parameterized for Recorder {
        fn parameters_mut(&mut self) -> &mut Parameters {
            &mut self.params
        }
    }

    fn batches(n: usize) -> Vec<Batch> {
        let mut rng = rand::rng();
        (0..n)
            .map(|_| Batch::synthetic(&mut rng, crate::Dataset::Mnist, 1).unwrap())
            .collect()
    }

    fn recorder() -> Recorder {
        Recorder {
            params: Parameters::new(vec![0.]),
            calls: Vec::new(),
            fail_at: None,
        }
    }

    #[test]
    fn fit_steps_after_every_training_batch() {
        let mut module = recorder();
        let trainer = Trainer::new(NonZeroUsize::new(2).unwrap());

        let report = trainer.fit(&mut module, &batches(3), &batches(1)).unwrap();

        assert_eq!(
            module.calls,
            ["train", "train", "train", "val", "train", "train", "train", "val"]
        );
        assert_eq!(module.params.values(), [-6.]);
        assert_eq!(report.epochs.len(), 2);
        assert_eq!(
            report.last(),
            Some(&EpochReport {
                train_loss: 1.,
                val_loss: Some(0.5)
            })
        );
    }

    #[test]
    fn fit_propagates_step_errors() {
        let mut module = Recorder {
            fail_at: Some(1),
            ..recorder()
        };
        let trainer = Trainer::new(NonZeroUsize::MIN);

        assert!(matches!(
            trainer.fit(&mut module, &batches(3), &[]),
            Err(PredictorErr::InvalidConfig(_))
        ));
        assert_eq!(module.calls, ["train"]);
    }

    #[test]
    fn fit_requires_training_batches() {
        let mut module = recorder();
        let trainer = Trainer::new(NonZeroUsize::MIN);

        assert!(matches!(
            trainer.fit(&mut module, &[], &batches(1)),
            Err(PredictorErr::Ml(MlErr::EmptyBatch))
        ));
        assert!(module.calls.is_empty());
    }

    #[test]
    fn test_averages_the_losses() {
        let mut module = recorder();
        let trainer = Trainer::new(NonZeroUsize::MIN);

        assert_eq!(trainer.test(&mut module, &batches(3)).unwrap(), 2.);
        assert!(matches!(
            trainer.test(&mut module, &[]),
            Err(PredictorErr::Ml(MlErr::EmptyBatch))
        ));
    }
}
