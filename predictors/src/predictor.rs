use std::path::PathBuf;

use log::debug;
use machine_learning::{
    Parameters,
    arch::{
        CLASSES, Model, Sequential, feed_forward,
        loss::{CrossEntropy, LossFn, one_hot},
    },
    metrics::accuracy,
    optimization::Optimizer,
};
use ndarray::{Array2, ArrayView2};
use serde::Deserialize;

use crate::{
    Dataset, Metric, Module, Parameterized, Phase, Result,
    batch::{Batch, ChannelMean},
    config::PredictorConfig,
    logs::PhaseLogs,
    optim::OptimizerResolver,
    sink::{LogSink, MetricsSink},
};

/// Behaviors that historically differ between the two predictors during training.
///
/// Validation and test always average channels with `ChannelMean::Axis` and always report
/// to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PhaseQuirks {
    pub train_channel_mean: ChannelMean,
    pub report_train_metrics: bool,
}

impl PhaseQuirks {
    /// The behavior existing logs of `dataset` were produced with.
    pub fn historical(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Mnist => Self::uniform(),
            Dataset::Cifar10 => Self {
                train_channel_mean: ChannelMean::SumDivide,
                report_train_metrics: false,
            },
        }
    }

    /// The same behavior for every phase.
    pub fn uniform() -> Self {
        Self {
            train_channel_mean: ChannelMean::Axis,
            report_train_metrics: true,
        }
    }

    fn channel_mean(&self, phase: Phase) -> ChannelMean {
        match phase {
            Phase::Train => self.train_channel_mean,
            Phase::Val | Phase::Test => ChannelMean::Axis,
        }
    }

    fn reports(&self, phase: Phase) -> bool {
        phase != Phase::Train || self.report_train_metrics
    }
}

/// An image classifier that records the loss and accuracy of every batch it evaluates.
pub struct Predictor {
    dataset: Dataset,
    optimizer_name: String,
    hyperparams: PathBuf,
    resolver: OptimizerResolver,
    model: Sequential,
    params: Parameters,
    logs: PhaseLogs,
    sink: Box<dyn MetricsSink>,
    quirks: PhaseQuirks,
}

impl Predictor {
    /// Creates the MNIST predictor with the default configuration for `optimizer_name`.
    pub fn mnist(optimizer_name: &str) -> Result<Self> {
        Self::from_config(
            Dataset::Mnist,
            PredictorConfig::new(optimizer_name),
            Box::new(LogSink),
        )
    }

    /// Creates the CIFAR-10 predictor with the default configuration for `optimizer_name`.
    pub fn cifar10(optimizer_name: &str) -> Result<Self> {
        Self::from_config(
            Dataset::Cifar10,
            PredictorConfig::new(optimizer_name),
            Box::new(LogSink),
        )
    }

    /// Creates a new `Predictor`.
    ///
    /// # Arguments
    /// * `dataset` - Fixes the input dimension and the log file names.
    /// * `config` - The optimizer, file locations, seed and quirks.
    /// * `sink` - Receives the metrics of every batch.
    ///
    /// # Returns
    /// The predictor with freshly initialized parameters.
    pub fn from_config(
        dataset: Dataset,
        config: PredictorConfig,
        sink: Box<dyn MetricsSink>,
    ) -> Result<Self> {
        let model = feed_forward(dataset.input_dim());
        let params = Parameters::init(&model, config.seed)?;
        let logs = PhaseLogs::new(config.log_dir, &config.optimizer, dataset);

        Ok(Self {
            dataset,
            optimizer_name: config.optimizer,
            hyperparams: config.hyperparams,
            resolver: OptimizerResolver::default(),
            model,
            params,
            logs,
            sink,
            quirks: config.quirks.unwrap_or(PhaseQuirks::historical(dataset)),
        })
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn optimizer_name(&self) -> &str {
        &self.optimizer_name
    }

    pub fn quirks(&self) -> PhaseQuirks {
        self.quirks
    }

    pub fn logs(&self) -> &PhaseLogs {
        &self.logs
    }

    pub fn model(&self) -> &Sequential {
        &self.model
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Evaluates `batch` in `phase`: computes its loss and accuracy, appends both to the
    /// phase logs and then reports them to the sink.
    ///
    /// In `Phase::Train` the gradient is reset and recomputed for this batch.
    ///
    /// # Returns
    /// The batch loss, or the first error hit. Nothing reaches the sink unless both log
    /// lines were written.
    pub fn run_phase(&mut self, phase: Phase, batch: &Batch, batch_idx: usize) -> Result<f32> {
        let x = batch.features(self.quirks.channel_mean(phase), self.dataset.input_dim())?;
        let y = one_hot(batch.targets(), CLASSES)?;

        let (loss, logits) = match phase {
            Phase::Train => {
                self.params.zero_grad();
                let (values, grads) = self.params.values_and_grads_mut();
                self.model
                    .backprop(values, grads, x.view(), &CrossEntropy, y.view())?
            }
            Phase::Val | Phase::Test => {
                let logits = self.model.forward(self.params.values(), x.view())?;
                (CrossEntropy.loss(logits.view(), y.view()), logits)
            }
        };
        let acc = accuracy(logits.view(), batch.targets())?;

        self.logs.append(phase, Metric::Loss, loss)?;
        self.logs.append(phase, Metric::Acc, acc)?;

        if self.quirks.reports(phase) {
            self.sink.log(&phase.key(Metric::Loss), loss);
            self.sink.log(&phase.key(Metric::Acc), acc);
        }

        debug!(phase = phase.tag(), batch = batch_idx, loss = loss, acc = acc; "step");
        Ok(loss)
    }
}

impl Module for Predictor {
    fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        Ok(self.model.forward(self.params.values(), x)?)
    }

    fn configure_optimizers(&self) -> Result<Box<dyn Optimizer>> {
        self.resolver
            .resolve(&self.optimizer_name, &self.hyperparams, self.params.len())
    }

    fn training_step(&mut self, batch: &Batch, batch_idx: usize) -> Result<f32> {
        self.run_phase(Phase::Train, batch, batch_idx)
    }

    fn validation_step(&mut self, batch: &Batch, batch_idx: usize) -> Result<f32> {
        self.run_phase(Phase::Val, batch, batch_idx)
    }

    fn test_step(&mut self, batch: &Batch, batch_idx: usize) -> Result<f32> {
        self.run_phase(Phase::Test, batch, batch_idx)
    }
}

impl Parameterized for Predictor {
    fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }
}
