mod hyperparams;
mod predictor;
mod run;

pub use hyperparams::HyperParams;
pub use predictor::PredictorConfig;
pub use run::RunConfig;
