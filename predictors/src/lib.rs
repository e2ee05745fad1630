pub mod batch;
pub mod config;
pub mod dataset;
mod error;
pub mod logs;
pub mod module;
pub mod optim;
pub mod phase;
pub mod predictor;
pub mod sink;
pub mod trainer;

pub use dataset::Dataset;
pub use error::{PredictorErr, Result};
pub use module::{Module, Parameterized};
pub use phase::{Metric, Phase};
pub use predictor::{PhaseQuirks, Predictor};
