use std::{error::Error, fmt, io, path::PathBuf};

use machine_learning::MlErr;

/// The predictors module's result type.
pub type Result<T> = std::result::Result<T, PredictorErr>;

/// Failures while configuring or running a predictor.
#[derive(Debug)]
pub enum PredictorErr {
    ConfigParse {
        path: PathBuf,
        reason: String,
    },
    UnknownOptimizerRate {
        name: String,
    },
    UnknownOptimizerName {
        name: String,
    },
    LogWrite {
        path: PathBuf,
        source: io::Error,
    },
    InvalidConfig(String),
    Ml(MlErr),
}

impl fmt::Display for PredictorErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorErr::ConfigParse { path, reason } => {
                write!(f, "failed to parse {}: {reason}", path.display())
            }
            PredictorErr::UnknownOptimizerRate { name } => {
                write!(f, "no learning rate configured for optimizer {name}")
            }
            PredictorErr::UnknownOptimizerName { name } => {
                write!(f, "unknown optimizer {name}")
            }
            PredictorErr::LogWrite { path, source } => {
                write!(f, "failed to append to {}: {source}", path.display())
            }
            PredictorErr::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            PredictorErr::Ml(e) => write!(f, "{e}"),
        }
    }
}

impl Error for PredictorErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PredictorErr::LogWrite { source, .. } => Some(source),
            PredictorErr::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for PredictorErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<PredictorErr> for io::Error {
    fn from(value: PredictorErr) -> Self {
        match value {
            PredictorErr::LogWrite { source, .. } => source,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
