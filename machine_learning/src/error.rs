use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyBatch,
    TargetOutOfRange {
        target: usize,
        classes: usize,
    },
    InvalidDistribution(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            MlErr::EmptyBatch => write!(f, "Tried to evaluate an empty batch"),
            MlErr::TargetOutOfRange { target, classes } => write!(
                f,
                "The target class {target} is out of range for a model with {classes} classes"
            ),
            MlErr::InvalidDistribution(reason) => {
                write!(f, "Failed to build the parameter distribution: {reason}")
            }
        }
    }
}

impl Error for MlErr {}
