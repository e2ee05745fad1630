pub mod arch;
pub mod error;
pub mod initialization;
pub mod metrics;
pub mod optimization;
pub mod parameters;

pub use error::{MlErr, Result};
pub use parameters::Parameters;
