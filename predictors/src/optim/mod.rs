mod registry;
mod resolver;

pub use registry::{OptimizerArgs, OptimizerFactory, OptimizerRegistry};
pub use resolver::OptimizerResolver;
