mod chained;
mod param_gen;
mod random;

pub use chained::ChainedParamGen;
pub use param_gen::ParamGen;
pub use random::RandParamGen;
