mod cross_entropy;
mod loss_fn;

pub use cross_entropy::{CrossEntropy, one_hot, softmax};
pub use loss_fn::LossFn;
