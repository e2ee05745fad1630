pub mod activations;
pub mod layers;
pub mod loss;
mod model;
mod sequential;

pub use model::Model;
pub use sequential::{Sequential, feed_forward};

/// The amount of classes every classifier in this crate predicts.
pub const CLASSES: usize = 10;
