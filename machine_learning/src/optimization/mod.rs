mod ada_belief;
mod adadelta;
mod adagrad;
mod adam;
mod adam_w;
mod adamax;
mod gradient_descent;
mod optimizer;
mod rms_prop;

pub use ada_belief::AdaBelief;
pub use adadelta::Adadelta;
pub use adagrad::Adagrad;
pub use adam::Adam;
pub use adam_w::AdamW;
pub use adamax::Adamax;
pub use gradient_descent::GradientDescent;
pub use optimizer::Optimizer;
pub use rms_prop::RmsProp;
