pub mod activation;
pub mod softmax;

pub use activation::{Activation, ActivationFunction};
pub use softmax::{softmax_columns, Softmax, SoftmaxPolicy};
