pub mod math;
pub mod activation;
pub mod network;
pub mod data;
pub mod config;
pub mod logging;

// Convenience re-exports
pub use math::matrix::{Matrix, Shape};
pub use math::error::MatrixError;
pub use activation::activation::{Activation, ActivationFunction};
pub use activation::softmax::{Softmax, SoftmaxPolicy};
pub use network::forward::forward_propagate;
pub use network::network::{NetworkShape, TwoLayerNetwork};
pub use data::csv::{load_csv, DatasetError};
pub use config::RunConfig;
