pub mod forward;
pub mod metrics;
pub mod network;

pub use forward::{forward_propagate, forward_propagate_with};
pub use network::{NetworkShape, TwoLayerNetwork};
