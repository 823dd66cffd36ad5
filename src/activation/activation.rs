use serde::{Serialize, Deserialize};
use std::f64::consts::E;

use crate::math::matrix::Matrix;

/// A nonlinearity applied independently to every element of a matrix.
///
/// The forward pass only depends on this trait, so any element-wise
/// function can be dropped in between the two affine transforms.
pub trait Activation {
    /// Returns a new matrix of the same shape with the activation applied.
    fn apply(&self, input: &Matrix) -> Matrix;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[default]
    ReLU,
    Sigmoid,
    Tanh,
    Identity,
    LeakyReLU { alpha: f64 },
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Identity => x,
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }
}

impl Activation for ActivationFunction {
    fn apply(&self, input: &Matrix) -> Matrix {
        input.map(|x| self.function(x))
    }

    fn name(&self) -> &'static str {
        match self {
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::Identity => "identity",
            ActivationFunction::LeakyReLU { .. } => "leaky_relu",
        }
    }
}
