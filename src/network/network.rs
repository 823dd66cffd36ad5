use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::activation::softmax::Softmax;
use crate::math::error::MatrixError;
use crate::math::matrix::{Matrix, Shape};
use crate::network::forward::forward_propagate_with;
use crate::network::metrics::argmax_columns;

/// Layer widths for a two-layer classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkShape {
    pub input_size: usize,
    pub hidden_size: usize,
    pub classes: usize,
}

impl Default for NetworkShape {
    /// 28x28 pixels in, 10 hidden units, 10 digits out.
    fn default() -> Self {
        NetworkShape { input_size: 784, hidden_size: 10, classes: 10 }
    }
}

/// Weights and biases for `input -> hidden -> classes`.
///
/// Weight matrices are `(out, in)` so they left-multiply a batch laid out
/// one sample per column. Biases are single columns.
#[derive(Debug, Clone)]
pub struct TwoLayerNetwork {
    pub w1: Matrix,
    pub b1: Matrix,
    pub w2: Matrix,
    pub b2: Matrix,
    pub activation: ActivationFunction,
    pub softmax: Softmax,
}

impl TwoLayerNetwork {
    /// Builds a network with every parameter drawn from `[-0.5, 0.5)`.
    ///
    /// With a seed, each of the four matrices gets its own derived seed so
    /// that they are not copies of one another.
    pub fn random(shape: NetworkShape, seed: Option<u64>) -> TwoLayerNetwork {
        let derive = |k: u64| seed.map(|s| s.wrapping_add(k));
        TwoLayerNetwork {
            w1: Matrix::random(shape.hidden_size, shape.input_size, derive(0)),
            b1: Matrix::random(shape.hidden_size, 1, derive(1)),
            w2: Matrix::random(shape.classes, shape.hidden_size, derive(2)),
            b2: Matrix::random(shape.classes, 1, derive(3)),
            activation: ActivationFunction::ReLU,
            softmax: Softmax::default(),
        }
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_softmax(mut self, softmax: Softmax) -> Self {
        self.softmax = softmax;
        self
    }

    /// Shapes of `W1, B1, W2, B2`, in that order.
    pub fn shapes(&self) -> [(&'static str, Shape); 4] {
        [
            ("W1", self.w1.shape()),
            ("B1", self.b1.shape()),
            ("W2", self.w2.shape()),
            ("B2", self.b2.shape()),
        ]
    }

    /// Class probabilities for a batch, one sample per column.
    pub fn forward(&self, x: &Matrix) -> Result<Matrix, MatrixError> {
        debug!(input = %x.shape(), "forward pass");
        forward_propagate_with(
            &self.w1,
            &self.b1,
            &self.w2,
            &self.b2,
            x,
            &self.activation,
            &self.softmax,
        )
    }

    /// Most probable class for each sample.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>, MatrixError> {
        Ok(argmax_columns(&self.forward(x)?))
    }
}
