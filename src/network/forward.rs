use tracing::debug;

use crate::activation::activation::Activation;
use crate::activation::softmax::Softmax;
use crate::math::error::MatrixError;
use crate::math::matrix::Matrix;

/// Two-layer forward pass with an exact softmax head:
///
/// ```text
/// Z1 = W1 * X + B1
/// A1 = activation(Z1)
/// Z2 = W2 * A1 + B2
/// out = softmax(Z2)
/// ```
///
/// `x` holds one sample per column. The result has one row per class and
/// one column per sample. Any shape mismatch stops the pass at the failing
/// step and is returned as-is; nothing after it runs.
pub fn forward_propagate(
    w1: &Matrix,
    b1: &Matrix,
    w2: &Matrix,
    b2: &Matrix,
    x: &Matrix,
    activation: &dyn Activation,
) -> Result<Matrix, MatrixError> {
    forward_propagate_with(w1, b1, w2, b2, x, activation, &Softmax::default())
}

/// Same as [`forward_propagate`] with an explicit softmax policy.
pub fn forward_propagate_with(
    w1: &Matrix,
    b1: &Matrix,
    w2: &Matrix,
    b2: &Matrix,
    x: &Matrix,
    activation: &dyn Activation,
    softmax: &Softmax,
) -> Result<Matrix, MatrixError> {
    let z1 = affine(w1, b1, x)?;
    debug!(shape = %z1.shape(), "hidden pre-activation");

    let a1 = activation.apply(&z1);
    debug!(activation = activation.name(), "hidden activation applied");

    let z2 = affine(w2, b2, &a1)?;
    debug!(shape = %z2.shape(), "output scores");

    softmax.normalize(&z2)
}

/// `w * x + b`, with `b` broadcast across the columns of the product.
pub fn affine(w: &Matrix, b: &Matrix, x: &Matrix) -> Result<Matrix, MatrixError> {
    w.multiply(x)?.add_broadcast_column(b)
}
