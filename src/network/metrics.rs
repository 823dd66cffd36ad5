use crate::math::error::MatrixError;
use crate::math::matrix::{Matrix, Shape};

/// Index of the largest entry in each column. NaN entries never win.
pub fn argmax_columns(probs: &Matrix) -> Vec<usize> {
    (0..probs.cols())
        .map(|j| {
            let mut best = 0;
            let mut best_val = f64::NEG_INFINITY;
            for (i, row) in probs.data().iter().enumerate() {
                if row[j] > best_val {
                    best = i;
                    best_val = row[j];
                }
            }
            best
        })
        .collect()
}

/// Fraction of `predictions` equal to the matching entry of `labels`.
///
/// `labels` is a single row with one class index per sample.
pub fn accuracy(predictions: &[usize], labels: &Matrix) -> Result<f64, MatrixError> {
    let row = match labels.row(0) {
        Some(row) if labels.rows() == 1 && row.len() == predictions.len() => row,
        _ => {
            return Err(MatrixError::Dimension {
                op: "accuracy",
                left: Shape::new(1, predictions.len()),
                right: labels.shape(),
            })
        }
    };
    if predictions.is_empty() {
        return Err(MatrixError::Empty { op: "accuracy" });
    }

    let correct = predictions
        .iter()
        .zip(row)
        .filter(|&(&p, &label)| p as f64 == label)
        .count();
    Ok(correct as f64 / predictions.len() as f64)
}
