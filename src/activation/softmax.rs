//! Column-wise softmax.
//!
//! Scores are laid out one row per class and one column per sample, so each
//! column is normalized on its own:
//!
//!   out[i][j] = exp(s[i][j] - max_j) / sum_k exp(s[k][j] - max_j)
//!
//! Division always uses the sum of the element's own column. Subtracting the
//! column maximum leaves the result unchanged mathematically and keeps the
//! largest exponential at exactly 1, so the denominator is never below 1.
//!
//! Scores are expected to be finite. A column holding NaN, `+inf`, or only
//! `-inf` comes out as all NaN; other columns are unaffected and nothing
//! panics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::math::error::MatrixError;
use crate::math::matrix::Matrix;

/// How intermediate exponentials are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoftmaxPolicy {
    /// Full `f64` precision. Columns sum to 1 up to float error.
    #[default]
    Exact,
    /// Exponentials and their sum are rounded to two decimal places before
    /// dividing. Each probability may be off from the exact value by up to
    /// about `0.005 / sum`, and classes far below the column maximum round
    /// to exactly 0.
    Rounded,
}

impl fmt::Display for SoftmaxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftmaxPolicy::Exact => write!(f, "exact"),
            SoftmaxPolicy::Rounded => write!(f, "rounded"),
        }
    }
}

impl FromStr for SoftmaxPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(SoftmaxPolicy::Exact),
            "rounded" => Ok(SoftmaxPolicy::Rounded),
            other => Err(format!("unknown softmax policy '{}' (expected exact or rounded)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Softmax {
    pub policy: SoftmaxPolicy,
}

impl Softmax {
    pub fn new(policy: SoftmaxPolicy) -> Softmax {
        Softmax { policy }
    }

    /// Converts raw scores into per-column probability distributions.
    pub fn normalize(&self, scores: &Matrix) -> Result<Matrix, MatrixError> {
        if scores.is_empty() {
            return Err(MatrixError::Empty { op: "softmax" });
        }

        let round = |x: f64| match self.policy {
            SoftmaxPolicy::Exact => x,
            SoftmaxPolicy::Rounded => round_two_places(x),
        };

        let mut out = Matrix::zeros(scores.rows(), scores.cols()).into_data();

        for j in 0..scores.cols() {
            let max = scores
                .data()
                .iter()
                .map(|row| row[j])
                .fold(f64::NEG_INFINITY, f64::max);

            let mut sum = 0.0;
            for (out_row, row) in out.iter_mut().zip(scores.data()) {
                let e = round((row[j] - max).exp());
                out_row[j] = e;
                sum += e;
            }

            let sum = round(sum);
            for out_row in out.iter_mut() {
                out_row[j] /= sum;
            }
        }

        Matrix::from_data(out)
    }
}

/// Exact-policy softmax over the columns of `scores`.
pub fn softmax_columns(scores: &Matrix) -> Result<Matrix, MatrixError> {
    Softmax::default().normalize(scores)
}

fn round_two_places(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
