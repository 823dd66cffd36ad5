use serde::{Deserialize, Serialize};

use crate::data::csv::DatasetError;
use crate::math::matrix::{Matrix, Shape};

/// Samples laid out one per column, with their labels peeled off.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSplit {
    /// `1 x N`, the class index of each sample.
    pub labels: Matrix,
    /// `P x N`, one feature vector per column.
    pub features: Matrix,
}

/// Shapes of a split, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShapes {
    pub labels: Shape,
    pub features: Shape,
}

impl LabeledSplit {
    /// Builds a split from sample rows (`label, f0, f1, ...`).
    pub fn from_rows(rows: &Matrix) -> Result<LabeledSplit, DatasetError> {
        if rows.is_empty() {
            return Ok(LabeledSplit {
                labels: Matrix::default(),
                features: Matrix::default(),
            });
        }
        let columns = rows.transpose();
        let labels = columns.select_rows(0..1)?;
        let features = columns.select_rows(1..columns.rows())?;
        Ok(LabeledSplit { labels, features })
    }

    pub fn samples(&self) -> usize {
        self.labels.cols()
    }

    pub fn shapes(&self) -> SplitShapes {
        SplitShapes {
            labels: self.labels.shape(),
            features: self.features.shape(),
        }
    }
}

/// Splits a loaded frame into `(dev, train)`.
///
/// The first `dev_size` rows become the dev set and the rest the train set.
/// An empty train set is allowed; a dev set larger than the frame is not.
pub fn split_frame(
    frame: &Matrix,
    dev_size: usize,
) -> Result<(LabeledSplit, LabeledSplit), DatasetError> {
    if dev_size > frame.rows() {
        return Err(DatasetError::SplitTooLarge {
            requested: dev_size,
            available: frame.rows(),
        });
    }
    let dev = LabeledSplit::from_rows(&frame.select_rows(0..dev_size)?)?;
    let train = LabeledSplit::from_rows(&frame.select_rows(dev_size..frame.rows())?)?;
    Ok((dev, train))
}

/// Divides every feature by `divisor`, e.g. `255.0` for 8-bit pixels.
pub fn scale(features: &Matrix, divisor: f64) -> Matrix {
    features.map(|x| x / divisor)
}
