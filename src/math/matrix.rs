use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::ops::Range;

use crate::math::error::MatrixError;

/// Row/column extents of a `Matrix`. Displays as `(RxC)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Shape {
        Shape { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}x{})", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape { rows, cols }
    }
}

/// A dense, row-major grid of `f64`.
///
/// Only the grid is stored; `rows()` and `cols()` are read off it, so they
/// can never disagree with the actual extents. Every constructor checks that
/// all rows have the same length. A matrix with no rows (or no columns) is
/// the empty state, which `multiply` and `add_broadcast_column` reject.
/// Constructors collapse a zero-width grid to no rows at all, so there is a
/// single empty value and it equals `Matrix::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::from_grid(vec![vec![0.0; cols]; rows])
    }

    /// Wraps a grid already known to be rectangular.
    fn from_grid(data: Vec<Vec<f64>>) -> Matrix {
        if data.first().map_or(true, Vec::is_empty) {
            return Matrix::default();
        }
        Matrix { data }
    }

    /// Wraps an existing grid, rejecting ragged rows.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        if let Some(first) = data.first() {
            let expected = first.len();
            if let Some((row, found)) = data
                .iter()
                .map(Vec::len)
                .enumerate()
                .find(|&(_, len)| len != expected)
            {
                return Err(MatrixError::RaggedRows { row, expected, found });
            }
        }
        Ok(Matrix::from_grid(data))
    }

    /// Fills a `rows x cols` matrix with values drawn uniformly from `[low, high)`.
    ///
    /// A `seed` makes the fill reproducible; `None` seeds from OS entropy.
    /// Panics if `low >= high`.
    pub fn random_uniform(
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
        seed: Option<u64>,
    ) -> Matrix {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let data = (0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_range(low..high)).collect())
            .collect();
        Matrix::from_grid(data)
    }

    /// Initial weights and biases: uniform on `[-0.5, 0.5)`.
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> Matrix {
        Matrix::random_uniform(rows, cols, -0.5, 0.5, seed)
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    pub fn cols(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows(), self.cols())
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.data.get(row).map(Vec::as_slice)
    }

    /// Copies out column `col`; `None` if it does not exist.
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col >= self.cols() {
            return None;
        }
        Some(self.data.iter().map(|row| row[col]).collect())
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Vec<f64>> {
        self.data
    }

    /// Returns `self + bias` where `bias` is a single column added to every
    /// column of `self`: `out[i][j] = self[i][j] + bias[i][0]`.
    pub fn add_broadcast_column(&self, bias: &Matrix) -> Result<Matrix, MatrixError> {
        const OP: &str = "add_broadcast_column";
        if self.is_empty() {
            return Err(MatrixError::Empty { op: OP });
        }
        if bias.cols() != 1 || bias.rows() != self.rows() {
            return Err(MatrixError::Dimension {
                op: OP,
                left: self.shape(),
                right: bias.shape(),
            });
        }

        let data = self
            .data
            .iter()
            .zip(bias.data.iter())
            .map(|(row, b)| row.iter().map(|x| x + b[0]).collect())
            .collect();
        Ok(Matrix { data })
    }

    /// Standard matrix product `self * other`, shape `(self.rows, other.cols)`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        const OP: &str = "multiply";
        if self.is_empty() || other.is_empty() {
            return Err(MatrixError::Empty { op: OP });
        }
        if self.cols() != other.rows() {
            return Err(MatrixError::Dimension {
                op: OP,
                left: self.shape(),
                right: other.shape(),
            });
        }

        let mut res = Matrix::zeros(self.rows(), other.cols());

        // i-k-j order walks both `other` and the output row contiguously.
        for (out_row, lhs_row) in res.data.iter_mut().zip(self.data.iter()) {
            for (&a, rhs_row) in lhs_row.iter().zip(other.data.iter()) {
                for (out, &b) in out_row.iter_mut().zip(rhs_row.iter()) {
                    *out += a * b;
                }
            }
        }

        Ok(res)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols(), self.rows());

        for (j, row) in self.data.iter().enumerate() {
            for (i, &x) in row.iter().enumerate() {
                res.data[i][j] = x;
            }
        }

        res
    }

    /// Replaces the grid with its transpose.
    pub fn transpose_in_place(&mut self) {
        *self = self.transpose();
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Copies rows `range` into a new matrix.
    pub fn select_rows(&self, range: Range<usize>) -> Result<Matrix, MatrixError> {
        if range.start > range.end || range.end > self.rows() {
            return Err(MatrixError::RowRange {
                start: range.start,
                end: range.end,
                rows: self.rows(),
            });
        }
        Ok(Matrix {
            data: self.data[range].to_vec(),
        })
    }

    /// Writes one row per line, e.g. `[1 2 3]`.
    pub fn pretty_print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.data {
            let cells: Vec<String> = row.iter().map(|x| x.to_string()).collect();
            writeln!(out, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(data: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_data(data)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(data: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_data(data).unwrap()
    }

    #[test]
    fn shape_reads_grid_extents() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(a.shape(), Shape::new(2, 3));
        assert_eq!(a.shape().to_string(), "(2x3)");
        assert_eq!(Matrix::default().shape(), Shape::new(0, 0));
    }

    #[test]
    fn from_data_rejects_ragged_rows() {
        let err = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRows { row: 1, expected: 2, found: 1 }
        );
    }

    #[test]
    fn multiply_computes_product() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = m(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c, m(vec![vec![58.0, 64.0], vec![139.0, 154.0]]));
        // operands untouched
        assert_eq!(a.shape(), Shape::new(2, 3));
        assert_eq!(b.shape(), Shape::new(3, 2));
    }

    #[test]
    fn multiply_rejects_inner_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        assert_eq!(
            a.multiply(&b),
            Err(MatrixError::Dimension {
                op: "multiply",
                left: Shape::new(2, 3),
                right: Shape::new(2, 3),
            })
        );
    }

    #[test]
    fn multiply_rejects_empty_receiver() {
        let b = Matrix::zeros(2, 2);
        assert_eq!(
            Matrix::default().multiply(&b),
            Err(MatrixError::Empty { op: "multiply" })
        );
    }

    #[test]
    fn broadcast_adds_bias_per_row() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let bias = m(vec![vec![10.0], vec![-1.0]]);
        let out = a.add_broadcast_column(&bias).unwrap();
        assert_eq!(out, m(vec![vec![11.0, 12.0], vec![2.0, 3.0]]));
    }

    #[test]
    fn broadcast_rejects_row_mismatch() {
        let a = Matrix::zeros(3, 3);
        let bias = Matrix::zeros(2, 1);
        assert!(matches!(
            a.add_broadcast_column(&bias),
            Err(MatrixError::Dimension { .. })
        ));
    }

    #[test]
    fn broadcast_rejects_multi_column_bias() {
        let a = Matrix::zeros(3, 3);
        let bias = Matrix::zeros(3, 2);
        assert!(matches!(
            a.add_broadcast_column(&bias),
            Err(MatrixError::Dimension { .. })
        ));
    }

    #[test]
    fn transpose_swaps_axes() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t, m(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]));
        assert_eq!(Matrix::default().transpose(), Matrix::default());
    }

    #[test]
    fn zero_width_grids_are_the_empty_matrix() {
        let from_rows = m(vec![vec![], vec![], vec![]]);
        assert_eq!(from_rows, Matrix::default());
        assert_eq!(Matrix::zeros(3, 0), Matrix::default());
        assert_eq!(Matrix::zeros(0, 3), Matrix::default());
        assert_eq!(Matrix::random(2, 0, Some(1)), Matrix::default());
        assert_eq!(from_rows.shape(), Shape::new(0, 0));
        assert_eq!(from_rows.transpose().transpose(), from_rows);
    }

    #[test]
    fn transpose_in_place_replaces_grid() {
        let mut a = m(vec![vec![1.0, 2.0, 3.0]]);
        a.transpose_in_place();
        assert_eq!(a.shape(), Shape::new(3, 1));
        assert_eq!(a.column(0), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn random_is_seeded_and_bounded() {
        let a = Matrix::random(10, 784, Some(7));
        let b = Matrix::random(10, 784, Some(7));
        assert_eq!(a, b);
        assert!(a.data().iter().flatten().all(|&x| (-0.5..0.5).contains(&x)));
    }

    #[test]
    fn select_rows_checks_bounds() {
        let a = m(vec![vec![1.0], vec![2.0], vec![3.0]]);
        assert_eq!(a.select_rows(1..3).unwrap(), m(vec![vec![2.0], vec![3.0]]));
        assert!(a.select_rows(2..4).is_err());
    }

    #[test]
    fn pretty_print_writes_rows() {
        let a = m(vec![vec![1.0, 2.5], vec![-3.0, 0.0]]);
        let mut out = Vec::new();
        a.pretty_print(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[1 2.5]\n[-3 0]\n");
    }

    #[test]
    fn deserialize_validates_grid() {
        let ok: Matrix = serde_json::from_str("[[1.0,2.0],[3.0,4.0]]").unwrap();
        assert_eq!(ok.shape(), Shape::new(2, 2));
        assert!(serde_json::from_str::<Matrix>("[[1.0,2.0],[3.0]]").is_err());
    }
}
