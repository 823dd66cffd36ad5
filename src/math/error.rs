use crate::math::matrix::Shape;

/// Failures raised by matrix operations.
///
/// Every fallible operation in `math`, `activation` and `network` reports
/// through this type; none of them panic on well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// Operand shapes are incompatible for `op`.
    #[error("{op}: incompatible shapes {left} and {right}")]
    Dimension {
        op: &'static str,
        left: Shape,
        right: Shape,
    },
    /// The empty matrix was passed where a populated one is required.
    #[error("{op}: matrix is empty")]
    Empty { op: &'static str },
    /// A grid whose rows do not all have the same length.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A row range that reaches past the end of the matrix.
    #[error("rows {start}..{end} out of bounds for {rows} rows")]
    RowRange {
        start: usize,
        end: usize,
        rows: usize,
    },
}
