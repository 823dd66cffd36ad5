//! CSV loading for digit datasets.
//!
//! Format:
//! - UTF-8, comma-separated
//! - The first row is always a header and is dropped
//! - Double-quoted fields with embedded commas are handled
//! - Blank lines are skipped
//! - Every remaining cell must be numeric and every row the same width
//!
//! For MNIST-style files each row is `label, pixel0, ..., pixel783`.
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::math::error::MatrixError;
use crate::math::matrix::Matrix;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("unable to read input file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV file is not valid UTF-8")]
    Utf8,
    #[error("row {row}, column {col}: '{cell}' is not a valid number")]
    InvalidNumber { row: usize, col: usize, cell: String },
    #[error("row {row}: {found} columns, expected {expected}")]
    RowWidth { row: usize, expected: usize, found: usize },
    #[error("CSV contains no data rows after the header")]
    NoRows,
    #[error("dev set of {requested} rows exceeds the {available} rows available")]
    SplitTooLarge { requested: usize, available: usize },
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads and parses the CSV file at `path`.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Matrix, DatasetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read dataset");
    parse_csv(&bytes)
}

/// Parses CSV bytes into a matrix, one CSV row per matrix row.
pub fn parse_csv(data: &[u8]) -> Result<Matrix, DatasetError> {
    let text = std::str::from_utf8(data).map_err(|_| DatasetError::Utf8)?;

    let mut rows: Vec<Vec<f64>> = Vec::new();

    // Row numbers in errors are 1-based file lines, header included.
    for (line_idx, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row_num = line_idx + 1;

        let cells = parse_csv_row(line);
        let values = parse_floats(&cells, row_num)?;

        if let Some(first) = rows.first() {
            if values.len() != first.len() {
                return Err(DatasetError::RowWidth {
                    row: row_num,
                    expected: first.len(),
                    found: values.len(),
                });
            }
        }
        rows.push(values);
    }

    if rows.is_empty() {
        return Err(DatasetError::NoRows);
    }

    Ok(Matrix::from_data(rows)?)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote inside quoted field.
                    current.push('"');
                    chars.next();
                    continue;
                }
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_floats(cells: &[String], row_num: usize) -> Result<Vec<f64>, DatasetError> {
    cells
        .iter()
        .enumerate()
        .map(|(col, c)| {
            c.trim().parse::<f64>().map_err(|_| DatasetError::InvalidNumber {
                row: row_num,
                col: col + 1,
                cell: c.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_header_and_parses_numbers() {
        let csv = b"label,p0,p1\n7,0,255\n2,\"12\",3.5\n";
        let m = parse_csv(csv).unwrap();
        assert_eq!(
            m.data(),
            &[vec![7.0, 0.0, 255.0], vec![2.0, 12.0, 3.5]]
        );
    }

    #[test]
    fn numeric_first_row_is_still_a_header() {
        let m = parse_csv(b"1,2\n3,4\n").unwrap();
        assert_eq!(m.data(), &[vec![3.0, 4.0]]);
    }

    #[test]
    fn skips_blank_lines() {
        let m = parse_csv(b"a,b\n\n1,2\n\n3,4\n").unwrap();
        assert_eq!(m.rows(), 2);
    }

    #[test]
    fn reports_bad_cell_position() {
        let err = parse_csv(b"a,b\n1,2\n3,x\n").unwrap_err();
        match err {
            DatasetError::InvalidNumber { row, col, cell } => {
                assert_eq!((row, col, cell.as_str()), (3, 2, "x"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_uneven_rows() {
        let err = parse_csv(b"a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, DatasetError::RowWidth { row: 3, expected: 2, found: 1 }));
    }

    #[test]
    fn header_only_is_an_error() {
        assert!(matches!(parse_csv(b"label,p0\n"), Err(DatasetError::NoRows)));
    }

    #[test]
    fn quoted_commas_stay_in_one_field() {
        assert_eq!(parse_csv_row(r#"1,"2,3",4"#), vec!["1", "2,3", "4"]);
        assert_eq!(parse_csv_row(r#""a""b",c"#), vec![r#"a"b"#, "c"]);
    }
}
