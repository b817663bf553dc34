//! Numeric tables loaded from plain-text data files.
//!
//! A data file holds one row per line with whitespace-separated values.
//! Text after `#` is a comment and blank lines are skipped.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

const COMMENT: char = '#';

/// A dense table of `f64` values in row-major order.
///
/// The shape is squeezed: a single row or a single column loads as a 1-D
/// table and a single value loads as a scalar with an empty shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl Table {
    /// Builds a table from rows that all have the same length.
    ///
    /// Callers must pass rectangular rows; [`parse_table`] checks this for
    /// text input.
    fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);

        let shape = match (nrows, ncols) {
            (0, _) => vec![0],
            (1, 1) => Vec::new(),
            (1, c) => vec![c],
            (r, 1) => vec![r],
            (r, c) => vec![r, c],
        };

        Self {
            shape,
            values: rows.into_iter().flatten().collect(),
        }
    }

    /// Dimension sizes of the table.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_table(s)
    }
}

/// Formats a shape the way it is printed in diagnostics, e.g. `(2, 3)`.
pub struct ShapeDisplay<'a>(pub &'a [usize]);

impl fmt::Display for ShapeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => write!(f, "()"),
            [n] => write!(f, "({n},)"),
            dims => {
                let parts: Vec<String> = dims.iter().map(ToString::to_string).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

/// Parses whitespace-delimited numeric text into a table.
pub fn parse_table(content: &str) -> Result<Table> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let data = raw.split_once(COMMENT).map_or(raw, |(data, _)| data);

        let row = data
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| Error::Parse {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if row.is_empty() {
            continue;
        }

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(Error::InconsistentColumns {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }

        rows.push(row);
    }

    Ok(Table::from_rows(rows))
}

/// Reads and parses a data file.
pub fn load_table(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_table(&content)?;
    log::debug!(
        "loaded {}: shape {}",
        path.display(),
        ShapeDisplay(table.shape())
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_matrix() {
        let table = parse_table("1.0 2.0 3.0\n4.0 5.0 6.0\n").unwrap();
        assert_eq!(table.shape(), &[2, 3]);
        assert_eq!(table.values(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_single_column_is_one_dimensional() {
        let table = parse_table("1\n2\n3\n4\n").unwrap();
        assert_eq!(table.shape(), &[4]);
    }

    #[test]
    fn test_single_row_is_one_dimensional() {
        let table = parse_table("1 2 3 4").unwrap();
        assert_eq!(table.shape(), &[4]);
    }

    #[test]
    fn test_single_value_is_scalar() {
        let table = parse_table("1.05\n").unwrap();
        assert!(table.shape().is_empty());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let table = parse_table("\n# nothing here\n").unwrap();
        assert_eq!(table.shape(), &[0]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let content = "# time  field\n\n0.0  1.5e-3 # first\n\t1.0\t-2E+01\n";
        let table = parse_table(content).unwrap();
        assert_eq!(table.shape(), &[2, 2]);
        assert_eq!(table.values(), &[0.0, 1.5e-3, 1.0, -20.0]);
    }

    #[test]
    fn test_special_values() {
        let table = parse_table("nan inf -inf").unwrap();
        let values = table.values();
        assert!(values[0].is_nan());
        assert_eq!(values[1], f64::INFINITY);
        assert_eq!(values[2], f64::NEG_INFINITY);
    }

    #[test]
    fn test_non_numeric_token() {
        let err = parse_table("1.0 2.0\n3.0 abc\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, ref token } if token == "abc"));
    }

    #[test]
    fn test_ragged_rows() {
        let err = parse_table("1 2 3\n\n4 5\n").unwrap_err();
        assert!(matches!(
            err,
            Error::InconsistentColumns {
                line: 3,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_from_str() {
        let table: Table = "1 2\n3 4".parse().unwrap();
        assert_eq!(table.shape(), &[2, 2]);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(ShapeDisplay(&[]).to_string(), "()");
        assert_eq!(ShapeDisplay(&[4]).to_string(), "(4,)");
        assert_eq!(ShapeDisplay(&[2, 3]).to_string(), "(2, 3)");
    }

    #[test]
    fn test_load_table_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0 2.0\n3.0 4.0").unwrap();
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.shape(), &[2, 2]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_table(Path::new("/nonexistent/pydiff/data.dat")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/pydiff/data.dat"));
    }
}
