//! Parses the initial grid of labels from the board-file text format.
//!
//! ```text
//! <rows>x<cols>
//! <label_1>
//! <label_2>
//! ...
//! <label_{rows*cols}>
//! ```
//!
//! Labels are read left-to-right, top-to-bottom; empty lines are ignored.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardLoadError {
    #[error("could not read board file: {0}")]
    Io(#[from] std::io::Error),
    #[error("board file is empty")]
    EmptyInput,
    #[error("malformed dimensions header: {0:?}")]
    BadHeader(String),
    #[error("expected {expected} labels, found {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },
}

/// Parses board text into row-major labels, ready for [`crate::Grid::new`].
pub fn parse_board(text: &str) -> Result<Vec<Vec<String>>, BoardLoadError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines.next().ok_or(BoardLoadError::EmptyInput)?;
    let (rows_str, cols_str) = header
        .split_once('x')
        .ok_or_else(|| BoardLoadError::BadHeader(header.to_string()))?;
    let rows: usize = rows_str
        .parse()
        .map_err(|_| BoardLoadError::BadHeader(header.to_string()))?;
    let cols: usize = cols_str
        .parse()
        .map_err(|_| BoardLoadError::BadHeader(header.to_string()))?;

    let labels: Vec<&str> = lines.collect();
    let expected = rows * cols;
    if labels.len() != expected {
        return Err(BoardLoadError::LabelCountMismatch {
            expected,
            actual: labels.len(),
        });
    }

    let mut grid = Vec::with_capacity(rows);
    let mut remaining = labels.into_iter();
    for _ in 0..rows {
        let row = remaining.by_ref().take(cols).map(str::to_string).collect();
        grid.push(row);
    }
    Ok(grid)
}

/// Reads and parses a board file from disk.
pub async fn load_board(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>, BoardLoadError> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_board(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literal_example() {
        let grid = parse_board("2x2\nA\nB\nB\nA\n").unwrap();
        assert_eq!(
            grid,
            vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["B".to_string(), "A".to_string()],
            ]
        );
    }

    #[test]
    fn ignores_blank_lines() {
        let grid = parse_board("2x1\n\nA\n\nB\n\n").unwrap();
        assert_eq!(grid, vec![vec!["A".to_string()], vec!["B".to_string()]]);
    }

    #[test]
    fn rejects_wrong_label_count() {
        let err = parse_board("2x2\nA\nB\nB\n").unwrap_err();
        assert!(matches!(err, BoardLoadError::LabelCountMismatch { expected: 4, actual: 3 }));
    }

    #[test]
    fn rejects_bad_header() {
        assert!(parse_board("not-a-header\nA\n").is_err());
        assert!(parse_board("").is_err());
    }
}
