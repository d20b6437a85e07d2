//! Scalar grids loaded from snapshot files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HeatreelError, Result};

/// A rectangular grid of scalar values, stored row-major.
///
/// Row 0 is the first line of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl Grid {
    /// Creates a grid from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`HeatreelError::SizeMismatch`] if `values.len() != width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
        let expected = width * height;
        if values.len() != expected {
            return Err(HeatreelError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Creates a grid from a list of equally long rows.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let values: Vec<f32> = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect();
        Self::new(width, rows.len(), values)
    }

    /// Creates a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }

    /// Parses whitespace-delimited text.
    ///
    /// Everything after a `#` is a comment. Lines left blank are skipped;
    /// every remaining line is a row and must have as many numbers as the
    /// first one.
    pub fn parse(text: &str) -> Result<Self> {
        parse_grid(text, Path::new("<memory>"))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the value at column `x`, row `y`.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.values[y * self.width + x])
        } else {
            None
        }
    }

    /// Returns the smallest and largest non-NaN values, if any.
    #[must_use]
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Loads a grid from a whitespace-delimited text file.
///
/// # Errors
///
/// Fails if the file cannot be read, holds a non-numeric token, has rows of
/// differing length, or has no data rows at all.
pub fn load_grid(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path).map_err(|source| HeatreelError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_grid(&text, path)?;
    log::debug!(
        "loaded '{}' ({}x{})",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

fn parse_grid(text: &str, path: &Path) -> Result<Grid> {
    let mut width = None;
    let mut height = 0;
    let mut values = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let data = line.split_once('#').map_or(line, |(data, _)| data);
        let trimmed = data.trim();
        if trimmed.is_empty() {
            continue;
        }

        let row_start = values.len();
        for (col_idx, token) in trimmed.split_whitespace().enumerate() {
            let value = token.parse::<f64>().map_err(|_| HeatreelError::Parse {
                path: PathBuf::from(path),
                line: line_idx + 1,
                column: col_idx + 1,
                token: token.to_string(),
            })?;
            #[allow(clippy::cast_possible_truncation)]
            values.push(value as f32);
        }

        let row_len = values.len() - row_start;
        match width {
            None => width = Some(row_len),
            Some(expected) if expected != row_len => {
                return Err(HeatreelError::RaggedRow {
                    path: PathBuf::from(path),
                    line: line_idx + 1,
                    expected,
                    actual: row_len,
                });
            }
            Some(_) => {}
        }
        height += 1;
    }

    match width {
        Some(width) => Grid::new(width, height, values),
        None => Err(HeatreelError::EmptyGrid {
            path: PathBuf::from(path),
        }),
    }
}
