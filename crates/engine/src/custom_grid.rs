//! Custom grid boundary - validates and normalizes externally supplied layouts
//!
//! A custom grid arrives as a rectangular-ish matrix of occupancy indicators,
//! usually JSON text such as `[[0,0,1,...],...]`, sometimes wrapped in a
//! markdown code fence. Positive numbers (and `true`) mean occupied; every
//! other value means empty. The engine only ever sees the normalized
//! [`Grid`].

use bricks_core::types::{COLS, INJECTED_COLOR, ROWS};
use bricks_core::Grid;
use serde_json::Value;
use thiserror::Error;

/// How to treat a matrix whose dimensions are not ROWS x COLS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridPolicy {
    /// Reject any dimension mismatch
    Strict,
    /// Pad or trim rows at the top, columns on the right
    #[default]
    Normalize,
}

impl GridPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "normalize" | "normalise" => Some(Self::Normalize),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Normalize => "normalize",
        }
    }
}

#[derive(Debug, Error)]
pub enum CustomGridError {
    #[error("invalid grid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid must be an array of rows")]
    NotAMatrix,
    #[error("grid has no rows")]
    Empty,
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl CustomGridError {
    pub fn code(&self) -> &'static str {
        match self {
            CustomGridError::Json(_) | CustomGridError::NotAMatrix => "invalid_grid",
            CustomGridError::Empty => "empty_grid",
            CustomGridError::RowCount { .. } | CustomGridError::RaggedRow { .. } => {
                "grid_dimensions"
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CustomGridError::Json(_) => "grid text is not valid json",
            CustomGridError::NotAMatrix => "grid must be an array of rows",
            CustomGridError::Empty => "grid has no rows",
            CustomGridError::RowCount { .. } => "grid has the wrong number of rows",
            CustomGridError::RaggedRow { .. } => "grid row has the wrong number of columns",
        }
    }
}

/// Occupancy matrix as supplied, before normalization
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomGrid {
    rows: Vec<Vec<bool>>,
}

impl CustomGrid {
    /// Build from numeric rows; positive values are occupied
    pub fn from_rows<R, I>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = i64>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|v| v > 0).collect())
                .collect(),
        }
    }

    /// Parse JSON text, tolerating a surrounding ``` or ```json fence
    pub fn parse_json(text: &str) -> Result<Self, CustomGridError> {
        let value: Value = serde_json::from_str(strip_code_fence(text))?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Self, CustomGridError> {
        let Value::Array(rows) = value else {
            return Err(CustomGridError::NotAMatrix);
        };
        // A row that is not an array counts as a row with no cells.
        let rows = rows
            .iter()
            .map(|row| match row {
                Value::Array(cells) => cells.iter().map(is_occupied).collect(),
                _ => Vec::new(),
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Convert into an engine grid using `policy` for dimension mismatches.
    ///
    /// Under [`GridPolicy::Normalize`] the bottom of the matrix is kept: extra
    /// rows are dropped from the top and missing rows are added there empty.
    pub fn to_grid(&self, policy: GridPolicy) -> Result<Grid, CustomGridError> {
        if self.rows.is_empty() {
            return Err(CustomGridError::Empty);
        }

        let rows = ROWS as usize;
        let cols = COLS as usize;

        if policy == GridPolicy::Strict {
            if self.rows.len() != rows {
                return Err(CustomGridError::RowCount {
                    expected: rows,
                    actual: self.rows.len(),
                });
            }
            if let Some((row, r)) = self.rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
                return Err(CustomGridError::RaggedRow {
                    row,
                    expected: cols,
                    actual: r.len(),
                });
            }
        }

        let mut occupancy = [[false; COLS as usize]; ROWS as usize];
        let skip = self.rows.len().saturating_sub(rows);
        let offset = rows.saturating_sub(self.rows.len());
        for (i, src) in self.rows.iter().skip(skip).enumerate() {
            let dst = &mut occupancy[offset + i];
            for (cell, &filled) in dst.iter_mut().zip(src.iter()) {
                *cell = filled;
            }
        }

        Ok(Grid::from_occupancy(&occupancy, INJECTED_COLOR))
    }
}

fn is_occupied(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(|v| v > 0.0),
        Value::Bool(b) => *b,
        _ => false,
    }
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse JSON text and normalize it in one step
pub fn parse_grid(text: &str, policy: GridPolicy) -> Result<Grid, CustomGridError> {
    CustomGrid::parse_json(text)?.to_grid(policy)
}
