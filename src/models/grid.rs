use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A jagged grid of text cells as exported by the spreadsheet service.
///
/// Rows may differ in length. Reading past the end of a row yields an empty
/// cell rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
  rows: Vec<Vec<String>>,
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
  #[error("Malformed input: {0}")]
  MalformedInput(String),
}

impl Grid {
  pub fn new(rows: Vec<Vec<String>>) -> Self {
    Self { rows }
  }

  pub fn rows(&self) -> &[Vec<String>] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Cell text at (row, col), empty when either index is out of range
  pub fn cell(&self, row: usize, col: usize) -> &str {
    self
      .rows
      .get(row)
      .and_then(|r| r.get(col))
      .map(String::as_str)
      .unwrap_or("")
  }

  /// Decode the `values` member of a request body.
  ///
  /// Scalars are accepted as text (numbers and booleans keep their JSON
  /// spelling, `null` becomes an empty cell). Anything that is not an array
  /// of arrays of scalars is rejected.
  pub fn from_payload(payload: &Value) -> Result<Self, GridError> {
    let values = payload
      .get("values")
      .ok_or_else(|| GridError::MalformedInput("missing `values`".into()))?;
    Self::from_values(values)
  }

  pub fn from_values(values: &Value) -> Result<Self, GridError> {
    let rows = values
      .as_array()
      .ok_or_else(|| GridError::MalformedInput("`values` is not an array of rows".into()))?;

    let mut grid = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
      let cells = row
        .as_array()
        .ok_or_else(|| GridError::MalformedInput(format!("row {} is not an array", i)))?;

      let mut decoded = Vec::with_capacity(cells.len());
      for (j, cell) in cells.iter().enumerate() {
        decoded.push(cell_text(cell).ok_or_else(|| {
          GridError::MalformedInput(format!("cell ({}, {}) is not a scalar", i, j))
        })?);
      }
      grid.push(decoded);
    }

    Ok(Self::new(grid))
  }
}

fn cell_text(cell: &Value) -> Option<String> {
  match cell {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Null => Some(String::new()),
    Value::Array(_) | Value::Object(_) => None,
  }
}

impl<S: Into<String>> FromIterator<Vec<S>> for Grid {
  fn from_iter<I: IntoIterator<Item = Vec<S>>>(iter: I) -> Self {
    Self::new(
      iter
        .into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect(),
    )
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
