//! Coordinate Resolver
//!
//! Maps an edit on the program tree back to the single sheet cell it came
//! from. Works on the raw grid as exported, so it recomputes the blank-column
//! offset and week column positions itself.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::models::{ClassificationTag, EditTarget, Grid};
use crate::normalize::column_offset;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
  #[error("Week '{0}' not found in the week header row")]
  WeekNotFound(String),

  #[error("No row for '{exercise}' prescribed '{prescribed}' under {day}")]
  CoordinateNotFound {
    day: String,
    exercise: String,
    prescribed: String,
  },
}

/// ---------------------------------------------------------------------------
/// A1 Coordinates
/// ---------------------------------------------------------------------------

/// A single sheet cell. Both indices are 1-based, as in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoordinate {
  pub row: usize,
  pub column: usize,
}

impl CellCoordinate {
  pub fn to_a1(&self) -> String {
    format!("{}{}", column_letter(self.column), self.row)
  }
}

impl fmt::Display for CellCoordinate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_a1())
  }
}

impl Serialize for CellCoordinate {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_a1())
  }
}

/// Column letters for a 1-based column number (1 -> A, 26 -> Z, 27 -> AA)
pub fn column_letter(column: usize) -> String {
  let mut letters = Vec::new();
  let mut n = column;

  while n > 0 {
    n -= 1;
    letters.push((b'A' + (n % 26) as u8) as char);
    n /= 26;
  }

  letters.iter().rev().collect()
}

/// ---------------------------------------------------------------------------
/// Resolution
/// ---------------------------------------------------------------------------

/// Column index of each week label, taken from rows up to and including the
/// first row holding more than one week label.
fn week_columns(grid: &Grid) -> HashMap<&str, usize> {
  let mut positions = HashMap::new();

  for row in grid.rows().iter().filter(|row| !row.is_empty()) {
    let mut week_count = 0;
    for (col, cell) in row.iter().enumerate() {
      if cell.starts_with("Week") {
        positions.insert(cell.as_str(), col);
        week_count += 1;
      }
    }
    if week_count > 1 {
      break;
    }
  }

  positions
}

/// Find the cell holding `target.field` for the requested lift.
pub fn resolve(target: &EditTarget, grid: &Grid) -> Result<CellCoordinate, ResolveError> {
  let offset = column_offset(grid);

  let week_start = week_columns(grid)
    .get(target.week.as_str())
    .copied()
    .ok_or_else(|| ResolveError::WeekNotFound(target.week.clone()))?;

  let field_column = week_start + target.field.column_jump();
  let prescribed_column = week_start + 1;

  // Edits arrive keyed by tree key; the sheet only holds the base name.
  // An accessory-looking key may also be a primary lift whose sheet name
  // carries the suffix literally.
  let (exercise, tag) = ClassificationTag::from_key(&target.exercise);
  let matches_name = |label: &str| {
    label == exercise || (tag == ClassificationTag::Accessory && label == target.exercise)
  };

  let mut day_active = false;
  for (i, row) in grid.rows().iter().enumerate() {
    let label = grid.cell(i, offset);

    if label == target.day {
      day_active = true;
      log::debug!("Found day {} at row {}", target.day, i + 1);
    }

    if day_active && matches_name(label) && grid.cell(i, prescribed_column) == target.prescribed {
      log::debug!("Matched {} at row {} ({} cells)", label, i + 1, row.len());
      return Ok(CellCoordinate {
        row: i + 1,
        column: field_column,
      });
    }
  }

  Err(ResolveError::CoordinateNotFound {
    day: target.day.clone(),
    exercise: target.exercise.clone(),
    prescribed: target.prescribed.clone(),
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
