//! Leading blank column detection
//!
//! Sheets are often laid out one column in from the left edge. When every
//! non-empty row starts with an empty cell that column carries no data and
//! is dropped before any positional decoding.

use crate::models::Grid;

/// Number of leading columns to skip: 1 when column 0 is blank in every
/// non-empty row, otherwise 0.
pub fn column_offset(grid: &Grid) -> usize {
  let mut populated = grid.rows().iter().filter(|row| !row.is_empty()).peekable();

  // A grid with no cells at all has nothing to strip
  if populated.peek().is_none() {
    return 0;
  }

  if populated.all(|row| row[0].is_empty()) {
    1
  } else {
    0
  }
}

/// Return a copy of `grid` with the spurious leading column removed, if any.
pub fn normalize(grid: &Grid) -> Grid {
  if column_offset(grid) == 0 {
    return grid.clone();
  }

  log::debug!("Stripping blank leading column from {} rows", grid.len());

  Grid::new(
    grid
      .rows()
      .iter()
      .map(|row| row.iter().skip(1).cloned().collect())
      .collect(),
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
