//! Test utilities and fixtures shared by unit tests
//!
//! - Grid builders
//! - A two-week sample program laid out one column in from the sheet edge
//! - Request body factories

use serde_json::{json, Value};

use crate::models::{DayEntry, EditTarget, ExerciseRecord, Field, Grid};

/// ---------------------------------------------------------------------------
/// Grid Builders
/// ---------------------------------------------------------------------------

/// Build a grid from string slices
pub fn grid(rows: &[&[&str]]) -> Grid {
  rows.iter().map(|row| row.to_vec()).collect()
}

pub fn lift(prescribed: &str, weight: &str, rpe: &str, notes: &str) -> DayEntry {
  DayEntry::Lift(ExerciseRecord {
    prescribed: prescribed.to_string(),
    weight: weight.to_string(),
    rpe: rpe.to_string(),
    notes: notes.to_string(),
  })
}

/// Two weeks, three days, blank column A. Sheet rows:
///
/// ```text
///  1  Week1 / Week2 header
///  2  Monday (1st Squat)
///  3  Squat 1x4 | Squat 1x3
///  4  Squat 3x5 | Squat 3x4
///  5  Romanian Deadlift 3x8 | Romanian Deadlift 3x8 (no weight yet)
///  6  Wednesday (Rest)
///  7  Rest
///  8  Friday (2nd BP)
///  9  Bench 1x3 | Bench 1x2
/// 10  Close Grip Bench 3x6 | Close Grip Bench 3x6
/// 11  Bench 4x4 | Bench 4x3
/// ```
pub fn sample_program_grid() -> Grid {
  grid(&[
    &["", "Week1", "", "", "", "", "Week2", "", "", "", ""],
    &["", "Monday (1st Squat)"],
    &["", "Squat", "1x4", "220", "5", "Felt solid", "Squat", "1x3", "225", "6", ""],
    &["", "Squat", "3x5", "200", "5", "", "Squat", "3x4", "205", "6", ""],
    &["", "Romanian Deadlift", "3x8", "185", "7", "", "Romanian Deadlift", "3x8", "", "", ""],
    &["", "Wednesday (Rest)"],
    &["", "Rest"],
    &["", "Friday (2nd BP)"],
    &["", "Bench", "1x3", "230", "7", "", "Bench", "1x2"],
    &["", "Close Grip Bench", "3x6", "195", "7", "", "Close Grip Bench", "3x6"],
    &["", "Bench", "4x4", "205", "6", "", "Bench", "4x3"],
  ])
}

/// ---------------------------------------------------------------------------
/// Request Factories
/// ---------------------------------------------------------------------------

pub fn edit_target(field: Field, day: &str, week: &str, exercise: &str, prescribed: &str) -> EditTarget {
  EditTarget {
    field,
    day: day.to_string(),
    week: week.to_string(),
    exercise: exercise.to_string(),
    prescribed: prescribed.to_string(),
  }
}

/// Write-back body as the client sends it
pub fn write_back_body(
  field: &str,
  new_value: Value,
  day: &str,
  week: &str,
  exercise: &str,
  prescribed: &str,
  raw: &Grid,
) -> Value {
  json!({
    "spreadsheetId": "sheet-1",
    "field": field,
    "newValue": new_value,
    "day": day,
    "week": week,
    "exercise": exercise,
    "prescribed": prescribed,
    "rawData": { "range": "Sheet1!A1:U58", "majorDimension": "ROWS", "values": raw }
  })
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sample_grid_layout() {
    let g = sample_program_grid();
    assert_eq!(g.len(), 11);
    assert!(g.rows().iter().all(|row| row[0].is_empty()));
    assert_eq!(g.cell(0, 6), "Week2");
    assert_eq!(g.cell(10, 7), "4x3");
  }

  #[test]
  fn test_write_back_body_embeds_grid() {
    let body = write_back_body("notes", json!("ok"), "Mon", "Week1", "Squat", "5x5", &grid(&[&["Week1"]]));
    assert_eq!(body["rawData"]["values"], json!([["Week1"]]));
    assert_eq!(body["field"], "notes");
  }
}
