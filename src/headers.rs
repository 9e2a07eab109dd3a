//! Week and day label discovery

use crate::models::Grid;

/// Weekday abbreviations recognised inside day labels
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tues", "Wed", "Thur", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
  /// Week labels in header-row order; index i owns column block i
  pub weeks: Vec<String>,
  /// Day labels in first-seen order
  pub days: Vec<String>,
}

impl Headers {
  pub fn is_day(&self, text: &str) -> bool {
    self.days.iter().any(|d| d == text)
  }
}

/// True for a row whose first cell opens a week header
pub fn is_week_header_row(row: &[String]) -> bool {
  row.first().is_some_and(|c| c.starts_with("Week"))
}

fn is_week_label(cell: &str) -> bool {
  cell.starts_with("week") || cell.starts_with("Week")
}

fn is_day_label(cell: &str) -> bool {
  WEEKDAYS.iter().any(|d| cell.contains(d))
}

/// Extract week labels from the last week-header row and every day label
/// found in column 0.
pub fn extract_headers(grid: &Grid) -> Headers {
  let weeks: Vec<String> = grid
    .rows()
    .iter()
    .rev()
    .find(|row| is_week_header_row(row))
    .map(|row| {
      row
        .iter()
        .filter(|cell| is_week_label(cell))
        .cloned()
        .collect()
    })
    .unwrap_or_default();

  let mut days: Vec<String> = Vec::new();
  for first in grid.rows().iter().filter_map(|row| row.first()) {
    if is_day_label(first) && !days.contains(first) {
      days.push(first.clone());
    }
  }

  log::debug!("Found {} week labels and {} day labels", weeks.len(), days.len());

  Headers { weeks, days }
}
