use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Logged field an edit targets, with its column distance from the week label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
  #[serde(rename = "weightTaken")]
  WeightTaken,
  #[serde(rename = "actual_rpe")]
  ActualRpe,
  #[serde(rename = "notes")]
  Notes,
}

impl Field {
  /// Offset of the field from the week-label column, in 1-based column terms
  pub fn column_jump(self) -> usize {
    match self {
      Field::WeightTaken => 3,
      Field::ActualRpe => 4,
      Field::Notes => 5,
    }
  }
}

/// Identifies the one grid cell an edit refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditTarget {
  pub field: Field,
  pub day: String,
  pub week: String,
  pub exercise: String,
  pub prescribed: String,
}

/// Body of a write-back request.
///
/// `raw_data` stays as JSON so a malformed grid is reported as such instead
/// of as a generic decode failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteBackRequest {
  pub spreadsheet_id: String,
  pub new_value: Value,
  #[serde(flatten)]
  pub target: EditTarget,
  pub raw_data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WriteBackResponse {
  pub coordinate: String,
  pub updated_range: Option<String>,
  pub updated_cells: Option<u32>,
}
