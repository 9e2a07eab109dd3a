use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One week's prescription and log for an exercise slot.
/// All fields are free text straight from the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
  #[serde(rename = "Prescribed")]
  pub prescribed: String,
  #[serde(rename = "Weight")]
  pub weight: String,
  #[serde(rename = "RPE")]
  pub rpe: String,
  #[serde(rename = "Notes")]
  pub notes: String,
}

/// Value stored under an exercise key: a lift record, or the fixed
/// `{"Rest": 0}` marker for rest days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayEntry {
  Rest(RestMarker),
  Lift(ExerciseRecord),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestMarker {
  #[serde(rename = "Rest")]
  pub rest: u8,
}

impl DayEntry {
  pub fn rest() -> Self {
    DayEntry::Rest(RestMarker { rest: 0 })
  }

  pub fn is_rest(&self) -> bool {
    matches!(self, DayEntry::Rest(_))
  }

  pub fn as_lift(&self) -> Option<&ExerciseRecord> {
    match self {
      DayEntry::Lift(record) => Some(record),
      DayEntry::Rest(_) => None,
    }
  }
}

/// Exercise key -> entry, in sheet row order
pub type DayPlan = IndexMap<String, DayEntry>;
/// Day label -> day plan
pub type WeekPlan = IndexMap<String, DayPlan>;
/// Week label -> week plan
pub type ProgramTree = IndexMap<String, WeekPlan>;

pub const REST_KEY: &str = "Rest";

/// ---------------------------------------------------------------------------
/// Classification
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationTag {
  /// Anchor lift of the day, or first of several sets of a lift
  Primary,
  /// Appears once on the day and does not open it
  Accessory,
  /// Second or later occurrence of a lift on the same day
  Backdown,
  Rest,
}

impl ClassificationTag {
  fn suffix(self) -> Option<&'static str> {
    match self {
      Self::Accessory => Some(" (Accessory)"),
      Self::Backdown => Some(" (Backdown)"),
      Self::Primary | Self::Rest => None,
    }
  }

  /// Tree key for an exercise carrying this tag
  pub fn key_for(self, name: &str) -> String {
    match self {
      Self::Rest => REST_KEY.to_string(),
      _ => match self.suffix() {
        Some(suffix) => format!("{}{}", name, suffix),
        None => name.to_string(),
      },
    }
  }

  /// Split a tree key back into its base name and tag
  pub fn from_key(key: &str) -> (&str, Self) {
    if key == REST_KEY {
      return (key, Self::Rest);
    }
    for tag in [Self::Backdown, Self::Accessory] {
      if let Some(base) = tag.suffix().and_then(|s| key.strip_suffix(s)) {
        return (base, tag);
      }
    }
    (key, Self::Primary)
  }
}

impl std::fmt::Display for ClassificationTag {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Primary => write!(f, "primary"),
      Self::Accessory => write!(f, "accessory"),
      Self::Backdown => write!(f, "backdown"),
      Self::Rest => write!(f, "rest"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_key_round_trip_through_tags() {
    assert_eq!(ClassificationTag::Backdown.key_for("Squat"), "Squat (Backdown)");
    assert_eq!(ClassificationTag::from_key("Squat (Backdown)"), ("Squat", ClassificationTag::Backdown));
    assert_eq!(ClassificationTag::from_key("Curl (Accessory)"), ("Curl", ClassificationTag::Accessory));
    assert_eq!(ClassificationTag::from_key("Bench"), ("Bench", ClassificationTag::Primary));
    assert_eq!(ClassificationTag::from_key("Rest"), ("Rest", ClassificationTag::Rest));
  }

  #[test]
  fn test_day_entry_json_shapes() {
    let lift = DayEntry::Lift(ExerciseRecord {
      prescribed: "5x5".into(),
      weight: "225".into(),
      rpe: "8".into(),
      notes: String::new(),
    });
    assert_eq!(
      serde_json::to_value(&lift).unwrap(),
      json!({ "Prescribed": "5x5", "Weight": "225", "RPE": "8", "Notes": "" })
    );
    assert_eq!(serde_json::to_value(DayEntry::rest()).unwrap(), json!({ "Rest": 0 }));

    let parsed: DayEntry = serde_json::from_value(json!({ "Rest": 0 })).unwrap();
    assert!(parsed.is_rest());
    let parsed: DayEntry = serde_json::from_value(json!({
      "Prescribed": "3x3", "Weight": "", "RPE": "", "Notes": ""
    }))
    .unwrap();
    assert_eq!(parsed.as_lift().map(|r| r.prescribed.as_str()), Some("3x3"));
  }
}
