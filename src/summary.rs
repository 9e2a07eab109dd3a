//! Day view of a parsed program: flat exercise list plus completion stats

use serde::{Deserialize, Serialize};

use crate::models::program::REST_KEY;
use crate::models::{DayEntry, ProgramTree};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayExercise {
  pub id: String,
  pub exercise: String,
  pub prescribed: String,
  pub weight: String,
  pub rpe: String,
  pub notes: String,
  pub sets: u32,
  pub reps: u32,
  pub original_index: usize,
}

/// Competition lifts counted by `DayStats::main_lifts`
pub const MAIN_LIFTS: [&str; 3] = ["Squat", "Bench", "Deadlift"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
  pub total_exercises: usize,
  pub total_sets: u32,
  pub completed_sets: usize,
  pub completion_percentage: u32,
  pub is_rest_day: bool,
  /// Sum of weight x sets x reps over lifts with a logged weight
  pub total_volume: f64,
  pub main_lifts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
  pub exercises: Vec<DayExercise>,
  pub stats: DayStats,
  pub top_sets: Vec<DayExercise>,
  pub backdown_sets: Vec<DayExercise>,
}

/// Leading set count of a prescription like `3x5`.
/// Empty and rest prescriptions have no sets; anything unrecognised is one set.
pub fn parse_sets(prescribed: &str) -> u32 {
  if prescribed.is_empty() || prescribed == REST_KEY {
    return 0;
  }
  match prescribed.split_once('x') {
    Some((sets, _)) if sets.chars().all(|c| c.is_ascii_digit()) => sets.parse().unwrap_or(1),
    _ => 1,
  }
}

/// Rep count following the first `x` in a prescription like `3x5`
pub fn parse_reps(prescribed: &str) -> u32 {
  if prescribed.is_empty() || prescribed == REST_KEY {
    return 0;
  }
  prescribed
    .match_indices('x')
    .find_map(|(i, _)| leading_number(&prescribed[i + 1..]))
    .unwrap_or(1)
}

fn leading_number(s: &str) -> Option<u32> {
  let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
  digits.parse().ok()
}

/// Leading decimal of a logged weight like `102.5kg`
pub fn parse_weight(weight: &str) -> Option<f64> {
  let trimmed = weight.trim_start();
  let mut seen_point = false;
  let end = trimmed
    .char_indices()
    .find(|&(i, c)| match c {
      '0'..='9' => false,
      '-' | '+' => i != 0,
      '.' if !seen_point => {
        seen_point = true;
        false
      }
      _ => true,
    })
    .map_or(trimmed.len(), |(i, _)| i);

  trimmed[..end].parse().ok()
}

/// Flatten one (week, day) of the tree, in sheet order
pub fn day_exercises(tree: &ProgramTree, week: &str, day: &str) -> Vec<DayExercise> {
  let Some(plan) = tree.get(week).and_then(|w| w.get(day)) else {
    return Vec::new();
  };

  plan
    .iter()
    .enumerate()
    .map(|(index, (key, entry))| match entry {
      DayEntry::Rest(_) => DayExercise {
        id: format!("{}-{}-rest", week, day),
        exercise: REST_KEY.to_string(),
        prescribed: REST_KEY.to_string(),
        weight: String::new(),
        rpe: String::new(),
        notes: "Rest Day".to_string(),
        sets: 0,
        reps: 0,
        original_index: index,
      },
      DayEntry::Lift(record) => DayExercise {
        id: format!("{}-{}-{}-{}", week, day, key, index),
        exercise: key.clone(),
        prescribed: record.prescribed.clone(),
        weight: record.weight.clone(),
        rpe: record.rpe.clone(),
        notes: record.notes.clone(),
        sets: parse_sets(&record.prescribed),
        reps: parse_reps(&record.prescribed),
        original_index: index,
      },
    })
    .collect()
}

pub fn day_stats(exercises: &[DayExercise]) -> DayStats {
  let total_sets: u32 = exercises.iter().map(|e| e.sets).sum();
  let completed_sets = exercises.iter().filter(|e| !e.weight.is_empty()).count();

  let completion_percentage = if total_sets > 0 {
    ((completed_sets as f64 / total_sets as f64) * 100.0).round() as u32
  } else {
    0
  };

  let total_volume = exercises
    .iter()
    .filter_map(|e| parse_weight(&e.weight).map(|w| w * f64::from(e.sets) * f64::from(e.reps)))
    .sum();

  DayStats {
    total_exercises: exercises.iter().filter(|e| e.exercise != REST_KEY).count(),
    total_sets,
    completed_sets,
    completion_percentage,
    is_rest_day: exercises.iter().any(|e| e.exercise == REST_KEY),
    total_volume,
    main_lifts: exercises
      .iter()
      .filter(|e| MAIN_LIFTS.contains(&e.exercise.as_str()))
      .count(),
  }
}

/// Separate backdown work from top sets. Rest entries stay with the top sets.
pub fn split_backdowns(exercises: &[DayExercise]) -> (Vec<DayExercise>, Vec<DayExercise>) {
  exercises.iter().cloned().partition(|e| {
    let name = e.exercise.to_lowercase();
    !(name.contains("backdown") || name.contains("back down"))
  })
}

pub fn summarize_day(tree: &ProgramTree, week: &str, day: &str) -> DaySummary {
  let exercises = day_exercises(tree, week, day);
  let stats = day_stats(&exercises);
  let (top_sets, backdown_sets) = split_backdowns(&exercises);

  DaySummary {
    exercises,
    stats,
    top_sets,
    backdown_sets,
  }
}
