//! Plate loading for a barbell target weight (kg)
//!
//! Plates are picked greedily per side, heaviest first. Targets that fall
//! between plate increments load the nearest weight below and report the
//! shortfall.

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Equipment
/// ---------------------------------------------------------------------------

pub const BARBELL_WEIGHT: f64 = 20.0;

/// Weight of one collar
pub const COLLAR_WEIGHT: f64 = 2.5;

/// Competition plate denominations, heaviest first
pub const PLATE_WEIGHTS: [f64; 7] = [25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25];

/// ---------------------------------------------------------------------------
/// Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateCount {
  pub weight: f64,
  /// Plates of this weight on each side
  pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateLoad {
  pub target_weight: f64,
  /// Bar plus collars, if used
  pub bar_weight: f64,
  pub plates: Vec<PlateCount>,
  pub actual_weight: f64,
  /// Target minus what the bar actually carries
  pub difference: f64,
}

/// ---------------------------------------------------------------------------
/// Calculation
/// ---------------------------------------------------------------------------

pub fn bar_weight(use_collars: bool) -> f64 {
  if use_collars {
    BARBELL_WEIGHT + COLLAR_WEIGHT * 2.0
  } else {
    BARBELL_WEIGHT
  }
}

/// Plates per side for `target`, heaviest first
pub fn plates_per_side(target: f64, use_collars: bool) -> Vec<PlateCount> {
  let bar = bar_weight(use_collars);
  // Also rejects NaN
  if !(target > bar) {
    return Vec::new();
  }

  let mut remaining = (target - bar) / 2.0;
  let mut plates = Vec::new();

  for weight in PLATE_WEIGHTS {
    let count = (remaining / weight).floor() as u32;
    if count > 0 {
      plates.push(PlateCount { weight, count });
      remaining -= f64::from(count) * weight;
    }
  }

  plates
}

pub fn load_bar(target: f64, use_collars: bool) -> PlateLoad {
  let bar = bar_weight(use_collars);
  let plates = plates_per_side(target, use_collars);
  let per_side: f64 = plates.iter().map(|p| p.weight * f64::from(p.count)).sum();
  let actual_weight = bar + per_side * 2.0;

  log::debug!("Loaded {} for target {} ({} plate sizes)", actual_weight, target, plates.len());

  PlateLoad {
    target_weight: target,
    bar_weight: bar,
    plates,
    actual_weight,
    difference: target - actual_weight,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
