//! Program Tree Builder
//!
//! Decodes a normalized program grid into week -> day -> exercise records.
//!
//! Layout conventions:
//! - One row per exercise slot, one 5-cell block per week:
//!   Exercise, Prescribed, Weight, RPE, Notes
//! - Block i starts at column 5i
//! - A row whose first cell is a day label opens that day
//! - A `Rest` row marks the current day as a rest day in every week
//!
//! Classification of repeated names needs the total count per
//! (week, day, name) before any row can be tagged, so the grid is folded
//! twice: once into occurrence counts, then into the tree.

use std::collections::HashMap;

use crate::headers::{extract_headers, is_week_header_row, Headers};
use crate::models::program::REST_KEY;
use crate::models::{ClassificationTag, DayEntry, ExerciseRecord, Grid, ProgramTree, WeekPlan};
use crate::normalize::normalize;

/// Bumped whenever the decoded tree shape or tagging rules change
pub const PARSER_VERSION: u32 = 1;

/// Cells per week block
pub const BLOCK_WIDTH: usize = 5;

const EXERCISE: usize = 0;
const PRESCRIBED: usize = 1;
const WEIGHT: usize = 2;
const RPE: usize = 3;
const NOTES: usize = 4;

// ---------------------------------------------------------------------------
/// Row walk
// ---------------------------------------------------------------------------

/// A row as seen once parsing has started
#[derive(Debug, Clone, Copy)]
enum Step<'a> {
    /// Day header row
    DayStart(&'a str),
    /// Rest marker under the current day
    Rest(&'a str),
    /// Any other row under the current day
    Lift { day: &'a str, row: &'a [String] },
}

/// Walk rows with the `NotStarted -> Started(day)` state machine.
/// Everything before the first day header is dropped.
fn walk<'a>(grid: &'a Grid, headers: &Headers) -> Vec<Step<'a>> {
    let mut current_day: Option<&'a str> = None;
    let mut steps = Vec::new();

    for row in grid.rows() {
        let first = row.first().map(String::as_str).unwrap_or("");

        if headers.is_day(first) {
            current_day = Some(first);
            steps.push(Step::DayStart(first));
            continue;
        }

        let Some(day) = current_day else {
            continue;
        };

        if first == "rest" || first == "Rest" {
            steps.push(Step::Rest(day));
        } else if is_week_header_row(row) {
            log::debug!("Skipping repeated week header under {}", day);
        } else {
            steps.push(Step::Lift { day, row });
        }
    }

    steps
}

fn block_cell(row: &[String], week_index: usize, offset: usize) -> &str {
    row.get(week_index * BLOCK_WIDTH + offset)
        .map(String::as_str)
        .unwrap_or("")
}

fn block_record(row: &[String], week_index: usize) -> ExerciseRecord {
    ExerciseRecord {
        prescribed: block_cell(row, week_index, PRESCRIBED).to_string(),
        weight: block_cell(row, week_index, WEIGHT).to_string(),
        rpe: block_cell(row, week_index, RPE).to_string(),
        notes: block_cell(row, week_index, NOTES).to_string(),
    }
}

// ---------------------------------------------------------------------------
/// Occurrence counting (first fold)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct OccurrenceKey {
    week: String,
    day: String,
    name: String,
}

impl OccurrenceKey {
    fn new(week: &str, day: &str, name: &str) -> Self {
        Self {
            week: week.to_string(),
            day: day.to_string(),
            name: name.to_string(),
        }
    }
}

/// How many times each exercise name appears per (week, day)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceCounts {
    counts: HashMap<OccurrenceKey, usize>,
}

impl OccurrenceCounts {
    pub fn get(&self, week: &str, day: &str, name: &str) -> usize {
        self.counts
            .get(&OccurrenceKey::new(week, day, name))
            .copied()
            .unwrap_or(0)
    }
}

pub fn count_occurrences(grid: &Grid, headers: &Headers) -> OccurrenceCounts {
    let counts = walk(grid, headers)
        .into_iter()
        .filter_map(|step| match step {
            Step::Lift { day, row } => Some((day, row)),
            _ => None,
        })
        .flat_map(move |(day, row)| {
            headers
                .weeks
                .iter()
                .enumerate()
                .map(move |(i, week)| (week, day, block_cell(row, i, EXERCISE)))
        })
        .filter(|(_, _, name)| !name.is_empty())
        .fold(HashMap::new(), |mut acc, (week, day, name)| {
            *acc.entry(OccurrenceKey::new(week, day, name)).or_insert(0) += 1;
            acc
        });

    OccurrenceCounts { counts }
}

// ---------------------------------------------------------------------------
/// Classification and tree building (second fold)
// ---------------------------------------------------------------------------

/// Tag one occurrence of an exercise.
///
/// `seen` is the 1-based index of this occurrence within its (week, day),
/// `total` the number of occurrences there.
pub fn classify(seen: usize, total: usize, first_lift_row: bool) -> ClassificationTag {
    if seen == 1 && total == 1 && !first_lift_row {
        ClassificationTag::Accessory
    } else if seen > 1 {
        ClassificationTag::Backdown
    } else {
        ClassificationTag::Primary
    }
}

pub fn build_tree(grid: &Grid, headers: &Headers, counts: &OccurrenceCounts) -> ProgramTree {
    let mut tree: ProgramTree = headers
        .weeks
        .iter()
        .map(|week| (week.clone(), WeekPlan::new()))
        .collect();

    let mut seen: HashMap<OccurrenceKey, usize> = HashMap::new();
    // Keyed by day label, so a repeated label continues its day
    let mut lift_positions: HashMap<&str, usize> = HashMap::new();

    for step in walk(grid, headers) {
        match step {
            Step::DayStart(day) => {
                for plan in tree.values_mut() {
                    plan.entry(day.to_string()).or_default();
                }
            }
            Step::Rest(day) => {
                for plan in tree.values_mut() {
                    plan.entry(day.to_string())
                        .or_default()
                        .insert(REST_KEY.to_string(), DayEntry::rest());
                }
            }
            Step::Lift { day, row } => {
                // Only the week-0 column advances the day's lift position
                let lift_position = lift_positions.entry(day).or_insert(0);
                if !block_cell(row, 0, EXERCISE).is_empty() {
                    *lift_position += 1;
                }
                let first_lift_row = *lift_position == 1;

                for (i, week) in headers.weeks.iter().enumerate() {
                    let name = block_cell(row, i, EXERCISE);
                    if name.is_empty() {
                        continue;
                    }

                    let key = OccurrenceKey::new(week, day, name);
                    let total = counts.counts.get(&key).copied().unwrap_or(0);
                    let occurrence = seen.entry(key).or_insert(0);
                    *occurrence += 1;

                    let tag = classify(*occurrence, total, first_lift_row);
                    let Some(plan) = tree.get_mut(week.as_str()) else {
                        continue;
                    };
                    plan.entry(day.to_string())
                        .or_default()
                        .insert(tag.key_for(name), DayEntry::Lift(block_record(row, i)));
                }
            }
        }
    }

    tree
}

/// Normalize, extract headers and build the program tree in one call
pub fn parse_program(grid: &Grid) -> ProgramTree {
    let grid = normalize(grid);
    let headers = extract_headers(&grid);
    let counts = count_occurrences(&grid, &headers);
    let tree = build_tree(&grid, &headers, &counts);

    log::info!(
        "Parsed program (parser v{}): {} weeks, {} days",
        PARSER_VERSION,
        headers.weeks.len(),
        headers.days.len()
    );

    tree
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
