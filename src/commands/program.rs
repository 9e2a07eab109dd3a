//! Commands for reading a program out of a sheet

use serde::Serialize;
use serde_json::Value;

use super::CommandError;
use crate::models::{Grid, ProgramTree};
use crate::program::parse_program as build_program;
use crate::sheets::{SheetsClient, ValueRange, DEFAULT_PROGRAM_RANGE};
use crate::summary::{summarize_day, DaySummary};

/// Parse a `{ "values": [[...]] }` body into the program tree
pub fn parse_program(payload: &Value) -> Result<ProgramTree, CommandError> {
    let grid = Grid::from_payload(payload)?;
    Ok(build_program(&grid))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedProgram {
    /// Sheet range as returned by the service; sent back on write-back
    pub raw_data: ValueRange,
    pub program: ProgramTree,
}

/// Fetch a sheet range and parse it
pub async fn load_program(
    client: &SheetsClient,
    spreadsheet_id: &str,
    range: Option<&str>,
) -> Result<LoadedProgram, CommandError> {
    let range = range.unwrap_or(DEFAULT_PROGRAM_RANGE);
    log::info!("Loading program {} ({})", spreadsheet_id, range);

    let raw_data = client.get_values(spreadsheet_id, range).await?;
    let program = build_program(&raw_data.grid()?);

    Ok(LoadedProgram { raw_data, program })
}

/// Summarize one day of an already parsed program
pub fn summarize_program_day(
    program: &Value,
    week: &str,
    day: &str,
) -> Result<DaySummary, CommandError> {
    let tree: ProgramTree = serde_json::from_value(program.clone())?;
    Ok(summarize_day(&tree, week, day))
}
