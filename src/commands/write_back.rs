//! Commands for writing a logged value back into the sheet

use serde_json::Value;

use super::CommandError;
use crate::models::{EditTarget, Grid, WriteBackRequest, WriteBackResponse};
use crate::resolver::{resolve, CellCoordinate};
use crate::sheets::SheetsClient;

/// ---------------------------------------------------------------------------
/// Coordinate Lookup
/// ---------------------------------------------------------------------------

/// Resolve the cell an edit refers to without writing anything
pub fn resolve_coordinate(target: &EditTarget, raw_data: &Value) -> Result<CellCoordinate, CommandError> {
  let grid = Grid::from_payload(raw_data)?;
  Ok(resolve(target, &grid)?)
}

/// ---------------------------------------------------------------------------
/// Write-back
/// ---------------------------------------------------------------------------

/// Decode a write-back body, resolve its cell and update the sheet.
/// Nothing is written unless the coordinate resolves.
pub async fn write_back(client: &SheetsClient, body: Value) -> Result<WriteBackResponse, CommandError> {
  let request: WriteBackRequest = serde_json::from_value(body)?;
  write_back_request(client, &request).await
}

pub async fn write_back_request(
  client: &SheetsClient,
  request: &WriteBackRequest,
) -> Result<WriteBackResponse, CommandError> {
  let coordinate = resolve_coordinate(&request.target, &request.raw_data)
    .inspect_err(|e| log::warn!("Refusing write-back for {}: {}", request.target.exercise, e))?;

  let range = coordinate.to_a1();
  let updated = client
    .update_values(&request.spreadsheet_id, &range, &request.new_value)
    .await?;

  Ok(WriteBackResponse {
    coordinate: range,
    updated_range: updated.updated_range,
    updated_cells: updated.updated_cells,
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
