pub mod program;
pub mod write_back;

use serde::{Deserialize, Serialize};

use crate::models::GridError;
use crate::resolver::ResolveError;
use crate::sheets::SheetsError;

/// Error surfaced to callers of a command, serialized as `{type, message}`
#[derive(Debug, thiserror::Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "message")]
pub enum CommandError {
  #[error("Malformed input: {0}")]
  MalformedInput(String),

  #[error("{0}")]
  WeekNotFound(String),

  #[error("{0}")]
  CoordinateNotFound(String),

  #[error("Spreadsheet service error: {0}")]
  Sheets(String),
}

impl From<GridError> for CommandError {
  fn from(e: GridError) -> Self {
    match e {
      GridError::MalformedInput(msg) => CommandError::MalformedInput(msg),
    }
  }
}

impl From<ResolveError> for CommandError {
  fn from(e: ResolveError) -> Self {
    match e {
      ResolveError::WeekNotFound(_) => CommandError::WeekNotFound(e.to_string()),
      ResolveError::CoordinateNotFound { .. } => CommandError::CoordinateNotFound(e.to_string()),
    }
  }
}

impl From<SheetsError> for CommandError {
  fn from(e: SheetsError) -> Self {
    CommandError::Sheets(e.to_string())
  }
}

impl From<serde_json::Error> for CommandError {
  fn from(e: serde_json::Error) -> Self {
    CommandError::MalformedInput(e.to_string())
  }
}
