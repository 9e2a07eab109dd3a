//! Command-line driver for the program commands

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use crate::commands::program::{load_program, parse_program, summarize_program_day};
use crate::commands::write_back::{resolve_coordinate, write_back};
use crate::commands::CommandError;
use crate::models::EditTarget;
use crate::plates::load_bar;
use crate::sheets::SheetsClient;

#[derive(Debug, Parser)]
#[command(name = "lift-sheet", about = "Parse strength program sheets and write logged lifts back")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// List the spreadsheets visible to the access token
  Sheets,
  /// Parse a `{ "values": [[...]] }` document into the program tree
  Parse {
    /// JSON file, stdin when omitted
    input: Option<PathBuf>,
  },
  /// Fetch a program range from the spreadsheet service and parse it
  Load {
    #[arg(long)]
    spreadsheet_id: String,
    #[arg(long)]
    range: Option<String>,
  },
  /// Summarize one day of a parsed program tree
  Summary {
    #[arg(long)]
    week: String,
    #[arg(long)]
    day: String,
    input: Option<PathBuf>,
  },
  /// Print the cell a write-back request would update, without writing
  Resolve { input: Option<PathBuf> },
  /// Resolve a write-back request and update the sheet
  WriteBack { input: Option<PathBuf> },
  /// Plates per side for a barbell weight in kg
  Plates {
    weight: f64,
    #[arg(long)]
    collars: bool,
  },
}

fn read_json(input: Option<&PathBuf>) -> Result<Value, CommandError> {
  let text = match input {
    Some(path) => fs::read_to_string(path)
      .map_err(|e| CommandError::MalformedInput(format!("{}: {}", path.display(), e)))?,
    None => {
      let mut buf = String::new();
      io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| CommandError::MalformedInput(e.to_string()))?;
      buf
    }
  };
  Ok(serde_json::from_str(&text)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

pub async fn execute(cli: Cli) -> Result<(), CommandError> {
  match cli.command {
    Command::Sheets => {
      let client = SheetsClient::from_env()?;
      print_json(&client.list_spreadsheets().await?)
    }
    Command::Parse { input } => {
      let payload = read_json(input.as_ref())?;
      print_json(&parse_program(&payload)?)
    }
    Command::Load { spreadsheet_id, range } => {
      let client = SheetsClient::from_env()?;
      let loaded = load_program(&client, &spreadsheet_id, range.as_deref()).await?;
      print_json(&loaded)
    }
    Command::Summary { week, day, input } => {
      let program = read_json(input.as_ref())?;
      print_json(&summarize_program_day(&program, &week, &day)?)
    }
    Command::Resolve { input } => {
      let body = read_json(input.as_ref())?;
      let target: EditTarget = serde_json::from_value(body.clone())?;
      let raw_data = body
        .get("rawData")
        .ok_or_else(|| CommandError::MalformedInput("missing `rawData`".into()))?;
      print_json(&resolve_coordinate(&target, raw_data)?)
    }
    Command::WriteBack { input } => {
      let body = read_json(input.as_ref())?;
      let client = SheetsClient::from_env()?;
      print_json(&write_back(&client, body).await?)
    }
    Command::Plates { weight, collars } => print_json(&load_bar(weight, collars)),
  }
}
