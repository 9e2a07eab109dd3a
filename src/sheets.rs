//! Google Sheets integration
//!
//! Lists the spreadsheets visible to the token, reads a program range and
//! writes single logged values back. Credential
//! acquisition happens elsewhere; this client only needs a bearer token.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use url::Url;

use crate::models::{Grid, GridError};

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";
/// Covers the widest program layout in use, including a blank leading column
pub const DEFAULT_PROGRAM_RANGE: &str = "A1:U58";

#[derive(Debug, Clone)]
pub struct SheetsConfig {
  pub access_token: String,
  pub api_base: String,
  pub drive_api_base: String,
}

impl SheetsConfig {
  pub fn from_env() -> Result<Self, SheetsError> {
    Ok(Self {
      access_token: env::var("GOOGLE_SHEETS_ACCESS_TOKEN")
        .map_err(|_| SheetsError::MissingConfig("GOOGLE_SHEETS_ACCESS_TOKEN".into()))?,
      api_base: env::var("GOOGLE_SHEETS_API_BASE").unwrap_or_else(|_| SHEETS_API_BASE.to_string()),
      drive_api_base: env::var("GOOGLE_DRIVE_API_BASE").unwrap_or_else(|_| DRIVE_API_BASE.to_string()),
    })
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SheetsError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

impl From<reqwest::Error> for SheetsError {
  fn from(e: reqwest::Error) -> Self {
    SheetsError::Request(e.to_string())
  }
}

impl From<GridError> for SheetsError {
  fn from(e: GridError) -> Self {
    SheetsError::Parse(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Sheets API Data Structures
/// ---------------------------------------------------------------------------

/// `spreadsheets.values.get` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
  #[serde(default)]
  pub range: Option<String>,
  #[serde(default)]
  pub major_dimension: Option<String>,
  /// Omitted by the API when the range holds no data
  #[serde(default)]
  pub values: Value,
}

impl ValueRange {
  pub fn grid(&self) -> Result<Grid, GridError> {
    if self.values.is_null() {
      return Ok(Grid::default());
    }
    Grid::from_values(&self.values)
  }
}

/// Drive file entry for a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetFile {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
  #[serde(default)]
  files: Vec<SpreadsheetFile>,
}

/// `spreadsheets.values.update` response
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
  pub spreadsheet_id: Option<String>,
  pub updated_range: Option<String>,
  pub updated_rows: Option<u32>,
  pub updated_columns: Option<u32>,
  pub updated_cells: Option<u32>,
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

pub struct SheetsClient {
  http: Client,
  config: SheetsConfig,
}

impl SheetsClient {
  pub fn new(config: SheetsConfig) -> Self {
    Self {
      http: Client::new(),
      config,
    }
  }

  pub fn from_env() -> Result<Self, SheetsError> {
    Ok(Self::new(SheetsConfig::from_env()?))
  }

  /// Spreadsheets the token can see, as Drive reports them
  pub async fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetFile>, SheetsError> {
    let mut url = Url::parse(&self.config.drive_api_base)
      .map_err(|e| SheetsError::MissingConfig(format!("invalid Drive API base: {}", e)))?;

    url
      .path_segments_mut()
      .map_err(|_| SheetsError::MissingConfig("Drive API base cannot be a base URL".into()))?
      .pop_if_empty()
      .push("files");
    url
      .query_pairs_mut()
      .append_pair("q", &format!("mimeType=\"{}\"", SPREADSHEET_MIME_TYPE))
      .append_pair("fields", "files(id,name)");

    let response = self
      .http
      .get(url)
      .bearer_auth(&self.config.access_token)
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status();
      let error_text = response.text().await.unwrap_or_default();
      return Err(SheetsError::Api(format!(
        "Failed to load sheets {}: {}",
        status, error_text
      )));
    }

    let list: FileList = response
      .json()
      .await
      .map_err(|e| SheetsError::Parse(e.to_string()))?;

    log::info!("Found {} spreadsheets", list.files.len());
    Ok(list.files)
  }

  fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, SheetsError> {
    let mut url = Url::parse(&self.config.api_base)
      .map_err(|e| SheetsError::MissingConfig(format!("invalid API base: {}", e)))?;

    url
      .path_segments_mut()
      .map_err(|_| SheetsError::MissingConfig("API base cannot be a base URL".into()))?
      .pop_if_empty()
      .extend(["spreadsheets", spreadsheet_id, "values", range]);

    Ok(url)
  }

  /// Read a range as rows of formatted cell text
  pub async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange, SheetsError> {
    let url = self.values_url(spreadsheet_id, range)?;

    let response = self
      .http
      .get(url)
      .bearer_auth(&self.config.access_token)
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status();
      let error_text = response.text().await.unwrap_or_default();
      return Err(SheetsError::Api(format!(
        "Get values error {}: {}",
        status, error_text
      )));
    }

    response
      .json()
      .await
      .map_err(|e| SheetsError::Parse(e.to_string()))
  }

  /// Overwrite one A1 range with a single raw value
  pub async fn update_values(
    &self,
    spreadsheet_id: &str,
    range: &str,
    value: &Value,
  ) -> Result<UpdateValuesResponse, SheetsError> {
    let mut url = self.values_url(spreadsheet_id, range)?;
    url.query_pairs_mut().append_pair("valueInputOption", "RAW");

    let body = json!({ "range": range, "values": [[value]] });

    let response = self
      .http
      .put(url)
      .bearer_auth(&self.config.access_token)
      .json(&body)
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status();
      let error_text = response.text().await.unwrap_or_default();
      return Err(SheetsError::Api(format!(
        "Update values error {}: {}",
        status, error_text
      )));
    }

    log::info!("Wrote {} to {} in {}", value, range, spreadsheet_id);

    response
      .json()
      .await
      .map_err(|e| SheetsError::Parse(e.to_string()))
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use mockito::Matcher;
  use serial_test::serial;

  fn client_for(server: &mockito::ServerGuard) -> SheetsClient {
    SheetsClient::new(SheetsConfig {
      access_token: "test-token".into(),
      api_base: server.url(),
      drive_api_base: server.url(),
    })
  }

  #[test]
  #[serial]
  fn test_config_from_env() {
    temp_env::with_vars(
      [
        ("GOOGLE_SHEETS_ACCESS_TOKEN", Some("abc")),
        ("GOOGLE_SHEETS_API_BASE", None),
        ("GOOGLE_DRIVE_API_BASE", Some("http://localhost:9000/drive")),
      ],
      || {
        let config = SheetsConfig::from_env().unwrap();
        assert_eq!(config.access_token, "abc");
        assert_eq!(config.api_base, SHEETS_API_BASE);
        assert_eq!(config.drive_api_base, "http://localhost:9000/drive");
      },
    );
  }

  #[test]
  #[serial]
  fn test_config_requires_token() {
    temp_env::with_var_unset("GOOGLE_SHEETS_ACCESS_TOKEN", || {
      let err = SheetsConfig::from_env().unwrap_err();
      assert!(matches!(err, SheetsError::MissingConfig(ref v) if v == "GOOGLE_SHEETS_ACCESS_TOKEN"));
    });
  }

  #[test]
  fn test_values_url_encodes_range() {
    let client = SheetsClient::new(SheetsConfig {
      access_token: String::new(),
      api_base: "https://sheets.googleapis.com/v4".into(),
      drive_api_base: DRIVE_API_BASE.into(),
    });
    let url = client.values_url("sheet-1", "Block 2!A1:U58").unwrap();
    assert_eq!(
      url.as_str(),
      "https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/Block%202!A1:U58"
    );
  }

  #[tokio::test]
  async fn test_get_values() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/spreadsheets/sheet-1/values/A1:U58")
      .match_header("authorization", "Bearer test-token")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"range":"Sheet1!A1:U58","majorDimension":"ROWS","values":[["","Week1"],["","Mon"]]}"#)
      .create_async()
      .await;

    let range = client_for(&server).get_values("sheet-1", "A1:U58").await.unwrap();
    let grid = range.grid().unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.cell(1, 1), "Mon");

    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_get_values_empty_range() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/spreadsheets/sheet-1/values/A1:U58")
      .with_status(200)
      .with_body(r#"{"range":"Sheet1!A1:U58","majorDimension":"ROWS"}"#)
      .create_async()
      .await;

    let range = client_for(&server).get_values("sheet-1", "A1:U58").await.unwrap();
    assert!(range.grid().unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_update_values() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("PUT", "/spreadsheets/sheet-1/values/D4")
      .match_query(Matcher::UrlEncoded("valueInputOption".into(), "RAW".into()))
      .match_body(Matcher::PartialJson(json!({ "values": [["225"]] })))
      .with_status(200)
      .with_body(r#"{"spreadsheetId":"sheet-1","updatedRange":"Sheet1!D4","updatedRows":1,"updatedColumns":1,"updatedCells":1}"#)
      .create_async()
      .await;

    let response = client_for(&server)
      .update_values("sheet-1", "D4", &json!("225"))
      .await
      .unwrap();
    assert_eq!(response.updated_range.as_deref(), Some("Sheet1!D4"));
    assert_eq!(response.updated_cells, Some(1));

    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_list_spreadsheets() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/files")
      .match_header("authorization", "Bearer test-token")
      .match_query(Matcher::AllOf(vec![
        Matcher::UrlEncoded(
          "q".into(),
          r#"mimeType="application/vnd.google-apps.spreadsheet""#.into(),
        ),
        Matcher::UrlEncoded("fields".into(), "files(id,name)".into()),
      ]))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"files":[{"id":"abc","name":"Block 1"},{"id":"def","name":"Peaking"}]}"#)
      .create_async()
      .await;

    let files = client_for(&server).list_spreadsheets().await.unwrap();
    assert_eq!(
      files,
      vec![
        SpreadsheetFile { id: "abc".into(), name: "Block 1".into() },
        SpreadsheetFile { id: "def".into(), name: "Peaking".into() },
      ]
    );

    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_list_spreadsheets_without_files() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/files")
      .match_query(Matcher::Any)
      .with_status(200)
      .with_body("{}")
      .create_async()
      .await;

    assert!(client_for(&server).list_spreadsheets().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_list_spreadsheets_auth_failure() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/files")
      .match_query(Matcher::Any)
      .with_status(401)
      .with_body(r#"{"error":{"message":"Invalid Credentials"}}"#)
      .create_async()
      .await;

    let err = client_for(&server).list_spreadsheets().await.unwrap_err();
    assert!(matches!(err, SheetsError::Api(ref msg) if msg.contains("401")));
  }

  #[tokio::test]
  async fn test_api_error_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/spreadsheets/missing/values/A1:U58")
      .with_status(404)
      .with_body(r#"{"error":{"message":"Requested entity was not found."}}"#)
      .create_async()
      .await;

    let err = client_for(&server).get_values("missing", "A1:U58").await.unwrap_err();
    assert!(matches!(err, SheetsError::Api(ref msg) if msg.contains("404")));
  }
}
