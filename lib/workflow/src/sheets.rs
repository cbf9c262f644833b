//! The worked integration block: read/write a spreadsheet value range.
//!
//! This block stands in for the general integration-block shape: validate
//! declared parameters before touching the network, call an injected
//! client, and publish results into the run context for downstream blocks.

use crate::context::RunContext;
use crate::error::BlockError;
use crate::table;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Run-context namespace sheet results are published under.
pub const SHEETS_NAMESPACE: &str = "googleSheets";

/// A rectangular range of cell values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRange {
    pub values: Vec<Vec<JsonValue>>,
}

/// Errors reported by the spreadsheet service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetsError {
    /// The service answered with a non-success status; the message is the
    /// service's own status message, passed through.
    Status { message: String },
}

impl fmt::Display for SheetsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for SheetsError {}

impl From<SheetsError> for BlockError {
    fn from(err: SheetsError) -> Self {
        Self::ExternalService {
            message: err.to_string(),
        }
    }
}

/// Client for the tabular resource service.
#[async_trait]
pub trait SheetsClient: Send + Sync {
    /// Fetches a rectangular value range.
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ValueRange, SheetsError>;

    /// Writes values into a range.
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: JsonValue,
        value_input_option: &str,
    ) -> Result<(), SheetsError>;
}

/// Where an update operation takes its values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    /// The run context's shared table rows.
    #[default]
    Table,
    /// Same rows, authored column-by-column in the editor.
    DataColumns,
    /// A raw payload from the block's own configuration.
    Custom,
}

/// The operation a sheets block performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SheetsOperation {
    /// Fetch a value range.
    Get {
        /// Reshape the range so row 0 supplies each record's keys.
        #[serde(default)]
        first_row_as_key: bool,
        /// When non-blank, also publish the result into the run context
        /// under this key.
        #[serde(default)]
        ref_key: Option<String>,
    },
    /// Write values into a range.
    Update {
        #[serde(default)]
        data_from: DataSource,
        #[serde(default)]
        custom_data: String,
        /// Emit a header row of keys followed by column-major value rows.
        #[serde(default)]
        keys_as_first_row: bool,
        #[serde(default = "default_value_input_option")]
        value_input_option: String,
    },
}

/// Declared configuration of a sheets block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetsBlockData {
    pub spreadsheet_id: String,
    pub range: String,
    #[serde(flatten)]
    pub operation: SheetsOperation,
}

/// Executes a sheets block against the injected client.
///
/// Validation runs before any client call; a non-success service status
/// surfaces as an external-service error with the message passed through.
pub(crate) async fn run<S: SheetsClient + ?Sized>(
    client: &S,
    data: &SheetsBlockData,
    ctx: &mut RunContext,
) -> Result<JsonValue, BlockError> {
    if is_whitespace(&data.spreadsheet_id) {
        return Err(BlockError::Validation {
            message: "spreadsheet id is empty".to_owned(),
        });
    }
    if is_whitespace(&data.range) {
        return Err(BlockError::Validation {
            message: "spreadsheet range is empty".to_owned(),
        });
    }

    match &data.operation {
        SheetsOperation::Get {
            first_row_as_key,
            ref_key,
        } => {
            let range = client.get_values(&data.spreadsheet_id, &data.range).await?;
            let result = if *first_row_as_key {
                JsonValue::Array(table::rows_to_records(&range.values))
            } else {
                serde_json::to_value(&range.values).unwrap_or(JsonValue::Null)
            };

            if let Some(key) = ref_key {
                if !is_whitespace(key) {
                    ctx.set_reference(SHEETS_NAMESPACE, key, result.clone());
                }
            }
            Ok(result)
        }
        SheetsOperation::Update {
            data_from,
            custom_data,
            keys_as_first_row,
            value_input_option,
        } => {
            let values = match data_from {
                DataSource::Table | DataSource::DataColumns => {
                    let rows = ctx.table_rows();
                    let values = if *keys_as_first_row {
                        table::records_to_columns(rows)
                    } else {
                        table::records_to_rows(rows)
                    };
                    serde_json::to_value(values).unwrap_or(JsonValue::Null)
                }
                DataSource::Custom => parse_json_or_raw(custom_data),
            };

            client
                .update_values(&data.spreadsheet_id, &data.range, values, value_input_option)
                .await?;
            Ok(JsonValue::Null)
        }
    }
}

/// Parses a payload as JSON, falling back to the raw string.
fn parse_json_or_raw(raw: &str) -> JsonValue {
    serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_owned()))
}

fn is_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

fn default_value_input_option() -> String {
    "RAW".to_owned()
}
