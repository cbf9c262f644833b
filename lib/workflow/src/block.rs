//! Workflow block types.
//!
//! Blocks are the executable steps of a workflow graph. Each block has a
//! unique id, a human-readable name, and kind-specific configuration. The
//! kind set is a closed enum so executor dispatch is checked exhaustively
//! at compile time.

use crate::sheets::SheetsBlockData;
use amber_relay_core::BlockId;
use serde::{Deserialize, Serialize};

/// Configuration for a block, varying by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BlockData {
    /// The workflow's entry marker; produces no data and passes through.
    Trigger,
    /// Read or write a range of a Google Sheets spreadsheet.
    GoogleSheets(SheetsBlockData),
}

impl BlockData {
    /// Returns the kind tag for this configuration.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::GoogleSheets(_) => "google-sheets",
        }
    }
}

/// A workflow block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier for this block within the workflow.
    pub id: BlockId,
    /// Human-readable name.
    pub name: String,
    /// Block configuration (determines kind and behavior).
    pub data: BlockData,
}

impl Block {
    /// Creates a new block with a generated id.
    #[must_use]
    pub fn new(name: impl Into<String>, data: BlockData) -> Self {
        Self {
            id: BlockId::new(),
            name: name.into(),
            data,
        }
    }

    /// Creates a new block with a specific id.
    #[must_use]
    pub fn with_id(id: BlockId, name: impl Into<String>, data: BlockData) -> Self {
        Self {
            id,
            name: name.into(),
            data,
        }
    }
}
