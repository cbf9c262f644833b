//! Workflow engine core for amber-relay.
//!
//! This crate provides:
//!
//! - **Trigger configuration**: the declarative model describing when a
//!   workflow starts (legacy single form and list form)
//! - **Block graph**: directed blocks-and-connections using petgraph
//! - **Run context**: the run-scoped reference data shared across blocks
//! - **Block executor**: the handoff protocol advancing one block at a
//!   time with continuation-annotated failures
//! - **Sheets block**: the worked integration block against an injected
//!   tabular-resource client

pub mod block;
pub mod context;
pub mod error;
pub mod executor;
pub mod graph;
pub mod sheets;
pub mod table;
pub mod trigger;

pub use block::{Block, BlockData};
pub use context::RunContext;
pub use error::{BlockError, BlockFailure, GraphError};
pub use executor::{BlockExecutor, BlockOutcome};
pub use graph::{BlockGraph, Connection, DEFAULT_OUTPUT_PORT};
pub use sheets::{SheetsBlockData, SheetsClient, SheetsError, ValueRange};
pub use trigger::{TriggerConfig, TriggerData, TriggerEntry};
