//! Block execution handoff protocol.
//!
//! The executor runs exactly one block per invocation. It resolves the
//! successor from the block's connections *before* doing any work that can
//! fail, so both outcomes carry the continuation point: a success hands the
//! driver the next block id, and a failure reports where execution was
//! heading when it broke.

use crate::block::BlockData;
use crate::context::RunContext;
use crate::error::{BlockError, BlockFailure};
use crate::graph::{BlockGraph, DEFAULT_OUTPUT_PORT};
use crate::sheets::{self, SheetsClient};
use amber_relay_core::BlockId;
use serde_json::Value as JsonValue;

/// The result of one successful block execution.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockOutcome {
    /// The block to run next, if the graph continues.
    pub next_block_id: Option<BlockId>,
    /// Data the block produced.
    pub data: JsonValue,
}

/// Runs single blocks against their injected collaborators.
///
/// The driver that walks the graph lives outside this crate; it threads
/// the run context through consecutive `execute` calls and decides how to
/// react to a [`BlockFailure`].
pub struct BlockExecutor<S> {
    sheets: S,
}

impl<S: SheetsClient> BlockExecutor<S> {
    /// Creates an executor over the given collaborators.
    pub fn new(sheets: S) -> Self {
        Self { sheets }
    }

    /// Executes one block, threading the run's shared reference data.
    ///
    /// # Errors
    ///
    /// Every failure — validation, a missing block, or an external
    /// collaborator rejecting the operation — propagates to the driver as
    /// a [`BlockFailure`] annotated with the already-resolved successor.
    pub async fn execute(
        &self,
        graph: &BlockGraph,
        block_id: &BlockId,
        ctx: &mut RunContext,
    ) -> Result<BlockOutcome, BlockFailure> {
        let Some(block) = graph.block(block_id) else {
            return Err(BlockFailure {
                next_block_id: None,
                error: BlockError::BlockNotFound {
                    block_id: block_id.clone(),
                },
            });
        };

        let next_block_id = graph.successor(block_id, DEFAULT_OUTPUT_PORT);

        let result = match &block.data {
            BlockData::Trigger => Ok(JsonValue::Null),
            BlockData::GoogleSheets(data) => sheets::run(&self.sheets, data, ctx).await,
        };

        match result {
            Ok(data) => Ok(BlockOutcome {
                next_block_id,
                data,
            }),
            Err(error) => {
                tracing::debug!(block = %block_id, error = %error, "block execution failed");
                Err(BlockFailure {
                    next_block_id,
                    error,
                })
            }
        }
    }
}
