//! Workflow block graph using petgraph.
//!
//! Blocks are nodes; connections are directed edges from a named output
//! port on the source block to a successor block. Only the traversal
//! contract matters to the executor: given a block and an output port,
//! which block runs next.

use crate::block::Block;
use crate::error::GraphError;
use amber_relay_core::BlockId;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The output port an ordinary single-successor block advances through.
pub const DEFAULT_OUTPUT_PORT: &str = "output-1";

/// A connection from a block's named output port to a successor block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// The name of the output port on the source block.
    pub source_port: String,
}

impl Connection {
    /// Creates a connection from the given output port.
    #[must_use]
    pub fn new(source_port: impl Into<String>) -> Self {
        Self {
            source_port: source_port.into(),
        }
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_PORT)
    }
}

/// A workflow graph of blocks and port-named connections.
#[derive(Debug, Clone, Default)]
pub struct BlockGraph {
    graph: DiGraph<Block, Connection>,
    /// Map from BlockId to petgraph's NodeIndex for O(1) lookup.
    index: HashMap<BlockId, NodeIndex>,
}

impl BlockGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a block and returns its id.
    pub fn add_block(&mut self, block: Block) -> BlockId {
        let block_id = block.id.clone();
        let index = self.graph.add_node(block);
        self.index.insert(block_id.clone(), index);
        block_id
    }

    /// Returns a reference to a block by its id.
    #[must_use]
    pub fn block(&self, block_id: &BlockId) -> Option<&Block> {
        let index = self.index.get(block_id)?;
        self.graph.node_weight(*index)
    }

    /// Connects a source block's output port to a target block.
    ///
    /// # Errors
    ///
    /// Returns an error if either block does not exist.
    pub fn connect(
        &mut self,
        source_id: &BlockId,
        target_id: &BlockId,
        connection: Connection,
    ) -> Result<(), GraphError> {
        let source = *self.index.get(source_id).ok_or_else(|| GraphError::BlockNotFound {
            block_id: source_id.clone(),
        })?;
        let target = *self.index.get(target_id).ok_or_else(|| GraphError::BlockNotFound {
            block_id: target_id.clone(),
        })?;

        self.graph.add_edge(source, target, connection);
        Ok(())
    }

    /// Resolves the successor reached through the named output port.
    ///
    /// When a port has several connections, the earliest-added one wins,
    /// matching the "first connection" traversal contract.
    #[must_use]
    pub fn successor(&self, block_id: &BlockId, port: &str) -> Option<BlockId> {
        let index = *self.index.get(block_id)?;
        let edge = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .filter(|edge| edge.weight().source_port == port)
            .min_by_key(|edge| edge.id())?;

        self.graph.node_weight(edge.target()).map(|block| block.id.clone())
    }

    /// Number of blocks in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the graph has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
