//! Error types for the workflow crate.
//!
//! - `GraphError`: block graph operations
//! - `BlockError`: a single block execution failing
//! - `BlockFailure`: a block error annotated with the already-resolved
//!   successor, so the run's driver can decide where to resume

use amber_relay_core::BlockId;
use std::fmt;

/// Errors from block graph operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Block with the given ID was not found in the graph.
    BlockNotFound { block_id: BlockId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockNotFound { block_id } => {
                write!(f, "block not found: {block_id}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors from executing a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// A required field was blank or malformed; raised before any
    /// external call is made.
    Validation { message: String },
    /// An external collaborator reported a non-success status.
    ExternalService { message: String },
    /// The block to execute does not exist in the graph.
    BlockNotFound { block_id: BlockId },
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "validation failed: {message}"),
            Self::ExternalService { message } => {
                write!(f, "external service error: {message}")
            }
            Self::BlockNotFound { block_id } => write!(f, "block not found: {block_id}"),
        }
    }
}

impl std::error::Error for BlockError {}

/// A block execution failure carrying its continuation point.
///
/// `next_block_id` is resolved from the block's connections before any
/// fallible work runs, so even a failed execution reports where the run
/// was heading. The driver can use it to skip-and-continue or to mark
/// only the unreached remainder as aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFailure {
    /// The successor that would have run next.
    pub next_block_id: Option<BlockId>,
    /// What went wrong.
    pub error: BlockError,
}

impl fmt::Display for BlockFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.next_block_id {
            Some(next) => write!(f, "{} (next block: {next})", self.error),
            None => self.error.fmt(f),
        }
    }
}

impl std::error::Error for BlockFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_error_display() {
        let err = BlockError::Validation {
            message: "spreadsheet range is empty".to_owned(),
        };
        assert!(err.to_string().contains("validation failed"));
        assert!(err.to_string().contains("range is empty"));
    }

    #[test]
    fn block_failure_display_includes_continuation() {
        let failure = BlockFailure {
            next_block_id: Some(BlockId::from("b7")),
            error: BlockError::ExternalService {
                message: "quota exceeded".to_owned(),
            },
        };
        let rendered = failure.to_string();
        assert!(rendered.contains("quota exceeded"));
        assert!(rendered.contains("b7"));
    }

    #[test]
    fn block_failure_source_is_the_block_error() {
        use std::error::Error;

        let failure = BlockFailure {
            next_block_id: None,
            error: BlockError::BlockNotFound {
                block_id: BlockId::from("missing"),
            },
        };
        assert!(failure.source().is_some());
    }
}
