//! Error types for the allocation simulator
//!
//! This module defines [`SimError`], covering every failure the engine can
//! report: bad configuration, placement failures, unknown block lookups and
//! script loading problems.
//!
//! None of these abort a simulation run. Failures raised while applying a
//! single instruction are turned into an [`Outcome`] by the engine and the run
//! carries on with the next instruction.
//!
//! [`Outcome`]: crate::simulator::Outcome

use crate::memory::BlockId;
use crate::placement::Strategy;
use thiserror::Error;

/// Errors produced by the address space, the engine and script loading
#[derive(Debug, Error)]
pub enum SimError {
    /// Address space created with a non-positive size
    #[error("Invalid address space size: {size} (must be positive)")]
    InvalidSpaceSize { size: i64 },

    /// Allocation requested with a non-positive dimension
    #[error("Invalid dimension {dimension} for block {block_id} (must be positive)")]
    InvalidDimension { block_id: BlockId, dimension: i64 },

    /// No gap satisfies the strategy's criterion
    #[error("{strategy}: no gap can hold block {block_id} of dimension {dimension}")]
    AllocationFailed {
        block_id: BlockId,
        dimension: u64,
        strategy: Strategy,
    },

    /// A live block already carries this id
    #[error("Block {block_id} is already allocated")]
    DuplicateBlock { block_id: BlockId },

    /// Query on an id that has no allocated interval
    #[error("Block {block_id} not found")]
    BlockNotFound { block_id: BlockId },

    /// Timeline capture ran past its byte budget
    #[error("Snapshot memory limit exceeded: {current} bytes used, limit is {limit}")]
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// Script file could not be read
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// Script file is not valid JSON for a simulation
    #[error("Malformed script: {0}")]
    Script(#[from] serde_json::Error),
}

impl SimError {
    /// Whether this error belongs to the invalid-configuration class
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SimError::InvalidSpaceSize { .. } | SimError::InvalidDimension { .. }
        )
    }
}

/// Result alias used throughout the crate
pub type SimResult<T> = Result<T, SimError>;
