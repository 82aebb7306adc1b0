//! Interval value types
//!
//! - [`BlockInterval`]: an allocated, caller-identified range
//! - [`Gap`]: a derived, unallocated range
//!
//! Both are plain `Copy` values. A `Gap` compares and hashes structurally on
//! its `(low, high)` pair, so sets of gaps deduplicate by address range.

use super::{span_len, Address, BlockId};
use std::fmt;

/// An allocated block of the address space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInterval {
    pub block_id: BlockId,
    pub low: Address,
    pub high: Address, // Inclusive
}

impl BlockInterval {
    pub fn new(block_id: BlockId, low: Address, dimension: u64) -> Self {
        debug_assert!(dimension > 0, "zero-length interval");
        BlockInterval {
            block_id,
            low,
            high: low + dimension - 1,
        }
    }

    /// Number of addresses the block occupies
    pub fn len(&self) -> u64 {
        span_len(self.low, self.high)
    }

    /// Check whether two intervals share at least one address
    pub fn overlaps(&self, other: &BlockInterval) -> bool {
        !(self.high < other.low || other.high < self.low)
    }

    /// Move the block so that it starts at `low`, keeping its length
    pub fn relocate(&mut self, low: Address) {
        let len = self.len();
        self.low = low;
        self.high = low + len - 1;
    }
}

impl fmt::Display for BlockInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{}) --> ID {}", self.low, self.high, self.block_id)
    }
}

/// A free range between allocated blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gap {
    pub low: Address,
    pub high: Address, // Inclusive
}

impl Gap {
    pub fn new(low: Address, high: Address) -> Self {
        Gap { low, high }
    }

    pub fn len(&self) -> u64 {
        span_len(self.low, self.high)
    }

    /// Whether a block of `dimension` addresses fits in this gap
    pub fn fits(&self, dimension: u64) -> bool {
        self.len() >= dimension
    }

    /// Whether this gap ends right before or starts right after the block
    pub fn touches(&self, block: &BlockInterval) -> bool {
        self.high + 1 == block.low || block.high + 1 == self.low
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{}) --> EMPTY", self.low, self.high)
    }
}
