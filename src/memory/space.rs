//! Address space implementation for the simulator
//!
//! This module provides the bounded linear space with:
//! - Address-ordered storage of allocated intervals
//! - Free gaps derived on demand from the complement of the intervals
//! - Placement delegated to a [`Strategy`]
//! - Compaction and external fragmentation measurement
//!
//! # Error Handling
//!
//! Queries on unknown ids return [`SimError::BlockNotFound`] (or `None` for
//! [`AddressSpace::get_interval`]), which keeps "missing" distinct from any
//! legitimate answer. A failed allocation never mutates the space.

use super::interval::{BlockInterval, Gap};
use super::{Address, BlockId};
use crate::placement::Strategy;
use crate::simulator::errors::{SimError, SimResult};
use rustc_hash::FxHashSet;
use tracing::debug;

/// The simulated address space
#[derive(Debug, Clone, PartialEq)]
pub struct AddressSpace {
    size: u64,
    allocated: Vec<BlockInterval>, // Sorted by low address, never overlapping
}

impl AddressSpace {
    /// Create an empty address space covering `0..size`
    pub fn new(size: u64) -> SimResult<Self> {
        if size == 0 {
            return Err(SimError::InvalidSpaceSize { size: 0 });
        }
        Ok(AddressSpace {
            size,
            allocated: Vec::new(),
        })
    }

    /// Total capacity of the space
    pub fn size(&self) -> u64 {
        self.size
    }

    /// All allocated intervals in address order
    pub fn intervals(&self) -> &[BlockInterval] {
        &self.allocated
    }

    pub fn is_empty(&self) -> bool {
        self.allocated.is_empty()
    }

    /// Sum of all allocated interval lengths
    pub fn used(&self) -> u64 {
        self.allocated.iter().map(BlockInterval::len).sum()
    }

    /// Number of addresses not covered by any interval
    pub fn free_total(&self) -> u64 {
        self.size - self.used()
    }

    pub fn contains_block(&self, block_id: BlockId) -> bool {
        self.position_of(block_id).is_some()
    }

    /// Length of the block with the given id
    pub fn block_dimension(&self, block_id: BlockId) -> SimResult<u64> {
        self.get_interval(block_id)
            .map(BlockInterval::len)
            .ok_or(SimError::BlockNotFound { block_id })
    }

    /// Ids of all allocated blocks, in address order
    pub fn list_block_ids(&self) -> Vec<BlockId> {
        self.allocated.iter().map(|b| b.block_id).collect()
    }

    pub fn get_interval(&self, block_id: BlockId) -> Option<&BlockInterval> {
        self.allocated.iter().find(|b| b.block_id == block_id)
    }

    /// Derive the free gaps by walking the intervals in address order
    pub fn free_gaps(&self) -> Vec<Gap> {
        let mut gaps = Vec::with_capacity(self.allocated.len() + 1);
        let mut cursor: Address = 0;

        for block in &self.allocated {
            if block.low > cursor {
                gaps.push(Gap::new(cursor, block.low - 1));
            }
            cursor = block.high + 1;
        }

        if cursor < self.size {
            gaps.push(Gap::new(cursor, self.size - 1));
        }

        gaps
    }

    /// Largest free gap (lowest address on ties)
    pub fn largest_gap(&self) -> Option<Gap> {
        self.free_gaps()
            .into_iter()
            .fold(None, |best: Option<Gap>, gap| match best {
                Some(b) if b.len() >= gap.len() => Some(b),
                _ => Some(gap),
            })
    }

    /// The set of distinct free gaps
    pub fn gap_signatures(&self) -> FxHashSet<Gap> {
        self.free_gaps().into_iter().collect()
    }

    /// Gaps touching either boundary of the given block
    pub fn neighboring_gaps(&self, block_id: BlockId) -> SimResult<FxHashSet<Gap>> {
        let block = self
            .get_interval(block_id)
            .ok_or(SimError::BlockNotFound { block_id })?;

        Ok(self
            .free_gaps()
            .into_iter()
            .filter(|gap| gap.touches(block))
            .collect())
    }

    /// External fragmentation: `1 - largest_gap / total_free`
    ///
    /// A fully packed space has nothing to fragment and reports `0.0`.
    pub fn fragmentation(&self) -> f64 {
        let total_free = self.free_total();
        if total_free == 0 {
            return 0.0;
        }

        let largest = self.largest_gap().map_or(0, |g| g.len());
        let ratio = 1.0 - (largest as f64 / total_free as f64);
        ratio.clamp(0.0, 1.0)
    }

    /// Place a new block of `dimension` addresses using `strategy`
    pub fn allocate(
        &mut self,
        block_id: BlockId,
        dimension: u64,
        strategy: Strategy,
    ) -> SimResult<BlockInterval> {
        if dimension == 0 {
            return Err(SimError::InvalidDimension {
                block_id,
                dimension: 0,
            });
        }
        if self.contains_block(block_id) {
            return Err(SimError::DuplicateBlock { block_id });
        }

        let low = strategy
            .choose(&self.free_gaps(), dimension)
            .ok_or(SimError::AllocationFailed {
                block_id,
                dimension,
                strategy,
            })?;

        let block = BlockInterval::new(block_id, low, dimension);
        let index = self.allocated.partition_point(|b| b.low < low);
        self.allocated.insert(index, block);

        debug!(
            block_id,
            dimension,
            low = block.low,
            high = block.high,
            %strategy,
            "placed block"
        );
        Ok(block)
    }

    /// Release the block with the given id
    ///
    /// Unknown ids are ignored and yield `None`.
    pub fn deallocate(&mut self, block_id: BlockId) -> Option<BlockInterval> {
        let index = self.position_of(block_id)?;
        let block = self.allocated.remove(index);
        debug!(block_id, low = block.low, high = block.high, "released block");
        Some(block)
    }

    /// Slide every block down to close all internal gaps
    ///
    /// Relative order, lengths and ids are preserved; `size` is untouched.
    /// Returns how many blocks changed position.
    pub fn compact(&mut self) -> usize {
        let mut cursor: Address = 0;
        let mut moved = 0;

        for block in &mut self.allocated {
            if block.low != cursor {
                block.relocate(cursor);
                moved += 1;
            }
            cursor = block.high + 1;
        }

        debug!(moved, used = cursor, "compacted address space");
        moved
    }

    fn position_of(&self, block_id: BlockId) -> Option<usize> {
        self.allocated.iter().position(|b| b.block_id == block_id)
    }
}
