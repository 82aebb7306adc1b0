//! Scripted instructions and the FIFO queue that holds them

use super::errors::{SimError, SimResult};
use crate::memory::BlockId;
use std::collections::vec_deque::{self, VecDeque};
use std::fmt;

/// One scripted operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Allocate { block_id: BlockId, dimension: u64 },
    Deallocate { block_id: BlockId },
    Compact,
}

impl Instruction {
    /// Build an allocation, rejecting non-positive dimensions
    pub fn allocate(block_id: BlockId, dimension: i64) -> SimResult<Self> {
        if dimension <= 0 {
            return Err(SimError::InvalidDimension {
                block_id,
                dimension,
            });
        }
        Ok(Instruction::Allocate {
            block_id,
            dimension: dimension as u64,
        })
    }

    pub fn deallocate(block_id: BlockId) -> Self {
        Instruction::Deallocate { block_id }
    }

    /// Check the invariants a hand-built variant may have skipped
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            Instruction::Allocate {
                block_id,
                dimension: 0,
            } => Err(SimError::InvalidDimension {
                block_id,
                dimension: 0,
            }),
            _ => Ok(()),
        }
    }

    /// `(type, blockId, dimension)` triple used by the details listing.
    /// Type codes are 0 = allocate, 1 = deallocate, 2 = compact; absent fields
    /// report as 0.
    pub fn as_triple(&self) -> (u8, BlockId, u64) {
        match *self {
            Instruction::Allocate {
                block_id,
                dimension,
            } => (0, block_id, dimension),
            Instruction::Deallocate { block_id } => (1, block_id, 0),
            Instruction::Compact => (2, 0, 0),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Allocate {
                block_id,
                dimension,
            } => write!(f, "Allocate({}, {})", block_id, dimension),
            Instruction::Deallocate { block_id } => write!(f, "Deallocate({})", block_id),
            Instruction::Compact => write!(f, "Compact"),
        }
    }
}

/// FIFO queue of pending instructions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionQueue {
    items: VecDeque<Instruction>,
}

impl InstructionQueue {
    pub fn new() -> Self {
        InstructionQueue {
            items: VecDeque::new(),
        }
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.items.push_back(instruction);
    }

    /// Next instruction, left in place
    pub fn peek(&self) -> Option<&Instruction> {
        self.items.front()
    }

    pub fn pop(&mut self) -> Option<Instruction> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look at every pending instruction in order without consuming any
    pub fn iter(&self) -> vec_deque::Iter<'_, Instruction> {
        self.items.iter()
    }

    /// Remove and return every pending instruction
    pub fn drain(&mut self) -> Vec<Instruction> {
        self.items.drain(..).collect()
    }
}

impl<'a> IntoIterator for &'a InstructionQueue {
    type Item = &'a Instruction;
    type IntoIter = vec_deque::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
