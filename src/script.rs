//! Simulation scripts
//!
//! A script fixes the three construction parameters of a run: the address
//! space size, the placement strategy and the ordered instruction list. Scripts
//! are read from JSON:
//!
//! ```json
//! {
//!   "size": 10,
//!   "strategy": "BEST_FIT",
//!   "instructions": [
//!     { "type": "Allocate", "blockId": 1, "dimension": 3 },
//!     { "type": "Deallocate", "blockId": 1 },
//!     { "type": "Compact" }
//!   ]
//! }
//! ```
//!
//! Values arrive as signed integers so that zero or negative sizes and
//! dimensions are rejected here, before they reach the placement logic.

use crate::memory::{AddressSpace, BlockId};
use crate::placement::Strategy;
use crate::simulator::constants::DEMO_SPACE_SIZE;
use crate::simulator::errors::{SimError, SimResult};
use crate::simulator::{Instruction, Simulator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Instruction type tag as written in scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    #[serde(alias = "ALLOCATION", alias = "allocate")]
    Allocate,
    #[serde(alias = "DEALLOCATION", alias = "deallocate")]
    Deallocate,
    #[serde(alias = "COMPACT", alias = "compact")]
    Compact,
}

/// Raw instruction record; `dimension` is ignored unless allocating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    #[serde(rename = "type")]
    pub kind: InstructionKind,
    #[serde(rename = "blockId", default)]
    pub block_id: BlockId,
    #[serde(default)]
    pub dimension: i64,
}

impl InstructionRecord {
    pub fn to_instruction(&self) -> SimResult<Instruction> {
        match self.kind {
            InstructionKind::Allocate => Instruction::allocate(self.block_id, self.dimension),
            InstructionKind::Deallocate => Ok(Instruction::deallocate(self.block_id)),
            InstructionKind::Compact => Ok(Instruction::Compact),
        }
    }
}

/// Construction parameters for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub size: i64,
    pub strategy: Strategy,
    #[serde(default)]
    pub instructions: Vec<InstructionRecord>,
}

impl Script {
    /// Parse a script from JSON text
    pub fn from_json(text: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a script file
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The reference demo: five instructions against a 10-address space
    pub fn demo() -> Self {
        let record = |kind, block_id, dimension| InstructionRecord {
            kind,
            block_id,
            dimension,
        };
        Script {
            size: DEMO_SPACE_SIZE as i64,
            strategy: Strategy::BestFit,
            instructions: vec![
                record(InstructionKind::Allocate, 1, 3),
                record(InstructionKind::Allocate, 3, 3),
                record(InstructionKind::Allocate, 2, 3),
                record(InstructionKind::Deallocate, 0, 0),
                record(InstructionKind::Compact, 0, 0),
            ],
        }
    }

    /// Validated address space size
    pub fn space_size(&self) -> SimResult<u64> {
        if self.size <= 0 {
            return Err(SimError::InvalidSpaceSize { size: self.size });
        }
        Ok(self.size as u64)
    }

    /// Convert every record, failing on the first invalid one
    pub fn to_instructions(&self) -> SimResult<Vec<Instruction>> {
        self.instructions
            .iter()
            .map(InstructionRecord::to_instruction)
            .collect()
    }

    /// Build a ready-to-run simulator from this script
    pub fn build(&self) -> SimResult<Simulator> {
        let space = AddressSpace::new(self.space_size()?)?;
        Simulator::with_instructions(space, self.strategy, self.to_instructions()?)
    }
}
