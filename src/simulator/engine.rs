// Execution engine for the allocation simulator

use super::errors::SimResult;
use super::instruction::{Instruction, InstructionQueue};
use crate::memory::{AddressSpace, BlockId, BlockInterval};
use crate::placement::Strategy;
use std::fmt;
use tracing::{info, warn};

/// Lifecycle of a simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Constructed or paused with instructions still queued
    Idle,
    /// Inside a `run` / `run_all` call
    Running,
    /// Queue is empty
    Drained,
}

/// What happened when one instruction was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Allocated(BlockInterval),
    AllocationFailed {
        block_id: BlockId,
        dimension: u64,
        reason: String,
    },
    Deallocated(BlockInterval),
    /// Deallocate named an id with no live block
    DeallocateIgnored { block_id: BlockId },
    Compacted { moved: usize },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::AllocationFailed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Allocated(block) => write!(
                f,
                "AllocationInstruction: Allocated block: {}  dimension: {} addresses: {}-{}",
                block.block_id,
                block.len(),
                block.low,
                block.high
            ),
            Outcome::AllocationFailed {
                block_id,
                dimension,
                ..
            } => write!(
                f,
                "AllocationInstruction failed: block: {} dimension: {}",
                block_id, dimension
            ),
            Outcome::Deallocated(block) => write!(
                f,
                "DeallocationInstruction: Released block: {} addresses: {}-{}",
                block.block_id, block.low, block.high
            ),
            Outcome::DeallocateIgnored { block_id } => write!(
                f,
                "DeallocationInstruction: block {} not allocated, ignored",
                block_id
            ),
            Outcome::Compacted { moved } => {
                write!(f, "CompactInstruction: moved {} block(s)", moved)
            }
        }
    }
}

/// Drives a FIFO instruction queue against one address space
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Placement policy for every allocation
    strategy: Strategy,

    /// Instructions not yet processed
    pending: InstructionQueue,

    /// The space being simulated (owned exclusively)
    space: AddressSpace,

    state: SimState,

    /// Instructions consumed so far, successful or not
    processed: usize,
}

impl Simulator {
    /// Create a simulator with an empty queue
    pub fn new(space: AddressSpace, strategy: Strategy) -> Self {
        Simulator {
            strategy,
            pending: InstructionQueue::new(),
            space,
            state: SimState::Idle,
            processed: 0,
        }
    }

    /// Create a simulator and enqueue every instruction in order
    pub fn with_instructions<I>(
        space: AddressSpace,
        strategy: Strategy,
        instructions: I,
    ) -> SimResult<Self>
    where
        I: IntoIterator<Item = Instruction>,
    {
        let mut sim = Simulator::new(space, strategy);
        for instruction in instructions {
            sim.enqueue(instruction)?;
        }
        Ok(sim)
    }

    /// Append an instruction to the tail of the queue
    pub fn enqueue(&mut self, instruction: Instruction) -> SimResult<()> {
        instruction.validate()?;
        self.pending.push(instruction);
        if self.state == SimState::Drained {
            self.state = SimState::Idle;
        }
        Ok(())
    }

    /// Process the head instruction, if any
    pub fn step(&mut self) -> Option<Outcome> {
        let instruction = self.pending.pop()?;
        let outcome = self.apply(instruction);
        self.processed += 1;
        Some(outcome)
    }

    /// Process at most `steps` instructions
    pub fn run(&mut self, steps: usize) -> Vec<Outcome> {
        self.state = SimState::Running;
        info!(
            strategy = %self.strategy,
            steps,
            pending = self.pending.len(),
            "running simulation"
        );

        let mut outcomes = Vec::with_capacity(steps.min(self.pending.len()));
        while outcomes.len() < steps {
            match self.step() {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }

        self.state = if self.pending.is_empty() {
            SimState::Drained
        } else {
            SimState::Idle
        };
        info!(
            processed = outcomes.len(),
            remaining = self.pending.len(),
            "simulation paused"
        );
        outcomes
    }

    /// Process until the queue is empty
    pub fn run_all(&mut self) -> Vec<Outcome> {
        self.run(self.pending.len())
    }

    /// Remove every pending instruction without applying it
    pub fn drain_pending(&mut self) -> Vec<Instruction> {
        let drained = self.pending.drain();
        self.state = SimState::Drained;
        drained
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn space(&self) -> &AddressSpace {
        &self.space
    }

    /// Pending instructions, for non-destructive inspection
    pub fn pending(&self) -> &InstructionQueue {
        &self.pending
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    fn apply(&mut self, instruction: Instruction) -> Outcome {
        match instruction {
            Instruction::Allocate {
                block_id,
                dimension,
            } => match self.space.allocate(block_id, dimension, self.strategy) {
                Ok(block) => Outcome::Allocated(block),
                Err(e) => {
                    warn!(block_id, dimension, error = %e, "allocation failed");
                    Outcome::AllocationFailed {
                        block_id,
                        dimension,
                        reason: e.to_string(),
                    }
                }
            },
            Instruction::Deallocate { block_id } => match self.space.deallocate(block_id) {
                Some(block) => Outcome::Deallocated(block),
                None => Outcome::DeallocateIgnored { block_id },
            },
            Instruction::Compact => Outcome::Compacted {
                moved: self.space.compact(),
            },
        }
    }
}

/// Build a simulator for a fresh space of `size` addresses
pub fn simulate<I>(size: u64, strategy: Strategy, instructions: I) -> SimResult<Simulator>
where
    I: IntoIterator<Item = Instruction>,
{
    let space = AddressSpace::new(size)?;
    Simulator::with_instructions(space, strategy, instructions)
}
