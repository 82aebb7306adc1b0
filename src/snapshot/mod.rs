// Snapshot management for stepping back and forth through a run

use crate::memory::AddressSpace;
use crate::placement::Strategy;
use crate::simulator::errors::{SimError, SimResult};
use crate::simulator::{Instruction, Outcome, Simulator};
use std::mem::size_of;

/// Recorded report lines, one per processed instruction
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub lines: Vec<LogLine>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog { lines: Vec::new() }
    }

    /// Record the outcome of the instruction processed at `step`
    pub fn record(&mut self, step: usize, outcome: &Outcome) {
        self.lines.push(LogLine {
            text: outcome.to_string(),
            step,
            failed: outcome.is_failure(),
        });
    }

    /// Get all lines as plain strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }
}

/// A line of the event log with the step that produced it
#[derive(Debug, Clone)]
pub struct LogLine {
    pub text: String,
    pub step: usize,
    pub failed: bool,
}

/// State of the simulation between two instructions
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub space: AddressSpace,
    pub pending: Vec<Instruction>,
    pub log: EventLog,
    pub step: usize, // Instructions processed so far
    pub last_outcome: Option<Outcome>,
}

impl Snapshot {
    fn capture(sim: &Simulator, log: &EventLog, last_outcome: Option<Outcome>) -> Self {
        Snapshot {
            space: sim.space().clone(),
            pending: sim.pending().iter().copied().collect(),
            log: log.clone(),
            step: sim.processed(),
            last_outcome,
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough: intervals and instructions at their in-memory size,
        // log lines at 80 bytes each
        let space_size = self.space.intervals().len() * size_of::<crate::memory::BlockInterval>();
        let pending_size = self.pending.len() * size_of::<Instruction>();
        let log_size = self.log.lines.len() * 80;

        size_of::<Snapshot>() + space_size + pending_size + log_size
    }
}

/// Every snapshot of a run, from before the first instruction to the end
#[derive(Debug)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    strategy: Strategy,
    max_memory: usize,
    current_memory: usize,
}

impl Timeline {
    pub fn new(strategy: Strategy, max_memory: usize) -> Self {
        Timeline {
            snapshots: Vec::new(),
            strategy,
            max_memory,
            current_memory: 0,
        }
    }

    /// Run `sim` to completion one instruction at a time, recording each state
    pub fn capture(mut sim: Simulator, max_memory: usize) -> SimResult<Self> {
        let mut timeline = Timeline::new(sim.strategy(), max_memory);
        let mut log = EventLog::new();

        timeline.push(Snapshot::capture(&sim, &log, None))?;
        while let Some(outcome) = sim.step() {
            log.record(sim.processed(), &outcome);
            timeline.push(Snapshot::capture(&sim, &log, Some(outcome)))?;
        }

        Ok(timeline)
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> SimResult<()> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(SimError::SnapshotLimitExceeded {
                current: self.current_memory + snapshot_size,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
