//! Read-only reporting over an address space
//!
//! Nothing in this module mutates the space or the instruction queue. The
//! pending instructions are listed through a non-destructive peek; consuming
//! them is a separate, explicit call on the simulator
//! ([`Simulator::drain_pending`]).
//!
//! # Report Format
//!
//! ```text
//! Allocated Blocks:
//! (0-2) --> ID 1
//! Free Slots:
//! (3-9) --> EMPTY
//! ```

use crate::memory::{AddressSpace, BlockId, Gap};
use crate::placement::Strategy;
use crate::simulator::errors::SimResult;
use crate::simulator::{simulate, Instruction, Simulator};
use rustc_hash::FxHashSet;
use std::fmt::{self, Write};

/// One row of the block table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRow {
    pub block_id: BlockId,
    pub low: u64,
    pub high: u64,
    pub length: u64,
}

/// Allocated blocks in address order
pub fn block_table(space: &AddressSpace) -> Vec<BlockRow> {
    space
        .intervals()
        .iter()
        .map(|b| BlockRow {
            block_id: b.block_id,
            low: b.low,
            high: b.high,
            length: b.len(),
        })
        .collect()
}

/// Free slots in address order
pub fn free_slot_table(space: &AddressSpace) -> Vec<Gap> {
    space.free_gaps()
}

/// Each block paired with the gaps touching it
pub fn neighbor_groups(space: &AddressSpace) -> Vec<(BlockId, FxHashSet<Gap>)> {
    space
        .intervals()
        .iter()
        .map(|b| {
            let touching = space
                .free_gaps()
                .into_iter()
                .filter(|gap| gap.touches(b))
                .collect();
            (b.block_id, touching)
        })
        .collect()
}

pub fn write_allocated_blocks<W: Write>(out: &mut W, space: &AddressSpace) -> fmt::Result {
    writeln!(out, "Allocated Blocks:")?;
    for block in space.intervals() {
        writeln!(out, "{}", block)?;
    }
    Ok(())
}

pub fn write_free_slots<W: Write>(out: &mut W, space: &AddressSpace) -> fmt::Result {
    writeln!(out, "Free Slots:")?;
    for gap in space.free_gaps() {
        writeln!(out, "{}", gap)?;
    }
    Ok(())
}

/// Allocated-blocks and free-slots sections back to back
pub fn memory_map(space: &AddressSpace) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_allocated_blocks(&mut out, space);
    let _ = write_free_slots(&mut out, space);
    out
}

/// Full state dump: strategy, remaining instructions, memory structure
pub fn simulation_details(sim: &Simulator) -> String {
    let mut out = String::new();
    let _ = write_simulation_details(&mut out, sim);
    out
}

fn write_simulation_details<W: Write>(out: &mut W, sim: &Simulator) -> fmt::Result {
    let space = sim.space();

    writeln!(out, "Simulation Details:")?;
    writeln!(out, "Strategy: {}", sim.strategy())?;

    let remaining: Vec<String> = sim
        .pending()
        .iter()
        .map(|i| {
            let (kind, id, dim) = i.as_triple();
            format!("({}, {}, {})", kind, id, dim)
        })
        .collect();
    writeln!(out, "List of Remaining Instructions: [{}]", remaining.join(", "))?;

    writeln!(out, "Current Memory Structure:")?;
    if space.is_empty() {
        writeln!(out, "Memory is empty.")?;
    } else {
        writeln!(out, "Memory Blocks:")?;
        for row in block_table(space) {
            writeln!(
                out,
                "Block ID: {}, Low Address: {}, High Address: {}, Dimension: {}",
                row.block_id, row.low, row.high, row.length
            )?;
        }
    }

    write_allocated_blocks(out, space)?;
    write_free_slots(out, space)?;
    writeln!(out, "Fragmentation: {:.3}", space.fragmentation())
}

/// Final state of one strategy over a shared script
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub strategy: Strategy,
    pub failures: usize,
    pub used: u64,
    pub free: u64,
    pub gaps: usize,
    pub largest_gap: u64,
    pub fragmentation: f64,
}

/// Run the same instructions under every strategy and summarize each
pub fn strategy_comparison(
    size: u64,
    instructions: &[Instruction],
) -> SimResult<Vec<ComparisonRow>> {
    Strategy::ALL
        .iter()
        .map(|&strategy| -> SimResult<ComparisonRow> {
            let mut sim = simulate(size, strategy, instructions.iter().copied())?;
            let failures = sim.run_all().iter().filter(|o| o.is_failure()).count();
            let space = sim.space();

            Ok(ComparisonRow {
                strategy,
                failures,
                used: space.used(),
                free: space.free_total(),
                gaps: space.free_gaps().len(),
                largest_gap: space.largest_gap().map_or(0, |g| g.len()),
                fragmentation: space.fragmentation(),
            })
        })
        .collect()
}

/// Render comparison rows as an aligned table
pub fn comparison_table(rows: &[ComparisonRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>8} {:>6} {:>6} {:>5} {:>8} {:>13}",
        "Strategy", "Failures", "Used", "Free", "Gaps", "Largest", "Fragmentation"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<10} {:>8} {:>6} {:>6} {:>5} {:>8} {:>13.3}",
            row.strategy.name(),
            row.failures,
            row.used,
            row.free,
            row.gaps,
            row.largest_gap,
            row.fragmentation
        );
    }
    out
}
