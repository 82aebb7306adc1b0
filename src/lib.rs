//! # Introduction
//!
//! fitsim simulates dynamic memory allocation over a fixed, bounded linear
//! address space and compares three placement strategies (first fit, best
//! fit, worst fit) against a scripted sequence of allocate, deallocate and
//! compact instructions.
//!
//! ## Pipeline
//!
//! ```text
//! Script → Instructions → Simulator → AddressSpace → Report / Timeline → TUI
//! ```
//!
//! 1. [`script`] — loads the size, strategy and instruction list from JSON.
//! 2. [`simulator`] — drains the FIFO instruction queue against one
//!    [`memory::AddressSpace`], step-bounded or to completion.
//! 3. [`memory`] — the address-space model: allocated
//!    [`memory::BlockInterval`]s in address order, free [`memory::Gap`]s
//!    derived on demand.
//! 4. [`placement`] — the pure first/best/worst-fit selection functions.
//! 5. [`diagnostics`] — block and free-slot tables, fragmentation, strategy
//!    comparison.
//! 6. [`snapshot`] — per-instruction snapshots of a run.
//! 7. [`ui`] — ratatui viewer over the snapshots; not part of the stable
//!    library API.
//!
//! ## Example
//!
//! ```
//! use fitsim::placement::Strategy;
//! use fitsim::simulator::{simulate, Instruction};
//!
//! let mut sim = simulate(
//!     10,
//!     Strategy::FirstFit,
//!     [Instruction::allocate(1, 3).unwrap(), Instruction::Compact],
//! )
//! .unwrap();
//! sim.run_all();
//! assert_eq!(sim.space().block_dimension(1).unwrap(), 3);
//! ```

pub mod diagnostics;
pub mod memory;
pub mod placement;
pub mod script;
pub mod simulator;
pub mod snapshot;
pub mod ui;
