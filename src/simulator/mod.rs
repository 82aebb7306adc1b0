//! Allocation simulator execution engine
//!
//! This module provides the instruction-driven core:
//! - [`engine`]: [`Simulator`], its [`SimState`] lifecycle and per-step [`Outcome`]s
//! - [`instruction`]: [`Instruction`] variants and the FIFO [`InstructionQueue`]
//! - [`errors`]: [`SimError`] taxonomy
//! - [`constants`]: defaults shared by the CLI, scripts and timeline
//!
//! # Execution Model
//!
//! Each call to [`Simulator::run`] pops instructions from the head of the
//! queue and applies them to the address space with the configured strategy.
//! Every popped instruction is consumed exactly once, whether or not it had an
//! effect. A bounded run leaves the rest of the queue in place so it can be
//! resumed later.
//!
//! [`SimError`]: errors::SimError

pub mod constants;
pub mod engine;
pub mod errors;
pub mod instruction;

pub use engine::{simulate, Outcome, SimState, Simulator};
pub use instruction::{Instruction, InstructionQueue};
