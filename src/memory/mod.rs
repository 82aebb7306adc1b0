//! Memory model for the allocation simulator
//!
//! This module provides the core memory abstractions:
//! - [`interval`]: [`BlockInterval`] (an allocated range) and [`Gap`] (a free range)
//! - [`space`]: [`AddressSpace`], the bounded linear space holding the intervals
//!
//! # Addressing
//!
//! The space covers the addresses `0..size`. Every range is inclusive on both
//! ends, so a block of dimension `d` placed at `low` occupies `low..=low + d - 1`.
//!
//! ```text
//!  0         3         6       9
//!  [ID 1    ][ID 3    ][ EMPTY ]
//! ```
//!
//! Only allocated intervals are stored. Free gaps are always derived from the
//! complement of the intervals, so there is no separate free list to keep in
//! sync.

pub mod interval;
pub mod space;

pub use interval::{BlockInterval, Gap};
pub use space::AddressSpace;

/// Address within the simulated space
pub type Address = u64;

/// Caller-supplied block identifier
pub type BlockId = i32;

/// Number of addresses covered by the inclusive range `low..=high`
pub fn span_len(low: Address, high: Address) -> u64 {
    high - low + 1
}
