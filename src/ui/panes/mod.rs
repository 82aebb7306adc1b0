//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`map`]: Address space drawn as a grid of colored cells
//! - [`blocks`]: Allocated block table and free slots
//! - [`queue`]: Pending instructions, head first
//! - [`log`]: Report lines of the instructions processed so far
//! - [`status`]: Status bar with keybindings and playback state
//! - `utils`: Shared pane chrome and scroll helpers
//!
//! Each pane module exports a primary `render_*` function plus any state
//! type it needs.

mod utils;

pub mod blocks;
pub mod log;
pub mod map;
pub mod queue;
pub mod status;

// Re-export render functions for convenience
pub use blocks::{render_blocks_pane, BlocksRenderData, BlocksScrollState};
pub use log::render_log_pane;
pub use map::render_map_pane;
pub use queue::render_queue_pane;
pub use status::{render_status_bar, StatusRenderData};
