// Constants for the allocation simulator

/// Address space size of the built-in reference demo
pub const DEMO_SPACE_SIZE: u64 = 10;

/// Instructions processed by the demo's bounded run before it finishes the queue
pub const DEMO_BOUNDED_STEPS: usize = 2;

/// Default byte budget for a captured timeline (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;
